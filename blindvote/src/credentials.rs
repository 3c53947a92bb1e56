//! Per-election voter credentials and their compact transport encoding.

use crate::*;
use sha2::{Digest, Sha256};

/// Field separator of the transport encoding.
pub const TRANSPORT_DELIMITER: char = '|';

const WALLET_KEY_LABEL: &[u8] = b"Ethereum-Wallet";
const ENCRYPTION_KEY_LABEL: &[u8] = b"Encryption-Key";

/// Signature widths, in bytes, accepted by [`unpack_from_transport`].
pub const SUPPORTED_SIGNATURE_BYTES: [usize; 5] = [128, 192, 256, 384, 512];

/// Everything a voter needs to prove eligibility and vote in one election.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ElectionCredentials {
    pub unblinded_signature: Signature,
    pub unblinded_election_token: Token,
    pub wallet_private_key: String,
    pub encryption_key: String,
    pub election_id: ElectionId,
}

impl ElectionCredentials {
    /// The secp256k1 keypair for this election.
    pub fn wallet(&self) -> Result<WalletKeypair> {
        WalletKeypair::from_private_key(&self.wallet_private_key)
    }

    /// Encode for transport, see [`pack_for_transport`].
    pub fn to_transport(&self) -> Result<String> {
        pack_for_transport(self)
    }

    /// Decode from transport, see [`unpack_from_transport`].
    pub fn from_transport(packed: &str) -> Result<Self> {
        unpack_from_transport(packed)
    }
}

fn derive_key(master: &[u8], label: &[u8], election_id: ElectionId) -> String {
    let mut hasher = Sha256::new();
    hasher.update(master);
    hasher.update(label);
    hasher.update(&be256(election_id));
    bytes_to_hex(&hasher.finalize())
}

/// Assemble the credentials for `election_id`, deriving the wallet and
/// vote-encryption keys from the master token under separate labels.
pub fn create_credentials(
    unblinded_signature: &Signature,
    unblinded_election_token: &Token,
    master_token: &Token,
    election_id: ElectionId,
) -> Result<ElectionCredentials> {
    if !master_token.is_master() {
        return Err(ValidationError::MasterTokenRequired.into());
    }
    validate_token(master_token, false)?;
    let master = hex_to_bytes(master_token.value(), SECRET_BYTES)?;

    let credentials = ElectionCredentials {
        unblinded_signature: unblinded_signature.clone(),
        unblinded_election_token: unblinded_election_token.clone(),
        wallet_private_key: derive_key(&master, WALLET_KEY_LABEL, election_id),
        encryption_key: derive_key(&master, ENCRYPTION_KEY_LABEL, election_id),
        election_id,
    };
    validate_credentials(&credentials)?;

    // Derivation happens once per election; only the address is logged
    log::debug!(
        "election {}: credentials created for wallet {}",
        election_id,
        credentials.wallet()?.address()
    );
    Ok(credentials)
}

/// Check every field of a credential bundle.
pub fn validate_credentials(credentials: &ElectionCredentials) -> Result<()> {
    if credentials.unblinded_signature.is_blinded() {
        return Err(ValidationError::BlindedSignatureNotAllowed.into());
    }
    validate_signature(&credentials.unblinded_signature)?;

    for &(field, value) in [
        ("signature", credentials.unblinded_signature.value()),
        ("election token", credentials.unblinded_election_token.value()),
        ("wallet private key", credentials.wallet_private_key.as_str()),
        ("encryption key", credentials.encryption_key.as_str()),
    ]
    .iter()
    {
        if value.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::NotLowercase { field }.into());
        }
    }
    let sig_bytes = hex_width(credentials.unblinded_signature.value()) / 2;
    if !SUPPORTED_SIGNATURE_BYTES.contains(&sig_bytes) {
        return Err(ValidationError::WrongWidth {
            field: "signature",
            expected: 512,
            found: sig_bytes * 2,
        }
        .into());
    }

    validate_token(&credentials.unblinded_election_token, true)?;

    for &(field, key) in [
        ("wallet private key", &credentials.wallet_private_key),
        ("encryption key", &credentials.encryption_key),
    ]
    .iter()
    {
        if decode_hex(key).is_err() {
            return Err(ValidationError::NotHex { field }.into());
        }
        if hex_width(key) != SECRET_NIBBLES {
            return Err(ValidationError::WrongWidth {
                field,
                expected: SECRET_NIBBLES,
                found: hex_width(key),
            }
            .into());
        }
    }
    credentials.wallet()?;

    Ok(())
}

/// Encoded length of `bytes` bytes in padded base64.
fn base64_len(bytes: usize) -> usize {
    (bytes + 2) / 3 * 4
}

/// Pack credentials as `b64(sig)|b64(token)|b64(wallet)|b64(key)|election_id`.
pub fn pack_for_transport(credentials: &ElectionCredentials) -> Result<String> {
    validate_credentials(credentials)?;

    let sig_bytes = hex_width(credentials.unblinded_signature.value()) / 2;
    let fields = [
        hex_to_bytes(credentials.unblinded_signature.value(), sig_bytes)?,
        hex_to_bytes(credentials.unblinded_election_token.value(), SECRET_BYTES)?,
        hex_to_bytes(&credentials.wallet_private_key, SECRET_BYTES)?,
        hex_to_bytes(&credentials.encryption_key, SECRET_BYTES)?,
    ];

    let mut packed = fields
        .iter()
        .map(base64::encode)
        .collect::<Vec<_>>()
        .join(&TRANSPORT_DELIMITER.to_string());
    packed.push(TRANSPORT_DELIMITER);
    packed.push_str(&credentials.election_id.to_string());
    Ok(packed)
}

fn malformed(reason: impl std::fmt::Display) -> Error {
    Error::MalformedCredentialBundle(reason.to_string())
}

fn decode_field(field: &'static str, encoded: &str, bytes: usize) -> Result<String> {
    if encoded.len() != base64_len(bytes) {
        return Err(malformed(format!(
            "{} must be {} base64 characters, found {}",
            field,
            base64_len(bytes),
            encoded.len()
        )));
    }
    let decoded = base64::decode(encoded).map_err(|e| malformed(format!("{}: {}", field, e)))?;
    if decoded.len() != bytes {
        return Err(malformed(format!(
            "{} decodes to {} bytes, expected {}",
            field,
            decoded.len(),
            bytes
        )));
    }
    Ok(bytes_to_hex(&decoded))
}

/// Unpack a transport string, re-validating every field.
pub fn unpack_from_transport(packed: &str) -> Result<ElectionCredentials> {
    let parts: Vec<&str> = packed.trim().split(TRANSPORT_DELIMITER).collect();
    if parts.len() != 5 {
        return Err(malformed(format!("expected 5 fields, found {}", parts.len())));
    }

    let sig_bytes = SUPPORTED_SIGNATURE_BYTES
        .iter()
        .copied()
        .find(|bytes| base64_len(*bytes) == parts[0].len())
        .ok_or_else(|| malformed(format!("unsupported signature length {}", parts[0].len())))?;

    let signature = decode_field("signature", parts[0], sig_bytes)?;
    let token = decode_field("election token", parts[1], SECRET_BYTES)?;
    let wallet_private_key = decode_field("wallet private key", parts[2], SECRET_BYTES)?;
    let encryption_key = decode_field("encryption key", parts[3], SECRET_BYTES)?;
    if parts[4].is_empty() || !parts[4].bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(format!("election id must be decimal digits: {}", parts[4])));
    }
    let election_id = parts[4]
        .parse::<ElectionId>()
        .map_err(|e| malformed(format!("election id: {}", e)))?;

    let credentials = ElectionCredentials {
        unblinded_signature: Signature::Unblinded(signature),
        unblinded_election_token: Token::Election(token),
        wallet_private_key,
        encryption_key,
        election_id,
    };
    validate_credentials(&credentials).map_err(malformed)?;

    Ok(credentials)
}
