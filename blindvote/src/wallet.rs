use crate::*;
use secp256k1::recovery::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};

/// Length of an Ethereum-style recoverable signature (`r || s || v`).
pub const WALLET_SIGNATURE_BYTES: usize = 65;

/// A per-election secp256k1 signing keypair.
#[derive(Clone, Debug)]
pub struct WalletKeypair {
    secret: SecretKey,
    public: PublicKey,
}

impl WalletKeypair {
    /// Build the keypair from a 256-bit `0x` hex private key.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let bytes = hex_to_bytes(private_key, SECRET_BYTES)?;
        let secret = SecretKey::from_slice(&bytes)?;
        let public = PublicKey::from_secret_key(&Secp256k1::signing_only(), &secret);
        Ok(WalletKeypair { secret, public })
    }

    /// Lower-case `0x` address of this keypair.
    pub fn address(&self) -> String {
        address_of(&self.public)
    }

    /// Sign `message` as an EIP-191 personal message.
    pub fn sign_message(&self, message: &[u8]) -> Result<String> {
        let digest = Message::from_slice(&personal_message_hash(message))?;
        let signature = Secp256k1::signing_only().sign_recoverable(&digest, &self.secret);
        let (recovery_id, compact) = signature.serialize_compact();

        let mut out = Vec::with_capacity(WALLET_SIGNATURE_BYTES);
        out.extend_from_slice(&compact);
        out.push(27 + recovery_id.to_i32() as u8);
        Ok(bytes_to_hex(&out))
    }
}

pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

fn address_of(public: &PublicKey) -> String {
    let uncompressed = public.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    bytes_to_hex(&hash[12..])
}

/// keccak256 of `message` behind the EIP-191 personal message prefix.
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let mut prefixed = format!("\x19Ethereum Signed Message:\n{}", message.len()).into_bytes();
    prefixed.extend_from_slice(message);
    keccak256(&prefixed)
}

/// Recover the address that produced an EIP-191 signature over `message`.
pub fn recover_signer(message: &[u8], signature: &str) -> Result<String> {
    let bytes = hex_to_bytes(signature, WALLET_SIGNATURE_BYTES)?;
    let v = bytes[64];
    let recovery_id = RecoveryId::from_i32(i32::from(v.checked_sub(27).unwrap_or(v)))?;
    let signature = RecoverableSignature::from_compact(&bytes[..64], recovery_id)?;

    let digest = Message::from_slice(&personal_message_hash(message))?;
    let public = Secp256k1::verification_only().recover(&digest, &signature)?;
    Ok(address_of(&public))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_address() {
        let wallet = WalletKeypair::from_private_key(KEY_ONE).unwrap();
        assert_eq!(
            wallet.address(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let zero = format!("0x{}", "0".repeat(64));
        assert!(matches!(
            WalletKeypair::from_private_key(&zero),
            Err(Error::Wallet(_))
        ));
        assert!(matches!(
            WalletKeypair::from_private_key("0x01"),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_sign_and_recover() {
        let wallet = WalletKeypair::from_private_key(
            "0x20e653a55a8d374a12579a0a7597f15eef023c480d6ed6b0c49402eeb893b3e2",
        )
        .unwrap();
        let signature = wallet.sign_message(b"ballot").unwrap();
        assert_eq!(signature.len(), 2 + 2 * WALLET_SIGNATURE_BYTES);

        let v = u8::from_str_radix(&signature[signature.len() - 2..], 16).unwrap();
        assert!(v == 27 || v == 28);

        assert_eq!(recover_signer(b"ballot", &signature).unwrap(), wallet.address());
        assert_ne!(
            recover_signer(b"ballots", &signature).ok(),
            Some(wallet.address())
        );
    }
}
