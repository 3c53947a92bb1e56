//! Master secret generation and deterministic per-election derivation.
//!
//! Both searches hash `be256(election_id) || secret || be64(nonce)` for
//! increasing nonces and return the first candidate meeting their
//! conditions, so the same inputs always reproduce the same output.

use crate::*;
use num_bigint_dig::BigUint;
use rand::{CryptoRng, Rng, RngCore};
use sha2::{Digest, Sha256};

/// A voter's offline root secret: master token and master blinding factor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MasterSecret {
    pub token: Token,
    pub r: BlindingFactor,
}

/// Generate a fresh master secret from the operating system's CSPRNG.
pub fn generate_master_secret() -> MasterSecret {
    let mut csprng = rand::rngs::OsRng {};
    generate_master_secret_with_rng(&mut csprng)
}

/// Generate a master secret from the supplied CSPRNG.
pub fn generate_master_secret_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> MasterSecret {
    let token: [u8; SECRET_BYTES] = rng.gen();
    let r: [u8; SECRET_BYTES] = rng.gen();
    MasterSecret {
        token: Token::Master(bytes_to_hex(&token)),
        r: BlindingFactor::Master(bytes_to_hex(&r)),
    }
}

fn derivation_hash(election_id: ElectionId, secret: &[u8], nonce: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(&be256(election_id));
    hasher.update(secret);
    hasher.update(&nonce.to_be_bytes());

    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Derive the unblinded election token for `election_id` from a master token.
///
/// The result always has leading nibble `0x0`.
pub fn derive_election_token(
    election_id: ElectionId,
    master_token: &Token,
    config: &DerivationConfig,
) -> Result<Token> {
    if !master_token.is_master() {
        return Err(ValidationError::MasterTokenRequired.into());
    }
    validate_token(master_token, false)?;
    let secret = hex_to_bytes(master_token.value(), SECRET_BYTES)?;

    for nonce in 0..config.max_iterations as u64 {
        let digest = derivation_hash(election_id, &secret, nonce);
        if digest[0] >> 4 == UNBLINDED_PREFIX {
            log::trace!(
                "election {}: token derived after {} attempts",
                election_id,
                nonce + 1
            );
            return Ok(Token::Election(bytes_to_hex(&digest)));
        }
    }

    log::warn!(
        "election {}: token derivation exhausted {} attempts",
        election_id,
        config.max_iterations
    );
    Err(Error::DerivationExhausted(config.max_iterations))
}

/// Derive the election blinding factor for `election_id`.
///
/// A candidate `R` is accepted when it and its padded multiplier are units
/// modulo N with `1 < R < N`, and blinding `unblinded_election_token` with it
/// yields leading nibble `0x1`. Both conditions draw on one nonce sequence.
pub fn derive_election_r(
    election_id: ElectionId,
    master_r: &BlindingFactor,
    unblinded_election_token: &Token,
    params: &RsaParams,
    config: &DerivationConfig,
) -> Result<BlindingFactor> {
    if !master_r.is_master() {
        return Err(ValidationError::MasterBlindingFactorRequired.into());
    }
    validate_r(master_r)?;
    validate_token(unblinded_election_token, true)?;
    validate_rsa_params(params, true, false)?;
    let secret = hex_to_bytes(master_r.value(), SECRET_BYTES)?;
    let one = BigUint::from(1u32);

    let mut rejected_units = 0usize;
    for nonce in 0..config.max_iterations as u64 {
        let digest = derivation_hash(election_id, &secret, nonce);
        let candidate = BigUint::from_bytes_be(&digest) % &params.n;

        if candidate <= one || !is_unit(&candidate, &params.n) {
            rejected_units += 1;
            continue;
        }
        let value = encode_hex(&candidate, SECRET_NIBBLES)?;
        let multiplier = pad_to_uint(&value, params.bit_length)?;
        if !is_unit(&multiplier, &params.n) {
            rejected_units += 1;
            continue;
        }

        let r = BlindingFactor::Election(value);
        match blind(unblinded_election_token, &r, params) {
            Ok(_) => {
                log::debug!(
                    "election {}: blinding factor derived after {} attempts ({} not invertible)",
                    election_id,
                    nonce + 1,
                    rejected_units
                );
                return Ok(r);
            }
            // Wrong blinded prefix, try the next nonce
            Err(Error::InvariantViolation(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    log::warn!(
        "election {}: blinding factor derivation exhausted {} attempts",
        election_id,
        config.max_iterations
    );
    Err(Error::DerivationExhausted(config.max_iterations))
}
