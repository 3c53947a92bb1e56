//! Token, blinding factor and signature value types.
//!
//! The master/election and blinded/unblinded states are closed variants,
//! so a blinded master token cannot be constructed. Values are canonical
//! lower-case `0x` hex.

use crate::*;
use num_bigint_dig::BigUint;

/// Election id as published on chain.
pub type ElectionId = u64;

/// Leading nibble of every unblinded election token.
pub const UNBLINDED_PREFIX: u8 = 0x0;

/// Leading nibble of every blinded election token.
pub const BLINDED_PREFIX: u8 = 0x1;

/// A voter token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum Token {
    /// 256-bit random root secret, never sent to any service.
    Master(String),

    /// 256-bit election token derived from a master token.
    Election(String),

    /// Election token after padding and blinding; `bit_length / 4` digits.
    BlindedElection(String),
}

impl Token {
    pub fn value(&self) -> &str {
        match self {
            Token::Master(v) | Token::Election(v) | Token::BlindedElection(v) => v,
        }
    }

    pub fn is_master(&self) -> bool {
        matches!(self, Token::Master(_))
    }

    pub fn is_blinded(&self) -> bool {
        matches!(self, Token::BlindedElection(_))
    }

    /// Construct a master token from hex, validating its width.
    pub fn master(value: &str) -> Result<Self> {
        let token = Token::Master(value.to_ascii_lowercase());
        validate_token(&token, false)?;
        Ok(token)
    }

    /// Construct an unblinded election token from hex.
    pub fn election(value: &str) -> Result<Self> {
        let token = Token::Election(value.to_ascii_lowercase());
        validate_token(&token, true)?;
        Ok(token)
    }

    /// Construct a blinded election token from hex.
    pub fn blinded_election(value: &str) -> Result<Self> {
        let token = Token::BlindedElection(value.to_ascii_lowercase());
        validate_token(&token, false)?;
        Ok(token)
    }

    pub(crate) fn to_uint(&self) -> Result<BigUint> {
        decode_hex(self.value())
    }
}

/// A blinding factor (`R`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum BlindingFactor {
    /// 256-bit random seed from which election factors are derived.
    Master(String),

    /// Derived per-election factor, a unit modulo N.
    Election(String),
}

impl BlindingFactor {
    pub fn value(&self) -> &str {
        match self {
            BlindingFactor::Master(v) | BlindingFactor::Election(v) => v,
        }
    }

    pub fn is_master(&self) -> bool {
        matches!(self, BlindingFactor::Master(_))
    }

    pub fn master(value: &str) -> Result<Self> {
        let r = BlindingFactor::Master(value.to_ascii_lowercase());
        validate_r(&r)?;
        Ok(r)
    }

    pub fn election(value: &str) -> Result<Self> {
        let r = BlindingFactor::Election(value.to_ascii_lowercase());
        validate_r(&r)?;
        Ok(r)
    }
}

/// An RSA signature over a padded election token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum Signature {
    /// Signature over a blinded token, as returned by the authority.
    Blinded(String),

    /// Signature over the padded unblinded token.
    Unblinded(String),
}

impl Signature {
    pub fn value(&self) -> &str {
        match self {
            Signature::Blinded(v) | Signature::Unblinded(v) => v,
        }
    }

    pub fn is_blinded(&self) -> bool {
        matches!(self, Signature::Blinded(_))
    }

    pub fn blinded(value: &str) -> Result<Self> {
        let sig = Signature::Blinded(value.to_ascii_lowercase());
        validate_signature(&sig)?;
        Ok(sig)
    }

    pub fn unblinded(value: &str) -> Result<Self> {
        let sig = Signature::Unblinded(value.to_ascii_lowercase());
        validate_signature(&sig)?;
        Ok(sig)
    }

    pub(crate) fn to_uint(&self) -> Result<BigUint> {
        decode_hex(self.value())
    }
}

fn check_hex(value: &str, field: &'static str) -> Result<(), ValidationError> {
    decode_hex(value)
        .map(|_| ())
        .map_err(|_| ValidationError::NotHex { field })
}

pub(crate) fn check_width(value: &str, field: &'static str, expected: usize) -> Result<(), ValidationError> {
    let found = hex_width(value);
    if found != expected {
        return Err(ValidationError::WrongWidth {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_prefix(value: &str, field: &'static str, expected: u8) -> Result<(), ValidationError> {
    if top_nibble(value) != Some(expected) {
        return Err(ValidationError::WrongPrefix { field, expected });
    }
    Ok(())
}

/// A blinded token or signature must span a whole number of bytes.
fn check_modular_width(value: &str, field: &'static str) -> Result<(), ValidationError> {
    let found = hex_width(value);
    if found < SECRET_NIBBLES || found % 2 != 0 {
        return Err(ValidationError::WrongWidth {
            field,
            expected: SECRET_NIBBLES,
            found,
        });
    }
    Ok(())
}

/// Validate a token's encoding and domain-separation prefix.
///
/// With `require_unblinded`, master and blinded tokens are rejected.
pub fn validate_token(token: &Token, require_unblinded: bool) -> Result<(), ValidationError> {
    match token {
        Token::Master(v) => {
            if require_unblinded {
                return Err(ValidationError::MasterTokenNotAllowed);
            }
            check_hex(v, "master token")?;
            check_width(v, "master token", SECRET_NIBBLES)
        }
        Token::Election(v) => {
            check_hex(v, "election token")?;
            check_width(v, "election token", SECRET_NIBBLES)?;
            check_prefix(v, "election token", UNBLINDED_PREFIX)
        }
        Token::BlindedElection(v) => {
            if require_unblinded {
                return Err(ValidationError::BlindedTokenNotAllowed);
            }
            check_hex(v, "blinded token")?;
            check_modular_width(v, "blinded token")?;
            check_prefix(v, "blinded token", BLINDED_PREFIX)
        }
    }
}

/// Validate a blinding factor's encoding.
pub fn validate_r(r: &BlindingFactor) -> Result<(), ValidationError> {
    let field = if r.is_master() {
        "master blinding factor"
    } else {
        "blinding factor"
    };
    check_hex(r.value(), field)?;
    check_width(r.value(), field, SECRET_NIBBLES)
}

/// Validate an election blinding factor against the modulus: it and its
/// padded multiplier must be units, with `1 < R mod N < N`.
pub fn validate_r_for(r: &BlindingFactor, params: &RsaParams) -> Result<()> {
    if r.is_master() {
        return Err(ValidationError::MasterBlindingFactorNotAllowed.into());
    }
    validate_r(r)?;
    let value = decode_hex(r.value())? % &params.n;
    if value <= BigUint::from(1u32) {
        return Err(Error::OutOfRange("blinding factor must satisfy 1 < R mod N < N"));
    }
    if !is_unit(&value, &params.n) {
        return Err(ValidationError::BlindingFactorNotInvertible.into());
    }
    let multiplier = pad_to_uint(r.value(), params.bit_length)?;
    if !is_unit(&multiplier, &params.n) {
        return Err(ValidationError::BlindingFactorNotInvertible.into());
    }
    Ok(())
}

/// Validate a signature's encoding.
pub fn validate_signature(sig: &Signature) -> Result<(), ValidationError> {
    check_hex(sig.value(), "signature")?;
    check_modular_width(sig.value(), "signature")
}

/// Validate a signature against the modulus: width `bit_length / 4`, and
/// once unblinded, a value in `[2, N-2]`.
pub fn validate_signature_for(sig: &Signature, params: &RsaParams) -> Result<()> {
    validate_signature(sig)?;
    check_width(sig.value(), "signature", params.nibbles())?;
    let value = sig.to_uint()?;
    if value >= params.n {
        return Err(Error::OutOfRange("signature must be below N"));
    }
    if !sig.is_blinded() && !in_signature_range(&value, &params.n) {
        return Err(ValidationError::NotInSignatureRange { field: "signature" }.into());
    }
    Ok(())
}
