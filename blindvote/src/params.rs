use crate::*;
use num_bigint_dig::BigUint;
use num_integer::Integer;
use rsa::{PublicKeyParts, RSAPrivateKey, RSAPublicKey};

/// RSA parameters of a registration authority.
///
/// Voters hold `(n, e, bit_length)`. Only the authority also holds `d`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RsaParams {
    #[serde(with = "crate::serde_hex::biguint_hex")]
    pub n: BigUint,

    #[serde(with = "crate::serde_hex::option_biguint_hex", default)]
    pub e: Option<BigUint>,

    #[serde(with = "crate::serde_hex::option_biguint_hex", default)]
    pub d: Option<BigUint>,

    pub bit_length: usize,
}

impl RsaParams {
    /// Build voter-side parameters from a modulus and public exponent.
    pub fn new(n: BigUint, e: BigUint) -> Self {
        let bit_length = n.bits();
        RsaParams {
            n,
            e: Some(e),
            d: None,
            bit_length,
        }
    }

    /// Build authority-side parameters, including the private exponent.
    pub fn with_private_exponent(n: BigUint, e: BigUint, d: BigUint) -> Self {
        let mut params = Self::new(n, e);
        params.d = Some(d);
        params
    }

    /// Parse parameters from `0x` hex strings.
    pub fn from_hex(n: &str, e: Option<&str>, d: Option<&str>) -> Result<Self> {
        let n = decode_hex(n)?;
        let bit_length = n.bits();
        let params = RsaParams {
            n,
            e: e.map(decode_hex).transpose()?,
            d: d.map(decode_hex).transpose()?,
            bit_length,
        };
        params.validate()?;
        Ok(params)
    }

    /// Drop the private exponent, leaving what a voter may hold.
    pub fn to_public(&self) -> Self {
        RsaParams {
            d: None,
            ..self.clone()
        }
    }

    /// Number of hex digits in a blinded token or signature.
    pub fn nibbles(&self) -> usize {
        self.bit_length / 4
    }

    /// The public exponent, or a validation error if absent.
    pub fn public_exponent(&self) -> Result<&BigUint, ValidationError> {
        self.e.as_ref().ok_or(ValidationError::MissingPublicExponent)
    }

    /// The private exponent, or a validation error if absent.
    pub fn private_exponent(&self) -> Result<&BigUint, ValidationError> {
        self.d.as_ref().ok_or(ValidationError::MissingPrivateExponent)
    }

    /// Structural checks on the modulus and declared bit length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.n <= BigUint::from(3u32) || self.n.is_even() {
            return Err(ValidationError::InvalidModulus);
        }
        let actual = self.n.bits();
        if self.bit_length != actual {
            return Err(ValidationError::BitLengthMismatch {
                declared: self.bit_length,
                actual,
            });
        }
        if self.bit_length % 8 != 0 {
            return Err(ValidationError::UnalignedBitLength(self.bit_length));
        }
        Ok(())
    }
}

impl From<&RSAPublicKey> for RsaParams {
    fn from(key: &RSAPublicKey) -> Self {
        RsaParams::new(key.n().clone(), key.e().clone())
    }
}

impl From<&RSAPrivateKey> for RsaParams {
    fn from(key: &RSAPrivateKey) -> Self {
        RsaParams::with_private_exponent(key.n().clone(), key.e().clone(), key.d().clone())
    }
}

/// Validate RSA parameters, additionally requiring the exponents an
/// operation needs.
pub fn validate_rsa_params(
    params: &RsaParams,
    need_public: bool,
    need_private: bool,
) -> Result<(), ValidationError> {
    params.validate()?;
    if need_public {
        params.public_exponent()?;
    }
    if need_private {
        params.private_exponent()?;
    }
    Ok(())
}
