use thiserror::Error;

/// Specialisation of `std::Result`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("blindvote: malformed hex value: {0}")]
    MalformedHex(String),

    #[error("blindvote: length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("blindvote: value out of range: {0}")]
    OutOfRange(&'static str),

    #[error("blindvote: {0}")]
    Validation(#[from] ValidationError),

    #[error("blindvote: invariant violated: {0}")]
    InvariantViolation(&'static str),

    #[error("blindvote: blinding factor has no inverse modulo N")]
    NotInvertible,

    #[error("blindvote: derivation exhausted after {0} iterations")]
    DerivationExhausted(usize),

    #[error("blindvote: malformed credential bundle: {0}")]
    MalformedCredentialBundle(String),

    #[error("blindvote: wallet key error: {0}")]
    Wallet(#[from] secp256k1::Error),

    #[error("blindvote: failed to encrypt vote")]
    VoteEncryption,

    #[error("blindvote: failed to decrypt vote")]
    VoteDecryption,
}

/// Structural invariant violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is not a 0x-prefixed hex value")]
    NotHex { field: &'static str },

    #[error("{field} must be {expected} hex digits, found {found}")]
    WrongWidth {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{field} must be lower-case hex")]
    NotLowercase { field: &'static str },

    #[error("{field} must start with nibble 0x{expected:x}")]
    WrongPrefix { field: &'static str, expected: u8 },

    #[error("{field} must be in [2, N-2]")]
    NotInSignatureRange { field: &'static str },

    #[error("Only unblinded Tokens can be blinded")]
    BlindedTokenNotAllowed,

    #[error("Only blinded Tokens can be signed")]
    UnblindedTokenNotAllowed,

    #[error("Master Tokens are never blinded, signed or verified")]
    MasterTokenNotAllowed,

    #[error("a master Token is required")]
    MasterTokenRequired,

    #[error("a master blinding factor is required")]
    MasterBlindingFactorRequired,

    #[error("master blinding factors cannot be used for blinding")]
    MasterBlindingFactorNotAllowed,

    #[error("blinding factor is not a unit modulo N")]
    BlindingFactorNotInvertible,

    #[error("only blinded Signatures can be unblinded")]
    UnblindedSignatureNotAllowed,

    #[error("only unblinded Signatures can be verified")]
    BlindedSignatureNotAllowed,

    #[error("RSA modulus must be odd and greater than 3")]
    InvalidModulus,

    #[error("RSA bit length {declared} does not match modulus bit length {actual}")]
    BitLengthMismatch { declared: usize, actual: usize },

    #[error("RSA bit length {0} is not a multiple of 8")]
    UnalignedBitLength(usize),

    #[error("public exponent e is required")]
    MissingPublicExponent,

    #[error("private exponent D is required")]
    MissingPrivateExponent,

    #[error("blind signature does not verify against the election token")]
    BlindSignatureMismatch,

    #[error("voting transaction is already signed")]
    AlreadySigned,

    #[error("voting transaction is not signed")]
    NotSigned,

    #[error("wallet address does not match the voter address")]
    MismatchedVoterAddress,
}
