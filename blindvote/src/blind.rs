//! RSA blind signatures over full-domain padded election tokens.
//!
//! The voter blinds with `pad(t) * pad(r)^e mod N` and unblinds by
//! multiplying with `pad(r)^-1`. The authority signs the blinded value
//! directly with its private exponent and never sees `r`.

use crate::*;
use num_bigint_dig::BigUint;

/// Check that a padded token is usable as a blinding input: `3 <= m < N-1`.
pub(crate) fn check_blindable(padded: &BigUint, n: &BigUint) -> Result<()> {
    let three = BigUint::from(3u32);
    let one = BigUint::from(1u32);
    if *n <= three || *padded < three || *padded >= n - &one {
        return Err(Error::OutOfRange("padded token must satisfy 3 <= m < N-1"));
    }
    Ok(())
}

/// Blind an unblinded election token with an election blinding factor.
pub fn blind(unblinded_token: &Token, r: &BlindingFactor, params: &RsaParams) -> Result<Token> {
    match unblinded_token {
        Token::Master(_) => return Err(ValidationError::MasterTokenNotAllowed.into()),
        Token::BlindedElection(_) => return Err(ValidationError::BlindedTokenNotAllowed.into()),
        Token::Election(_) => {}
    }
    if r.is_master() {
        return Err(ValidationError::MasterBlindingFactorNotAllowed.into());
    }
    validate_token(unblinded_token, true)?;
    validate_r(r)?;
    validate_rsa_params(params, true, false)?;
    let e = params.public_exponent()?;

    let padded = pad_to_uint(unblinded_token.value(), params.bit_length)?;
    check_blindable(&padded, &params.n)?;

    let multiplier = pad_to_uint(r.value(), params.bit_length)?;
    let blinded = (padded * multiplier.modpow(e, &params.n)) % &params.n;

    let token = Token::BlindedElection(encode_hex(&blinded, params.nibbles())?);
    validate_token(&token, false)
        .map_err(|_| Error::InvariantViolation("blinded token must start with nibble 0x1"))?;

    Ok(token)
}

/// Sign a blinded token with the authority's private exponent.
pub fn sign(blinded_token: &Token, params: &RsaParams) -> Result<Signature> {
    match blinded_token {
        Token::Master(_) => return Err(ValidationError::MasterTokenNotAllowed.into()),
        Token::Election(_) => return Err(ValidationError::UnblindedTokenNotAllowed.into()),
        Token::BlindedElection(_) => {}
    }
    validate_token(blinded_token, false)?;
    validate_rsa_params(params, false, true)?;
    check_width(blinded_token.value(), "blinded token", params.nibbles())?;
    let d = params.private_exponent()?;

    let value = blinded_token.to_uint()?;
    if value >= params.n {
        return Err(Error::OutOfRange("blinded token must be below N"));
    }

    let signature = value.modpow(d, &params.n);
    Ok(Signature::Blinded(encode_hex(&signature, params.nibbles())?))
}

/// Remove the blinding factor from an authority signature.
pub fn unblind(
    blinded_signature: &Signature,
    r: &BlindingFactor,
    params: &RsaParams,
) -> Result<Signature> {
    if !blinded_signature.is_blinded() {
        return Err(ValidationError::UnblindedSignatureNotAllowed.into());
    }
    if r.is_master() {
        return Err(ValidationError::MasterBlindingFactorNotAllowed.into());
    }
    validate_r(r)?;
    validate_rsa_params(params, false, false)?;
    validate_signature_for(blinded_signature, params)?;

    let multiplier = pad_to_uint(r.value(), params.bit_length)?;
    let inverse = mod_inverse(&multiplier, &params.n).ok_or(Error::NotInvertible)?;

    let unblinded = (blinded_signature.to_uint()? * inverse) % &params.n;
    Ok(Signature::Unblinded(encode_hex(&unblinded, params.nibbles())?))
}

/// Verify an unblinded signature over an unblinded election token.
///
/// A signature that does not match yields `Ok(false)`. Errors are reserved
/// for malformed or out-of-domain inputs.
pub fn verify(
    unblinded_signature: &Signature,
    unblinded_token: &Token,
    params: &RsaParams,
) -> Result<bool> {
    if unblinded_signature.is_blinded() {
        return Err(ValidationError::BlindedSignatureNotAllowed.into());
    }
    validate_token(unblinded_token, true)?;
    validate_rsa_params(params, true, false)?;
    let e = params.public_exponent()?;

    validate_signature(unblinded_signature)?;
    let signature = unblinded_signature.to_uint()?;
    if !in_signature_range(&signature, &params.n) {
        return Err(Error::OutOfRange("signature must be in [2, N-2]"));
    }
    let token = unblinded_token.to_uint()?;
    if !in_signature_range(&token, &params.n) {
        return Err(Error::OutOfRange("token must be in [2, N-2]"));
    }

    let expected = pad_to_uint(unblinded_token.value(), params.bit_length)?;
    Ok(signature.modpow(e, &params.n) == expected)
}
