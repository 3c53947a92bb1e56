//! Hex-string and big-integer conversions.
//!
//! Every value that crosses an API boundary is a lower-case, `0x`-prefixed
//! hex string zero-padded to the width of its field.

use crate::*;
use num_bigint_dig::{BigInt, BigUint, ModInverse, Sign};
use num_integer::Integer;
use num_traits::One;

/// Width in nibbles of master tokens, master and election blinding factors,
/// election tokens and all sha256-derived keys.
pub const SECRET_NIBBLES: usize = 64;

/// Width in bytes of the 256-bit values above.
pub const SECRET_BYTES: usize = SECRET_NIBBLES / 2;

/// Strip the `0x` prefix, failing if it is absent.
fn strip_prefix(s: &str) -> Result<&str> {
    match s.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => Ok(&s[2..]),
        _ => Err(Error::MalformedHex(s.to_owned())),
    }
}

/// Decode a `0x`-prefixed hex string into an unsigned big integer.
pub fn decode_hex(s: &str) -> Result<BigUint> {
    let digits = strip_prefix(s)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::MalformedHex(s.to_owned()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| Error::MalformedHex(s.to_owned()))
}

/// Encode a big integer as `0x` hex zero-padded to exactly `nibbles` digits.
pub fn encode_hex(value: &BigUint, nibbles: usize) -> Result<String> {
    let digits = value.to_str_radix(16);
    if digits.len() > nibbles {
        return Err(Error::LengthMismatch {
            expected: nibbles,
            found: digits.len(),
        });
    }
    Ok(format!("0x{:0>width$}", digits, width = nibbles))
}

/// Encode raw bytes as `0x` hex (two digits per byte).
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x` hex into exactly `expected` bytes.
pub fn hex_to_bytes(s: &str, expected: usize) -> Result<Vec<u8>> {
    let digits = strip_prefix(s)?;
    let bytes = hex::decode(digits).map_err(|_| Error::MalformedHex(s.to_owned()))?;
    if bytes.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            found: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Left-pad a big-endian integer to a fixed byte width.
pub fn to_fixed_bytes(value: &BigUint, width: usize) -> Result<Vec<u8>> {
    let bytes = value.to_bytes_be();
    if bytes.len() > width {
        return Err(Error::LengthMismatch {
            expected: width,
            found: bytes.len(),
        });
    }
    let mut out = vec![0u8; width - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// The 32-byte big-endian encoding of an election id.
pub fn be256(election_id: ElectionId) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&election_id.to_be_bytes());
    out
}

/// Number of hex digits after the `0x` prefix, without validating them.
pub(crate) fn hex_width(s: &str) -> usize {
    s.len().saturating_sub(2)
}

/// Most-significant nibble of a canonical hex value.
pub(crate) fn top_nibble(s: &str) -> Option<u8> {
    s.as_bytes()
        .get(2)
        .and_then(|b| (*b as char).to_digit(16))
        .map(|d| d as u8)
}

/// Check that `value` lies in `[2, N-2]`.
pub(crate) fn in_signature_range(value: &BigUint, n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    *n > two && *value >= two && *value <= n - &two
}

/// Whether `value` is a unit modulo `n`.
pub(crate) fn is_unit(value: &BigUint, n: &BigUint) -> bool {
    value.gcd(n).is_one()
}

/// Multiplicative inverse of `a` modulo `n`, normalised into `[0, n)`.
pub(crate) fn mod_inverse(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    let inv = a.clone().mod_inverse(n)?;
    let n = BigInt::from_biguint(Sign::Plus, n.clone());
    ((inv % &n + &n) % &n).to_biguint()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0x0a").unwrap(), BigUint::from(10u32));
        assert_eq!(decode_hex("0XFF").unwrap(), BigUint::from(255u32));

        assert!(matches!(decode_hex("ff"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode_hex("0x"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode_hex("0xzz"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode_hex("0x+1"), Err(Error::MalformedHex(_))));

        // Non-ASCII input is malformed, whatever the byte boundaries
        assert!(matches!(decode_hex("0é"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode_hex("é"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode_hex("0xé"), Err(Error::MalformedHex(_))));
        assert!(matches!(hex_to_bytes("0é", 1), Err(Error::MalformedHex(_))));
    }

    #[test]
    fn test_encode_hex() {
        let v = BigUint::from(0xabcu32);
        assert_eq!(encode_hex(&v, 6).unwrap(), "0x000abc");
        assert_eq!(encode_hex(&v, 3).unwrap(), "0xabc");
        assert_eq!(
            encode_hex(&v, 2),
            Err(Error::LengthMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("0x0102", 2).unwrap(), vec![1, 2]);
        assert!(matches!(
            hex_to_bytes("0x0102", 3),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(hex_to_bytes("0x012", 2), Err(Error::MalformedHex(_))));
        assert_eq!(bytes_to_hex(&[0, 255]), "0x00ff");
    }

    #[test]
    fn test_be256() {
        let bytes = be256(0x0102);
        assert_eq!(bytes[30..], [1, 2]);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_modular_helpers() {
        let n = BigUint::from(15u32);
        assert!(in_signature_range(&BigUint::from(2u32), &n));
        assert!(in_signature_range(&BigUint::from(13u32), &n));
        assert!(!in_signature_range(&BigUint::from(1u32), &n));
        assert!(!in_signature_range(&BigUint::from(14u32), &n));

        assert!(is_unit(&BigUint::from(7u32), &n));
        assert!(!is_unit(&BigUint::from(6u32), &n));

        assert_eq!(
            mod_inverse(&BigUint::from(7u32), &n),
            Some(BigUint::from(13u32))
        );
        assert_eq!(mod_inverse(&BigUint::from(5u32), &n), None);
    }

    #[test]
    fn test_top_nibble() {
        assert_eq!(top_nibble("0x1f"), Some(1));
        assert_eq!(top_nibble("0xa0"), Some(10));
        assert_eq!(top_nibble("0x"), None);
    }
}
