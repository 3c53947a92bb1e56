//! Full-domain padding.
//!
//! A message is hashed with SHAKE256 to `bit_length - 1` bits so that the
//! padded representative always fits below an RSA modulus of `bit_length`
//! bits. Voter and authority must pad identically to agree on what is signed.

use crate::*;
use num_bigint_dig::BigUint;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

/// Pad a `0x` hex message to the RSA domain, returning `0x` hex of
/// `bit_length / 4` digits.
pub fn pad(message: &str, bit_length: usize) -> Result<String> {
    let padded = pad_to_uint(message, bit_length)?;
    encode_hex(&padded, bit_length / 4)
}

/// As [`pad`], returning the padded representative as an integer.
pub fn pad_to_uint(message: &str, bit_length: usize) -> Result<BigUint> {
    if bit_length < 16 {
        return Err(Error::OutOfRange("padding bit length"));
    }
    // Rejects anything that is not 0x-prefixed hex
    decode_hex(message)?;

    let out_bits = bit_length - 1;
    let out_bytes = (out_bits + 7) / 8;

    let mut hasher = Shake256::default();
    hasher.update(message.to_ascii_lowercase().as_bytes());
    let mut reader = hasher.finalize_xof();
    let mut digest = vec![0u8; out_bytes];
    reader.read(&mut digest);

    let surplus = out_bytes * 8 - out_bits;
    digest[0] &= 0xffu8 >> surplus;

    Ok(BigUint::from_bytes_be(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_is_deterministic_and_case_insensitive() {
        let a = pad("0xABCDEF", 2048).unwrap();
        let b = pad("0xabcdef", 2048).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, pad("0xabcdef", 2048).unwrap());
        assert_ne!(a, pad("0xabcdee", 2048).unwrap());
    }

    #[test]
    fn test_pad_width() {
        for bits in [1024usize, 2048, 3072].iter() {
            let padded = pad("0x01", *bits).unwrap();
            assert_eq!(padded.len(), 2 + bits / 4);

            let value = pad_to_uint("0x01", *bits).unwrap();
            assert!(value.bits() <= bits - 1);
        }
    }

    #[test]
    fn test_pad_rejects_non_hex() {
        assert!(matches!(pad("abcdef", 2048), Err(Error::MalformedHex(_))));
        assert!(matches!(pad("0xhello", 2048), Err(Error::MalformedHex(_))));
    }

    #[test]
    fn test_pad_known_answer() {
        let padded = pad(
            "0x03587663fff185e4aaebef0c932693c721200da1f1c6851a037ac4ce62cf2f1b",
            2048,
        )
        .unwrap();
        assert!(padded.starts_with("0x1802d94c4f6bb1a9b7"));
    }
}
