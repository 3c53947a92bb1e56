// Serde adapters for big integers carried as `0x` hex strings.
use crate::codec::decode_hex;
use num_bigint_dig::BigUint;
use serde::{de, Deserialize, Deserializer, Serializer};

// a single-purpose module for use in `#[serde(with)]`
pub mod biguint_hex {
    use super::*;

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", value.to_str_radix(16)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode_hex(&s).map_err(de::Error::custom)
    }
}

// a single-purpose module for use in `#[serde(with)]`
pub mod option_biguint_hex {
    use super::*;

    pub fn serialize<S>(value: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => biguint_hex::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        s.map(|s| decode_hex(&s).map_err(de::Error::custom))
            .transpose()
    }
}
