//! Hex decoding helpers for the JSON fixture boundary (spec §6 Hex conventions).
//!
//! Every Word-valued field in a fixture's `tx`/`block` is a hex string, with
//! or without a leading `0x`; addresses are 40 hex digits, left-zero-padded.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Deserializer};

use crate::errors::{EvmError, Result};

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Decode a hex string (optionally `0x`-prefixed, odd-length tolerated) into raw bytes.
pub fn decode_bytes(s: &str) -> Result<Vec<u8>> {
    let s = strip_0x(s);
    if s.len() % 2 == 1 {
        Ok(hex::decode(format!("0{s}"))?)
    } else {
        Ok(hex::decode(s)?)
    }
}

/// Decode a hex string into a `U256`, zero for an empty string.
pub fn decode_word(s: &str) -> Result<U256> {
    let s = strip_0x(s);
    if s.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(s, 16).map_err(|_| EvmError::InvalidValue(s.to_string()))
}

/// Decode a 40-hex-digit address, left-zero-padding shorter input.
pub fn decode_address(s: &str) -> Result<Address> {
    let s = strip_0x(s);
    if s.len() > 40 {
        return Err(EvmError::InvalidAddress(s.to_string()));
    }
    let padded = format!("{:0>40}", s);
    let bytes = hex::decode(&padded)?;
    Ok(Address::from_slice(&bytes))
}

/// `serde(deserialize_with = "...")` adapter for Word-valued fixture fields.
pub fn deserialize_word<'de, D>(deserializer: D) -> std::result::Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    decode_word(&s).map_err(serde::de::Error::custom)
}

/// `serde(deserialize_with = "...")` adapter for address-valued fixture fields.
pub fn deserialize_address<'de, D>(deserializer: D) -> std::result::Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    decode_address(&s).map_err(serde::de::Error::custom)
}

/// `serde(deserialize_with = "...")` adapter for raw-byte fixture fields (e.g. `tx.data`).
pub fn deserialize_bytes<'de, D>(deserializer: D) -> std::result::Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    decode_bytes(&s).map(Bytes::from).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_word_accepts_0x_prefix() {
        assert_eq!(decode_word("0x2a").unwrap(), U256::from(42));
        assert_eq!(decode_word("2a").unwrap(), U256::from(42));
    }

    #[test]
    fn decode_word_empty_is_zero() {
        assert_eq!(decode_word("").unwrap(), U256::ZERO);
        assert_eq!(decode_word("0x").unwrap(), U256::ZERO);
    }

    #[test]
    fn decode_address_pads_short_input() {
        let addr = decode_address("1").unwrap();
        assert_eq!(addr, Address::from_slice(&[0u8; 19].into_iter().chain([1]).collect::<Vec<_>>()));
    }

    #[test]
    fn decode_bytes_tolerates_odd_length() {
        assert_eq!(decode_bytes("abc").unwrap(), vec![0x0a, 0xbc]);
    }
}
