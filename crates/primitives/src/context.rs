//! The immutable transaction envelope and block header presented to the engine.

use alloy::primitives::{Address, Bytes, U256};
use serde::Deserialize;

use crate::hexutil::{deserialize_address, deserialize_bytes, deserialize_word};

/// Transaction `(to, from, origin, gasprice, value, data)`.
///
/// Every field is a hex string at the JSON fixture boundary (§6 Hex
/// conventions); the `deserialize_with` adapters in `hexutil` decode them
/// straight into native types, so nothing downstream of this type ever
/// touches a hex string again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_address")]
    pub to: Address,
    #[serde(deserialize_with = "deserialize_address")]
    pub from: Address,
    #[serde(deserialize_with = "deserialize_address")]
    pub origin: Address,
    #[serde(deserialize_with = "deserialize_word")]
    pub gasprice: U256,
    #[serde(deserialize_with = "deserialize_word")]
    pub value: U256,
    #[serde(deserialize_with = "deserialize_bytes")]
    pub data: Bytes,
}

/// Block header `(coinbase, timestamp, number, difficulty, gaslimit, chainid)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlockEnv {
    #[serde(deserialize_with = "deserialize_address")]
    pub coinbase: Address,
    #[serde(deserialize_with = "deserialize_word")]
    pub timestamp: U256,
    #[serde(deserialize_with = "deserialize_word")]
    pub number: U256,
    #[serde(deserialize_with = "deserialize_word")]
    pub difficulty: U256,
    #[serde(deserialize_with = "deserialize_word")]
    pub gaslimit: U256,
    #[serde(deserialize_with = "deserialize_word")]
    pub chainid: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_deserializes_from_hex_fixture_fields() {
        let json = r#"{
            "to": "0x00000000000000000000000000000000000001",
            "from": "0x0000000000000000000000000000000000000002",
            "origin": "2",
            "gasprice": "0x0",
            "value": "0x2a",
            "data": "a1b2"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.to, Address::with_last_byte(1));
        assert_eq!(tx.value, U256::from(42));
        assert_eq!(tx.data, Bytes::from(vec![0xa1, 0xb2]));
    }
}
