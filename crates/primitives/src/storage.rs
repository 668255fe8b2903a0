//! Per-contract persistent storage: a `Word -> Word` map defaulting to zero.

use std::collections::HashMap;

use alloy::primitives::U256;

#[derive(Debug, Clone, Default)]
pub struct ContractStorage {
    data: HashMap<U256, U256>,
}

impl ContractStorage {
    pub fn new() -> Self {
        ContractStorage { data: HashMap::new() }
    }

    pub fn load(&self, key: U256) -> U256 {
        self.data.get(&key).copied().unwrap_or(U256::ZERO)
    }

    pub fn store(&mut self, key: U256, value: U256) {
        self.data.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_reads_zero() {
        let storage = ContractStorage::new();
        assert_eq!(storage.load(U256::from(1)), U256::ZERO);
    }

    #[test]
    fn store_then_load_roundtrips() {
        let mut storage = ContractStorage::new();
        storage.store(U256::from(1), U256::from(42));
        assert_eq!(storage.load(U256::from(1)), U256::from(42));
    }
}
