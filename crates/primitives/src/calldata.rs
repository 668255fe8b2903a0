//! Read-only view over a transaction's input bytes.

use alloy::primitives::U256;

/// Immutable byte sequence with zero-extended loads past the end.
#[derive(Debug, Clone, Default)]
pub struct Calldata {
    data: Vec<u8>,
}

impl Calldata {
    pub fn new(data: Vec<u8>) -> Self {
        Calldata { data }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 32 bytes starting at `offset`, zero-extended to the right past the end.
    pub fn load(&self, offset: usize) -> U256 {
        let mut bytes = [0u8; 32];
        for (i, slot) in bytes.iter_mut().enumerate() {
            if let Some(byte) = offset.checked_add(i).and_then(|idx| self.data.get(idx)) {
                *slot = *byte;
            }
        }
        U256::from_be_bytes(bytes)
    }

    pub fn load_byte(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0)
    }
}
