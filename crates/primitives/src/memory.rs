//! Byte-addressable, auto-expanding scratch memory.

use alloy::primitives::U256;

use crate::errors::{EvmError, Result};

/// Memory whose length is always a multiple of 32 bytes.
///
/// Any access that touches an offset past the current length grows the
/// buffer first, zero-filling the new bytes: new size becomes
/// `32 * (offset / 32 + 1)`.
#[derive(Default, Debug, Clone)]
pub struct Memory {
    pub data: Vec<u8>,
}

impl Memory {
    pub fn new() -> Self {
        Memory { data: Vec::new() }
    }

    pub fn new_with_data(data: Vec<u8>) -> Self {
        let mut memory = Memory { data };
        memory.pad_to_word_multiple();
        memory
    }

    fn pad_to_word_multiple(&mut self) {
        let remainder = self.data.len() % 32;
        if remainder != 0 {
            self.data.resize(self.data.len() + (32 - remainder), 0);
        }
    }

    /// Current byte length. Always a multiple of 32.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    fn expand_to_cover(&mut self, last_byte: usize) {
        if last_byte < self.data.len() {
            return;
        }
        let new_size = 32 * (last_byte / 32 + 1);
        self.data.resize(new_size, 0);
    }

    pub fn store(&mut self, offset: usize, byte: u8) -> Result<()> {
        self.expand_to_cover(offset);
        self.data[offset] = byte;
        self.check_invariant()
    }

    pub fn store_word(&mut self, offset: usize, word: U256) -> Result<()> {
        let last = offset.checked_add(31).ok_or_else(|| EvmError::InvalidOffset(offset.to_string()))?;
        self.expand_to_cover(last);
        let word_to_bytes: [u8; 32] = word.to_be_bytes();
        self.data[offset..offset + 32].copy_from_slice(&word_to_bytes);
        self.check_invariant()
    }

    pub fn load(&mut self, offset: usize) -> Result<U256> {
        let last = offset.checked_add(31).ok_or_else(|| EvmError::InvalidOffset(offset.to_string()))?;
        self.expand_to_cover(last);
        let bytes = &self.data[offset..offset + 32];
        Ok(U256::from_be_slice(bytes))
    }

    /// Single-byte load; returns 0 past the end without expanding.
    pub fn load_byte(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0)
    }

    /// Copy `length` bytes from `src` at `src_offset` into this memory at
    /// `dest_offset`, zero-extending `src` if it runs out of bytes.
    pub fn copy_from(&mut self, dest_offset: usize, src: &[u8], src_offset: usize, length: usize) -> Result<()> {
        if length == 0 {
            return Ok(());
        }
        let last = dest_offset
            .checked_add(length - 1)
            .ok_or_else(|| EvmError::InvalidOffset(dest_offset.to_string()))?;
        self.expand_to_cover(last);
        for i in 0..length {
            let byte = src_offset
                .checked_add(i)
                .and_then(|idx| src.get(idx))
                .copied()
                .unwrap_or(0);
            self.data[dest_offset + i] = byte;
        }
        self.check_invariant()
    }

    /// Read exactly `length` bytes starting at `offset`, expanding as needed.
    /// Used by SHA3 to hash exactly the requested byte range.
    pub fn read(&mut self, offset: usize, length: usize) -> Result<Vec<u8>> {
        if length == 0 {
            return Ok(Vec::new());
        }
        let last = offset
            .checked_add(length - 1)
            .ok_or_else(|| EvmError::InvalidOffset(offset.to_string()))?;
        self.expand_to_cover(last);
        Ok(self.data[offset..offset + length].to_vec())
    }

    fn check_invariant(&self) -> Result<()> {
        if self.data.len() % 32 != 0 {
            return Err(EvmError::InvalidMemoryLength(self.data.len()));
        }
        Ok(())
    }
}
