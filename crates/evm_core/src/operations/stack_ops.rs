//! Pure stack-shuffling opcodes: POP, PUSH1..PUSH32, DUP1..DUP16, SWAP1..SWAP16.

use alloy::primitives::U256;
use primitives::errors::{EvmError, Result};

use crate::dispatch::Dispatch;
use crate::opcodes::{dup_index, push_size, swap_index};
use crate::Evm;

pub fn pop(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.pop()?;
    Ok(Dispatch::Continue)
}

/// One handler serves PUSH1..PUSH32: read `n` immediate bytes following the
/// opcode (zero-filling if code runs out, per §4.8), push the big-endian
/// integer they form, advance `pc` by `1 + n`.
pub fn push(evm: &mut Evm, op: u8) -> Result<Dispatch> {
    let n = push_size(op).ok_or(EvmError::InvalidOpcode(op))?;
    let mut bytes = [0u8; 32];
    for i in 0..n {
        let code_index = evm.pc + 1 + i;
        bytes[32 - n + i] = evm.code.get(code_index).copied().unwrap_or(0);
    }
    evm.stack.push(U256::from_be_bytes(bytes))?;
    Ok(Dispatch::ContinueBy(n))
}

pub fn dup(evm: &mut Evm, op: u8) -> Result<Dispatch> {
    let n = dup_index(op).ok_or(EvmError::InvalidOpcode(op))?;
    evm.stack.dup(n)?;
    Ok(Dispatch::Continue)
}

pub fn swap(evm: &mut Evm, op: u8) -> Result<Dispatch> {
    let n = swap_index(op).ok_or(EvmError::InvalidOpcode(op))?;
    evm.stack.swap(n)?;
    Ok(Dispatch::Continue)
}
