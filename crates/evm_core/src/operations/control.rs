//! Flow-control and termination opcodes: STOP, JUMP, JUMPI, JUMPDEST, PC,
//! RETURN, REVERT.

use alloy::primitives::{Bytes, U256};
use primitives::errors::{EvmError, Result};
use primitives::word;

use crate::dispatch::{Dispatch, ReturnEnvelope};
use crate::Evm;

/// STOP is only a clean success if it's the final byte of code (spec §9's
/// directed retention of the source's unusual success semantics); anywhere
/// else it halts with `success` left undefined.
pub fn stop(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let success = if evm.pc + 1 == evm.code.len() { Some(true) } else { None };
    Ok(Dispatch::Halt(ReturnEnvelope::stop(success)))
}

pub fn jump(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let dest = word::to_usize(evm.stack.pop()?)?;
    if !evm.is_valid_jumpdest(dest) {
        return Err(EvmError::InvalidJump(dest));
    }
    Ok(Dispatch::Jump(dest))
}

pub fn jumpi(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let dest = word::to_usize(evm.stack.pop()?)?;
    let cond = evm.stack.pop()?;
    if cond.is_zero() {
        return Ok(Dispatch::Continue);
    }
    if !evm.is_valid_jumpdest(dest) {
        return Err(EvmError::InvalidJump(dest));
    }
    Ok(Dispatch::Jump(dest))
}

pub fn jumpdest(_evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    Ok(Dispatch::Continue)
}

/// Push the program counter as it was at fetch time, before this handler runs.
pub fn pc(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(U256::from(evm.pc as u64))?;
    Ok(Dispatch::Continue)
}

pub fn ret(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let offset = word::to_usize(evm.stack.pop()?)?;
    let size = word::to_usize(evm.stack.pop()?)?;
    let bytes = evm.memory.read(offset, size)?;
    Ok(Dispatch::Halt(ReturnEnvelope::ret(Bytes::from(bytes))))
}

pub fn revert(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let offset = word::to_usize(evm.stack.pop()?)?;
    let size = word::to_usize(evm.stack.pop()?)?;
    let bytes = evm.memory.read(offset, size)?;
    Ok(Dispatch::Halt(ReturnEnvelope::revert(Bytes::from(bytes))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::context::{BlockEnv, Transaction};
    use primitives::world::WorldState;

    #[test]
    fn jumpi_skips_validation_when_condition_is_zero() {
        let mut evm = Evm::top_level(Bytes::new(), Transaction::default(), BlockEnv::default(), WorldState::new());
        evm.stack.push(U256::ZERO).unwrap(); // cond
        evm.stack.push(U256::from(999)).unwrap(); // dest, never checked
        let dispatch = jumpi(&mut evm, 0x57).unwrap();
        assert!(matches!(dispatch, Dispatch::Continue));
    }

    #[test]
    fn jump_to_invalid_destination_errors() {
        let mut evm = Evm::top_level(Bytes::copy_from_slice(&[0x00]), Transaction::default(), BlockEnv::default(), WorldState::new());
        evm.stack.push(U256::from(5)).unwrap();
        assert!(matches!(jump(&mut evm, 0x56), Err(EvmError::InvalidJump(5))));
    }
}
