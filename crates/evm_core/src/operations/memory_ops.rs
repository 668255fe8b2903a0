//! Memory opcodes: MLOAD, MSTORE, MSTORE8, MSIZE.

use alloy::primitives::U256;
use primitives::errors::Result;
use primitives::word;

use crate::dispatch::Dispatch;
use crate::Evm;

pub fn mload(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let offset = word::to_usize(evm.stack.pop()?)?;
    let value = evm.memory.load(offset)?;
    evm.stack.push(value)?;
    Ok(Dispatch::Continue)
}

/// The teacher's `mstore`/`m_store` were duplicate handlers for the same
/// opcode, both popping `(offset, value)` in that order; kept as one.
pub fn mstore(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let offset = word::to_usize(evm.stack.pop()?)?;
    let value = evm.stack.pop()?;
    evm.memory.store_word(offset, value)?;
    Ok(Dispatch::Continue)
}

pub fn mstore8(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let offset = word::to_usize(evm.stack.pop()?)?;
    let value = evm.stack.pop()?;
    let low_byte = value.as_limbs()[0] as u8;
    evm.memory.store(offset, low_byte)?;
    Ok(Dispatch::Continue)
}

pub fn msize(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(U256::from(evm.memory.size() as u64))?;
    Ok(Dispatch::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Bytes;
    use primitives::context::{BlockEnv, Transaction};
    use primitives::world::WorldState;

    fn evm() -> Evm {
        Evm::top_level(Bytes::new(), Transaction::default(), BlockEnv::default(), WorldState::new())
    }

    #[test]
    fn mstore_then_mload_roundtrips() {
        let mut evm = evm();
        evm.stack.push(U256::from(42)).unwrap(); // value
        evm.stack.push(U256::from(0)).unwrap(); // offset
        mstore(&mut evm, 0x52).unwrap();
        evm.stack.push(U256::ZERO).unwrap();
        mload(&mut evm, 0x51).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), U256::from(42));
    }

    #[test]
    fn mstore8_writes_low_byte_and_msize_reports_word_multiple() {
        let mut evm = evm();
        evm.stack.push(U256::from(0x2a)).unwrap(); // value
        evm.stack.push(U256::from(5)).unwrap(); // offset
        mstore8(&mut evm, 0x53).unwrap();
        msize(&mut evm, 0x59).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), U256::from(32));
        assert_eq!(evm.memory.load_byte(5), 0x2a);
    }
}
