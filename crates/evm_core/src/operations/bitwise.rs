//! Comparison and bitwise opcodes: LT..SAR (0x10-0x1d).

use primitives::errors::Result;
use primitives::word;

use crate::dispatch::Dispatch;
use crate::Evm;

pub fn lt(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::lt(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn gt(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::gt(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn slt(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::slt(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn sgt(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::sgt(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn eq(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::eq(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn iszero(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    evm.stack.push(word::iszero(a))?;
    Ok(Dispatch::Continue)
}

pub fn and(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::and(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn or(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::or(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn xor(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::xor(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn not(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    evm.stack.push(word::not(a))?;
    Ok(Dispatch::Continue)
}

/// `i`-th most significant byte of `x`; the teacher's version compared
/// `index > 32` (off by one, 32 is already out of range) and read
/// `as_limbs()[byte_index]` as if limbs were bytes. `word::byte` fixes both.
pub fn byte(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let i = evm.stack.pop()?;
    let x = evm.stack.pop()?;
    evm.stack.push(word::byte(i, x))?;
    Ok(Dispatch::Continue)
}

pub fn shl(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let shift = evm.stack.pop()?;
    let value = evm.stack.pop()?;
    evm.stack.push(word::shl(shift, value))?;
    Ok(Dispatch::Continue)
}

pub fn shr(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let shift = evm.stack.pop()?;
    let value = evm.stack.pop()?;
    evm.stack.push(word::shr(shift, value))?;
    Ok(Dispatch::Continue)
}

pub fn sar(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let shift = evm.stack.pop()?;
    let value = evm.stack.pop()?;
    evm.stack.push(word::sar(shift, value))?;
    Ok(Dispatch::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, U256};
    use primitives::context::{BlockEnv, Transaction};
    use primitives::world::WorldState;

    fn evm_with_stack(values: &[U256]) -> Evm {
        let mut evm = Evm::top_level(Bytes::new(), Transaction::default(), BlockEnv::default(), WorldState::new());
        for v in values {
            evm.stack.push(*v).unwrap();
        }
        evm
    }

    #[test]
    fn byte_extracts_requested_index() {
        let mut evm = evm_with_stack(&[U256::from(0x1122u64), U256::from(31)]);
        byte(&mut evm, 0x1a).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), U256::from(0x22));
    }

    #[test]
    fn shl_then_shr_by_same_amount_is_a_roundtrip() {
        let mut evm = evm_with_stack(&[U256::from(1), U256::from(8)]);
        shl(&mut evm, 0x1b).unwrap();
        let shifted = evm.stack.pop().unwrap();
        evm.stack.push(U256::from(8)).unwrap();
        evm.stack.push(shifted).unwrap();
        shr(&mut evm, 0x1c).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), U256::from(1));
    }
}
