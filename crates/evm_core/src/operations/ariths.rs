//! Word arithmetic opcodes: ADD..SIGNEXTEND (0x01-0x0b).
//!
//! Each handler pops its operands top-first and delegates the actual math
//! to `primitives::word`, which is where the wrapping/truncating/signed
//! semantics live.

use primitives::errors::Result;
use primitives::word;

use crate::dispatch::Dispatch;
use crate::Evm;

pub fn add(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::add(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn sub(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::sub(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn mul(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::mul(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn div(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::div(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn sdiv(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::sdiv(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn modulo(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::rem(a, b))?;
    Ok(Dispatch::Continue)
}

/// Signed modulo. The sign of the result follows the sign of the dividend,
/// not the divisor — unlike MOD, this cannot be answered with unsigned `%`.
pub fn smod(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    evm.stack.push(word::smod(a, b))?;
    Ok(Dispatch::Continue)
}

pub fn addmod(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    let n = evm.stack.pop()?;
    evm.stack.push(word::addmod(a, b, n))?;
    Ok(Dispatch::Continue)
}

pub fn mulmod(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let a = evm.stack.pop()?;
    let b = evm.stack.pop()?;
    let n = evm.stack.pop()?;
    evm.stack.push(word::mulmod(a, b, n))?;
    Ok(Dispatch::Continue)
}

pub fn exp(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let base = evm.stack.pop()?;
    let exponent = evm.stack.pop()?;
    evm.stack.push(word::exp(base, exponent))?;
    Ok(Dispatch::Continue)
}

pub fn signextend(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let size = evm.stack.pop()?;
    let value = evm.stack.pop()?;
    evm.stack.push(word::signextend(size, value))?;
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
    fn sub_wraps_on_underflow() {
        let mut evm = evm_with_stack(&[U256::from(1), U256::ZERO]);
        sub(&mut evm, 0x03).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), U256::MAX);
    }

    #[test]
    fn smod_follows_dividend_sign() {
        // -8 % 3 in signed 256-bit arithmetic is -2 (sign follows dividend).
        let minus_eight = word::sub(U256::ZERO, U256::from(8));
        let minus_two = word::sub(U256::ZERO, U256::from(2));
        let mut evm = evm_with_stack(&[U256::from(3), minus_eight]);
        smod(&mut evm, 0x07).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), minus_two);
    }

    #[test]
    fn addmod_reduces_before_overflowing() {
        // push order b, n, a so that pop order (a, b, n) is (3, 2, MAX).
        let mut evm = evm_with_stack(&[U256::MAX, U256::from(2), U256::from(3)]);
        addmod(&mut evm, 0x08).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), word::addmod(U256::from(3), U256::from(2), U256::MAX));
    }
}
