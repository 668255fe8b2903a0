//! Persistent per-contract storage opcodes: SLOAD, SSTORE. Scoped to the
//! currently executing contract (`tx.to`).

use primitives::errors::Result;

use crate::dispatch::Dispatch;
use crate::Evm;

pub fn sload(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let key = evm.stack.pop()?;
    let value = evm.world.sload(evm.tx.to, key);
    evm.stack.push(value)?;
    Ok(Dispatch::Continue)
}

pub fn sstore(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let key = evm.stack.pop()?;
    let value = evm.stack.pop()?;
    evm.world.sstore(evm.tx.to, key, value);
    Ok(Dispatch::Continue)
}
