//! Environmental opcodes: ADDRESS..GASPRICE, EXTCODE*, the block-header
//! group, SELFBALANCE, RETURNDATASIZE/RETURNDATACOPY (spec §4.10, SPEC_FULL
//! §4.15).

use alloy::primitives::U256;
use primitives::errors::Result;
use primitives::word;

use crate::dispatch::Dispatch;
use crate::Evm;

pub fn address(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(word::from_address(evm.tx.to))?;
    Ok(Dispatch::Continue)
}

pub fn balance(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let addr = word::to_address(evm.stack.pop()?);
    evm.stack.push(evm.world.balance(addr))?;
    Ok(Dispatch::Continue)
}

pub fn origin(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(word::from_address(evm.tx.origin))?;
    Ok(Dispatch::Continue)
}

pub fn caller(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(word::from_address(evm.tx.from))?;
    Ok(Dispatch::Continue)
}

pub fn callvalue(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.tx.value)?;
    Ok(Dispatch::Continue)
}

pub fn calldataload(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let offset = word::to_usize(evm.stack.pop()?)?;
    evm.stack.push(evm.calldata.load(offset))?;
    Ok(Dispatch::Continue)
}

pub fn calldatasize(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(U256::from(evm.calldata.size() as u64))?;
    Ok(Dispatch::Continue)
}

pub fn calldatacopy(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let dest_offset = word::to_usize(evm.stack.pop()?)?;
    let src_offset = word::to_usize(evm.stack.pop()?)?;
    let size = word::to_usize(evm.stack.pop()?)?;
    let data = evm.calldata.as_slice().to_vec();
    evm.memory.copy_from(dest_offset, &data, src_offset, size)?;
    Ok(Dispatch::Continue)
}

pub fn codesize(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(U256::from(evm.code.len() as u64))?;
    Ok(Dispatch::Continue)
}

pub fn codecopy(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let dest_offset = word::to_usize(evm.stack.pop()?)?;
    let src_offset = word::to_usize(evm.stack.pop()?)?;
    let size = word::to_usize(evm.stack.pop()?)?;
    let code = evm.code.to_vec();
    evm.memory.copy_from(dest_offset, &code, src_offset, size)?;
    Ok(Dispatch::Continue)
}

pub fn gasprice(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.tx.gasprice)?;
    Ok(Dispatch::Continue)
}

pub fn extcodesize(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let addr = word::to_address(evm.stack.pop()?);
    evm.stack.push(U256::from(evm.world.code(addr).len() as u64))?;
    Ok(Dispatch::Continue)
}

pub fn extcodecopy(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let addr = word::to_address(evm.stack.pop()?);
    let dest_offset = word::to_usize(evm.stack.pop()?)?;
    let src_offset = word::to_usize(evm.stack.pop()?)?;
    let size = word::to_usize(evm.stack.pop()?)?;
    let code = evm.world.code(addr).to_vec();
    evm.memory.copy_from(dest_offset, &code, src_offset, size)?;
    Ok(Dispatch::Continue)
}

pub fn extcodehash(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let addr = word::to_address(evm.stack.pop()?);
    let code = evm.world.code(addr);
    let hash = alloy::primitives::keccak256(code.as_ref());
    evm.stack.push(U256::from_be_bytes(hash.0))?;
    Ok(Dispatch::Continue)
}

pub fn returndatasize(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(U256::from(evm.last_return_data.len() as u64))?;
    Ok(Dispatch::Continue)
}

pub fn returndatacopy(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let dest_offset = word::to_usize(evm.stack.pop()?)?;
    let src_offset = word::to_usize(evm.stack.pop()?)?;
    let size = word::to_usize(evm.stack.pop()?)?;
    let data = evm.last_return_data.to_vec();
    evm.memory.copy_from(dest_offset, &data, src_offset, size)?;
    Ok(Dispatch::Continue)
}

pub fn coinbase(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(word::from_address(evm.block.coinbase))?;
    Ok(Dispatch::Continue)
}

pub fn timestamp(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.block.timestamp)?;
    Ok(Dispatch::Continue)
}

pub fn number(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.block.number)?;
    Ok(Dispatch::Continue)
}

pub fn difficulty(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.block.difficulty)?;
    Ok(Dispatch::Continue)
}

pub fn gaslimit(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.block.gaslimit)?;
    Ok(Dispatch::Continue)
}

pub fn chainid(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.block.chainid)?;
    Ok(Dispatch::Continue)
}

pub fn selfbalance(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    evm.stack.push(evm.world.balance(evm.tx.to))?;
    Ok(Dispatch::Continue)
}
