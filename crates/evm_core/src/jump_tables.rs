//! Builds the 256-entry array-of-function-pointers dispatch table the
//! fetch-decode-dispatch loop indexes into. Built once behind a
//! `OnceLock` and shared by every `Evm` instance — opcode handlers carry no
//! per-instance state, so one static table suffices for the whole process.

use std::sync::OnceLock;

use crate::dispatch::OpcodeFn;
use crate::opcodes::{dup_index, push_size, swap_index, Opcode};
use crate::operations::{ariths, bitwise, control, env, memory_ops, stack_ops, storage_ops, system};

fn build_jump_table() -> [Option<OpcodeFn>; 256] {
    let mut table: [Option<OpcodeFn>; 256] = [None; 256];

    table[Opcode::Stop as usize] = Some(control::stop);
    table[Opcode::Add as usize] = Some(ariths::add);
    table[Opcode::Mul as usize] = Some(ariths::mul);
    table[Opcode::Sub as usize] = Some(ariths::sub);
    table[Opcode::Div as usize] = Some(ariths::div);
    table[Opcode::SDiv as usize] = Some(ariths::sdiv);
    table[Opcode::Mod as usize] = Some(ariths::modulo);
    table[Opcode::SMod as usize] = Some(ariths::smod);
    table[Opcode::AddMod as usize] = Some(ariths::addmod);
    table[Opcode::MulMod as usize] = Some(ariths::mulmod);
    table[Opcode::Exp as usize] = Some(ariths::exp);
    table[Opcode::SignExtend as usize] = Some(ariths::signextend);

    table[Opcode::Lt as usize] = Some(bitwise::lt);
    table[Opcode::Gt as usize] = Some(bitwise::gt);
    table[Opcode::SLt as usize] = Some(bitwise::slt);
    table[Opcode::SGt as usize] = Some(bitwise::sgt);
    table[Opcode::Eq as usize] = Some(bitwise::eq);
    table[Opcode::IsZero as usize] = Some(bitwise::iszero);
    table[Opcode::And as usize] = Some(bitwise::and);
    table[Opcode::Or as usize] = Some(bitwise::or);
    table[Opcode::Xor as usize] = Some(bitwise::xor);
    table[Opcode::Not as usize] = Some(bitwise::not);
    table[Opcode::Byte as usize] = Some(bitwise::byte);
    table[Opcode::Shl as usize] = Some(bitwise::shl);
    table[Opcode::Shr as usize] = Some(bitwise::shr);
    table[Opcode::Sar as usize] = Some(bitwise::sar);

    table[Opcode::Sha3 as usize] = Some(system::sha3);

    table[Opcode::Address as usize] = Some(env::address);
    table[Opcode::Balance as usize] = Some(env::balance);
    table[Opcode::Origin as usize] = Some(env::origin);
    table[Opcode::Caller as usize] = Some(env::caller);
    table[Opcode::CallValue as usize] = Some(env::callvalue);
    table[Opcode::CallDataLoad as usize] = Some(env::calldataload);
    table[Opcode::CallDataSize as usize] = Some(env::calldatasize);
    table[Opcode::CallDataCopy as usize] = Some(env::calldatacopy);
    table[Opcode::CodeSize as usize] = Some(env::codesize);
    table[Opcode::CodeCopy as usize] = Some(env::codecopy);
    table[Opcode::GasPrice as usize] = Some(env::gasprice);
    table[Opcode::ExtCodeSize as usize] = Some(env::extcodesize);
    table[Opcode::ExtCodeCopy as usize] = Some(env::extcodecopy);
    table[Opcode::ReturnDataSize as usize] = Some(env::returndatasize);
    table[Opcode::ReturnDataCopy as usize] = Some(env::returndatacopy);
    table[Opcode::ExtCodeHash as usize] = Some(env::extcodehash);

    table[Opcode::Coinbase as usize] = Some(env::coinbase);
    table[Opcode::Timestamp as usize] = Some(env::timestamp);
    table[Opcode::Number as usize] = Some(env::number);
    table[Opcode::Difficulty as usize] = Some(env::difficulty);
    table[Opcode::GasLimit as usize] = Some(env::gaslimit);
    table[Opcode::ChainId as usize] = Some(env::chainid);
    table[Opcode::SelfBalance as usize] = Some(env::selfbalance);

    table[Opcode::Pop as usize] = Some(stack_ops::pop);
    table[Opcode::MLoad as usize] = Some(memory_ops::mload);
    table[Opcode::MStore as usize] = Some(memory_ops::mstore);
    table[Opcode::MStore8 as usize] = Some(memory_ops::mstore8);
    table[Opcode::SLoad as usize] = Some(storage_ops::sload);
    table[Opcode::SStore as usize] = Some(storage_ops::sstore);
    table[Opcode::Jump as usize] = Some(control::jump);
    table[Opcode::JumpI as usize] = Some(control::jumpi);
    table[Opcode::Pc as usize] = Some(control::pc);
    table[Opcode::MSize as usize] = Some(memory_ops::msize);

    table[Opcode::JumpDest as usize] = Some(control::jumpdest);

    for op in Opcode::Push1 as usize..=Opcode::Push32 as usize {
        table[op] = Some(stack_ops::push);
    }
    for op in Opcode::Dup1 as usize..=Opcode::Dup16 as usize {
        table[op] = Some(stack_ops::dup);
    }
    for op in Opcode::Swap1 as usize..=Opcode::Swap16 as usize {
        table[op] = Some(stack_ops::swap);
    }

    table[Opcode::Create as usize] = Some(system::create);
    table[Opcode::Call as usize] = Some(system::call);
    table[Opcode::Return as usize] = Some(control::ret);
    table[Opcode::Revert as usize] = Some(control::revert);

    // push_size/dup_index/swap_index are the source of truth `opcodes`
    // module exposes to the rest of the crate (jumpdest scanning); assert
    // here that the ranges above agree with them rather than drifting.
    debug_assert!(push_size(Opcode::Push1 as u8) == Some(1));
    debug_assert!(dup_index(Opcode::Dup1 as u8) == Some(1));
    debug_assert!(swap_index(Opcode::Swap1 as u8) == Some(1));

    table
}

static JUMP_TABLE: OnceLock<[Option<OpcodeFn>; 256]> = OnceLock::new();

/// Look up the handler for `op`, or `None` if it is not an implemented opcode.
pub fn lookup(op: u8) -> Option<OpcodeFn> {
    JUMP_TABLE.get_or_init(build_jump_table)[op as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_push_dup_swap_byte_is_wired() {
        for op in 0x60u8..=0x7f {
            assert!(lookup(op).is_some(), "PUSH opcode 0x{op:02x} missing");
        }
        for op in 0x80u8..=0x8f {
            assert!(lookup(op).is_some(), "DUP opcode 0x{op:02x} missing");
        }
        for op in 0x90u8..=0x9f {
            assert!(lookup(op).is_some(), "SWAP opcode 0x{op:02x} missing");
        }
    }

    #[test]
    fn unassigned_byte_is_not_wired() {
        assert!(lookup(0x0c).is_none());
        assert!(lookup(0xfe).is_none());
    }
}
