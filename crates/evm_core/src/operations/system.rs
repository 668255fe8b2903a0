//! SHA3 and the two call-tree-spawning opcodes, CREATE and CALL (spec
//! §4.11-4.13). CREATE/CALL are the only handlers that recurse into a fresh
//! `Evm` instance; everything else in this crate is a flat state mutation.

use alloy::primitives::{keccak256, Address, Bytes, U256};
use alloy_rlp::{Encodable, RlpEncodable};
use log::{debug, trace, warn};
use primitives::context::Transaction;
use primitives::errors::Result;
use primitives::word;
use primitives::world::Account;

use crate::dispatch::Dispatch;
use crate::Evm;

pub fn sha3(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let offset = word::to_usize(evm.stack.pop()?)?;
    let size = word::to_usize(evm.stack.pop()?)?;
    let bytes = evm.memory.read(offset, size)?;
    let digest = keccak256(&bytes);
    evm.stack.push(U256::from_be_bytes(digest.0))?;
    Ok(Dispatch::Continue)
}

/// RLP-encoded `(caller, nonce)` pair CREATE hashes to derive the new
/// contract's address; grounded on the teacher pack's
/// `thesems-evm-rusty::generate_contract_address` and
/// `abbychau-abbyEVM::create_contract_address`.
#[derive(RlpEncodable)]
struct AddressNonce {
    address: Address,
    nonce: U256,
}

fn contract_address(caller: Address, nonce: U256) -> Address {
    let mut buffer = Vec::new();
    AddressNonce { address: caller, nonce }.encode(&mut buffer);
    let digest = keccak256(&buffer);
    Address::from_slice(&digest[12..])
}

/// Run a derived sub-transaction to completion. Per spec §7's propagation
/// policy, an error raised inside the child is swallowed here and reported
/// to the parent as a plain failure, not re-raised.
fn run_sub_context(evm: &Evm, code: Bytes, tx: Transaction) -> (bool, Bytes) {
    let child_depth = evm.depth + 1;
    let mut sub = Evm::new(code, tx, evm.block.clone(), evm.world.share(), child_depth);
    match sub.run() {
        Ok(outcome) => {
            let data = outcome.envelope.return_data.unwrap_or_default();
            let success = outcome.envelope.success.unwrap_or(false);
            debug!("sub-context at depth {} returned success={}", child_depth, success);
            (success, data)
        }
        Err(err) => {
            warn!("sub-context at depth {} failed: {}", child_depth, err);
            (false, Bytes::new())
        }
    }
}

pub fn create(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let value = evm.stack.pop()?;
    let init_offset = word::to_usize(evm.stack.pop()?)?;
    let init_size = word::to_usize(evm.stack.pop()?)?;
    let init_code = evm.memory.read(init_offset, init_size)?;

    let caller = evm.tx.to;
    let caller_nonce = evm.world.account(caller).nonce;
    let new_address = contract_address(caller, caller_nonce);
    trace!("CREATE from {} nonce={} -> {}", caller, caller_nonce, new_address);

    let sub_tx = Transaction {
        to: new_address,
        from: caller,
        origin: evm.tx.origin,
        gasprice: evm.tx.gasprice,
        value,
        data: Bytes::new(),
    };

    let (success, runtime_code) = run_sub_context(evm, Bytes::from(init_code), sub_tx);

    if success {
        debug!("CREATE deployed {} bytes of runtime code at {}", runtime_code.len(), new_address);
        evm.world.create(new_address, Account::new(value, runtime_code, U256::ZERO));
        evm.last_return_data = Bytes::new();
        evm.stack.push(word::from_address(new_address))?;
    } else {
        debug!("CREATE at {} failed, init code reverted", new_address);
        evm.last_return_data = runtime_code;
        evm.stack.push(U256::ZERO)?;
    }
    Ok(Dispatch::Continue)
}

pub fn call(evm: &mut Evm, _op: u8) -> Result<Dispatch> {
    let _gas = evm.stack.pop()?; // accepted and discarded (spec Out-of-scope: gas accounting)
    let address = word::to_address(evm.stack.pop()?);
    let value = evm.stack.pop()?;
    let args_offset = word::to_usize(evm.stack.pop()?)?;
    let args_size = word::to_usize(evm.stack.pop()?)?;
    let ret_offset = word::to_usize(evm.stack.pop()?)?;
    let ret_size = word::to_usize(evm.stack.pop()?)?;

    trace!("CALL {} -> {} value={}", evm.tx.to, address, value);

    let call_data = evm.memory.read(args_offset, args_size)?;
    let sub_tx = Transaction {
        to: address,
        from: evm.tx.to,
        origin: evm.tx.origin,
        gasprice: evm.tx.gasprice,
        value,
        data: Bytes::from(call_data),
    };
    let code = evm.world.code(address);

    let (success, returned) = run_sub_context(evm, code, sub_tx);
    debug!("CALL to {} returned success={} with {} bytes", address, success, returned.len());

    evm.memory.copy_from(ret_offset, returned.as_ref(), 0, ret_size)?;

    evm.last_return_data = returned;
    evm.stack.push(U256::from(success as u64))?;
    Ok(Dispatch::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::context::BlockEnv;
    use primitives::world::WorldState;

    fn evm_with_stack(values: &[U256]) -> Evm {
        let mut evm = Evm::top_level(Bytes::new(), Transaction::default(), BlockEnv::default(), WorldState::new());
        for v in values {
            evm.stack.push(*v).unwrap();
        }
        evm
    }

    #[test]
    fn sha3_hashes_exact_byte_range() {
        let mut evm = evm_with_stack(&[U256::from(4), U256::ZERO]);
        evm.memory.store_word(0, U256::from(1)).unwrap();
        sha3(&mut evm, 0x20).unwrap();
        let expected = keccak256([0u8, 0, 0, 1]);
        assert_eq!(evm.stack.pop().unwrap(), U256::from_be_bytes(expected.0));
    }

    #[test]
    fn create_deploys_runtime_code_and_pushes_new_address() {
        // init code: PUSH1 0x2a; PUSH1 0; MSTORE8; PUSH1 1; PUSH1 0; RETURN
        let init = [0x60, 0x2a, 0x60, 0x00, 0x53, 0x60, 0x01, 0x60, 0x00, 0xf3];
        let mut evm = Evm::top_level(Bytes::new(), Transaction { to: Address::with_last_byte(1), ..Default::default() }, BlockEnv::default(), WorldState::new());
        evm.memory.copy_from(0, &init, 0, init.len()).unwrap();
        evm.stack.push(U256::from(init.len())).unwrap(); // init_size
        evm.stack.push(U256::ZERO).unwrap(); // init_offset
        evm.stack.push(U256::ZERO).unwrap(); // value
        create(&mut evm, 0xf0).unwrap();

        let new_address_word = evm.stack.pop().unwrap();
        assert_ne!(new_address_word, U256::ZERO);
        let new_address = word::to_address(new_address_word);
        assert_eq!(evm.world.code(new_address), Bytes::from(vec![0x2a]));
    }

    #[test]
    fn call_copies_return_data_and_pushes_success() {
        // callee code: PUSH1 0x2a; PUSH1 0; MSTORE8; PUSH1 1; PUSH1 0; RETURN
        let callee = Address::with_last_byte(9);
        let code = Bytes::from(vec![0x60, 0x2a, 0x60, 0x00, 0x53, 0x60, 0x01, 0x60, 0x00, 0xf3]);
        let world = WorldState::new();
        world.create(callee, Account::new(U256::ZERO, code, U256::ZERO));
        let mut evm = Evm::top_level(Bytes::new(), Transaction { to: Address::with_last_byte(1), ..Default::default() }, BlockEnv::default(), world);

        evm.stack.push(U256::from(1)).unwrap(); // ret_size
        evm.stack.push(U256::ZERO).unwrap(); // ret_offset
        evm.stack.push(U256::ZERO).unwrap(); // args_size
        evm.stack.push(U256::ZERO).unwrap(); // args_offset
        evm.stack.push(U256::ZERO).unwrap(); // value
        evm.stack.push(word::from_address(callee)).unwrap(); // address
        evm.stack.push(U256::from(100_000)).unwrap(); // gas, discarded

        call(&mut evm, 0xf1).unwrap();

        assert_eq!(evm.stack.pop().unwrap(), U256::from(1));
        assert_eq!(evm.memory.load_byte(0), 0x2a);
    }

    #[test]
    fn call_depth_exceeded_reports_failure_not_error() {
        let callee = Address::with_last_byte(9);
        let code = Bytes::from(vec![0x00]); // STOP
        let world = WorldState::new();
        world.create(callee, Account::new(U256::ZERO, code, U256::ZERO));
        let mut evm = Evm::new(
            Bytes::new(),
            Transaction { to: Address::with_last_byte(1), ..Default::default() },
            BlockEnv::default(),
            world,
            crate::MAX_CALL_DEPTH + 1,
        );

        evm.stack.push(U256::ZERO).unwrap(); // ret_size
        evm.stack.push(U256::ZERO).unwrap(); // ret_offset
        evm.stack.push(U256::ZERO).unwrap(); // args_size
        evm.stack.push(U256::ZERO).unwrap(); // args_offset
        evm.stack.push(U256::ZERO).unwrap(); // value
        evm.stack.push(word::from_address(callee)).unwrap(); // address
        evm.stack.push(U256::ZERO).unwrap(); // gas

        call(&mut evm, 0xf1).unwrap();
        assert_eq!(evm.stack.pop().unwrap(), U256::ZERO);
    }
}
