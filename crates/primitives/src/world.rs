//! World state: the address -> account mapping shared across a call tree.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use alloy::primitives::{Address, Bytes, U256};

use crate::storage::ContractStorage;

/// `(balance, code, nonce, storage)` tuple the spec calls an Account record.
#[derive(Debug, Clone, Default)]
pub struct Account {
    pub balance: U256,
    pub code: Bytes,
    pub nonce: U256,
    pub storage: ContractStorage,
}

impl Account {
    pub fn new(balance: U256, code: Bytes, nonce: U256) -> Self {
        Account { balance, code, nonce, storage: ContractStorage::new() }
    }
}

/// Mapping from 20-byte address to [`Account`], shared by reference across a
/// top-level invocation and every CALL/CREATE sub-invocation it spawns (the
/// resolution of spec §5's Open Question: sub-call mutations are visible to
/// later sibling calls within one top-level invocation, never written back
/// past it).
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    accounts: Rc<RefCell<HashMap<Address, Account>>>,
}

impl WorldState {
    pub fn new() -> Self {
        WorldState { accounts: Rc::new(RefCell::new(HashMap::new())) }
    }

    pub fn init(accounts: HashMap<Address, Account>) -> Self {
        WorldState { accounts: Rc::new(RefCell::new(accounts)) }
    }

    /// Returns the account's record, or the zero-default if the address is unknown.
    pub fn account(&self, address: Address) -> Account {
        self.accounts.borrow().get(&address).cloned().unwrap_or_default()
    }

    pub fn create(&self, address: Address, record: Account) {
        self.accounts.borrow_mut().insert(address, record);
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.account(address).balance
    }

    pub fn code(&self, address: Address) -> Bytes {
        self.account(address).code
    }

    pub fn sload(&self, address: Address, key: U256) -> U256 {
        self.accounts
            .borrow()
            .get(&address)
            .map(|account| account.storage.load(key))
            .unwrap_or(U256::ZERO)
    }

    pub fn sstore(&self, address: Address, key: U256, value: U256) {
        self.accounts
            .borrow_mut()
            .entry(address)
            .or_default()
            .storage
            .store(key, value);
    }

    /// A handle to the same underlying map, for sub-invocations.
    pub fn share(&self) -> Self {
        WorldState { accounts: Rc::clone(&self.accounts) }
    }
}
