//! The interpreter: a program counter, five mutable state components, and a
//! fetch-decode-dispatch loop over a 256-entry opcode table.

pub mod dispatch;
pub mod jump_tables;
pub mod opcodes;
pub mod operations;

use alloy::primitives::Bytes;
use log::{debug, trace};

use primitives::calldata::Calldata;
use primitives::context::{BlockEnv, Transaction};
use primitives::errors::{EvmError, Result};
use primitives::memory::Memory;
use primitives::stack::Stack;
use primitives::world::WorldState;

pub use dispatch::{Dispatch, ExecutionOutcome, ReturnEnvelope};

/// Maximum recursion depth for nested CALL/CREATE sub-invocations (spec §5).
pub const MAX_CALL_DEPTH: usize = 1024;

/// One interpreter invocation: the code being run plus its five mutable
/// state components (pc, stack, memory, storage — reached through `world` —
/// and the return buffer assembled at halt).
pub struct Evm {
    pub code: Bytes,
    pub pc: usize,
    pub stack: Stack,
    pub memory: Memory,
    pub calldata: Calldata,
    pub tx: Transaction,
    pub block: BlockEnv,
    pub world: WorldState,
    pub last_return_data: Bytes,
    pub depth: usize,
    jumpdests: Vec<bool>,
}

impl Evm {
    pub fn new(code: Bytes, tx: Transaction, block: BlockEnv, world: WorldState, depth: usize) -> Self {
        let jumpdests = compute_jumpdests(&code);
        let calldata = Calldata::new(tx.data.to_vec());
        Evm {
            code,
            pc: 0,
            stack: Stack::new(),
            memory: Memory::new(),
            calldata,
            tx,
            block,
            world,
            last_return_data: Bytes::new(),
            depth,
            jumpdests,
        }
    }

    /// A fresh top-level invocation at depth 0.
    pub fn top_level(code: Bytes, tx: Transaction, block: BlockEnv, world: WorldState) -> Self {
        Evm::new(code, tx, block, world, 0)
    }

    pub fn is_valid_jumpdest(&self, dest: usize) -> bool {
        self.jumpdests.get(dest).copied().unwrap_or(false)
    }

    /// Run to termination: STOP/RETURN/REVERT, falling off the end of code,
    /// or an execution error.
    pub fn run(&mut self) -> Result<ExecutionOutcome> {
        if self.depth > MAX_CALL_DEPTH {
            return Err(EvmError::CallDepthExceeded);
        }

        loop {
            if self.pc >= self.code.len() {
                debug!("fell off the end of code at depth {}", self.depth);
                return Ok(ExecutionOutcome {
                    stack: self.stack.top_first(),
                    envelope: ReturnEnvelope::stop(None),
                });
            }

            let op = self.code[self.pc];
            trace!("depth={} pc={} op=0x{:02x}", self.depth, self.pc, op);

            let handler = jump_tables::lookup(op).ok_or(EvmError::InvalidOpcode(op))?;
            match handler(self, op)? {
                Dispatch::Continue => self.pc += 1,
                Dispatch::ContinueBy(n) => self.pc += 1 + n,
                Dispatch::Jump(dest) => self.pc = dest,
                Dispatch::Halt(envelope) => {
                    debug!("halted at depth {} pc={} success={:?}", self.depth, self.pc, envelope.success);
                    return Ok(ExecutionOutcome { stack: self.stack.top_first(), envelope });
                }
            }
        }
    }
}

/// Scan `code` once, marking every `0x5b` byte that is not inside a PUSHn's
/// immediate-data run as a valid JUMP/JUMPI target.
fn compute_jumpdests(code: &[u8]) -> Vec<bool> {
    let mut marks = vec![false; code.len()];
    let mut i = 0;
    while i < code.len() {
        let op = code[i];
        if let Some(n) = opcodes::push_size(op) {
            i += 1 + n;
        } else {
            if opcodes::is_jumpdest(op) {
                marks[i] = true;
            }
            i += 1;
        }
    }
    marks
}
