//! What an opcode handler hands back to the fetch-decode-dispatch loop.

use alloy::primitives::Bytes;
use primitives::errors::Result;

use crate::Evm;

/// Signature every jump-table entry has. Takes the fetched opcode byte so a
/// single handler can serve a whole PUSH/DUP/SWAP range.
pub type OpcodeFn = fn(&mut Evm, u8) -> Result<Dispatch>;

/// `(success, return)` pair the spec calls the Return envelope.
///
/// `success = None` is the "halted mid-code, undefined success" case the
/// spec's STOP-success-semantics note requires (§9): a STOP that isn't the
/// final byte of code, or falling off the end of code entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnEnvelope {
    pub success: Option<bool>,
    pub return_data: Option<Bytes>,
}

impl ReturnEnvelope {
    pub fn stop(success: Option<bool>) -> Self {
        ReturnEnvelope { success, return_data: None }
    }

    pub fn ret(data: Bytes) -> Self {
        ReturnEnvelope { success: Some(true), return_data: Some(data) }
    }

    pub fn revert(data: Bytes) -> Self {
        ReturnEnvelope { success: Some(false), return_data: Some(data) }
    }
}

/// What an opcode handler tells the loop to do with `pc` next.
pub enum Dispatch {
    /// Advance `pc` by 1 (the common case).
    Continue,
    /// Advance `pc` by `1 + n` (PUSHn consuming `n` immediate bytes).
    ContinueBy(usize),
    /// Set `pc` to this absolute offset (JUMP/JUMPI); no further increment.
    Jump(usize),
    /// Stop the loop and hand back this envelope.
    Halt(ReturnEnvelope),
}

/// The engine's full output: the final stack (top-first) plus the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub stack: Vec<alloy::primitives::U256>,
    pub envelope: ReturnEnvelope,
}
