//! Error taxonomy shared by `primitives` and `evm_core`.

use thiserror::Error;

/// Everything that can cause an invocation (or a fixture load) to fail.
///
/// The opcode-execution variants (`StackUnderflow` through `InvalidMemoryLength`)
/// are the taxonomy a running `Evm` can raise. The remaining variants only ever
/// surface at the JSON-fixture boundary the `bins/evm` binary hosts.
#[derive(Debug, Error)]
pub enum EvmError {
    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow: depth would exceed 1024")]
    StackOverflow,

    #[error("invalid value: {0} does not fit in 256 bits")]
    InvalidValue(String),

    #[error("invalid offset: {0} is out of range")]
    InvalidOffset(String),

    #[error("invalid opcode: 0x{0:02x}")]
    InvalidOpcode(u8),

    #[error("invalid memory length: {0} is not a multiple of 32")]
    InvalidMemoryLength(usize),

    #[error("invalid jump destination: 0x{0:x} is not a JUMPDEST")]
    InvalidJump(usize),

    #[error("call depth exceeded maximum of 1024")]
    CallDepthExceeded,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvmError>;
