//! Runtime error types
//!
//! Only failures that make the run unrepresentable live here. Address
//! faults, halts, and budget exhaustion are [`StopReason`]s, not errors.
//!
//! [`StopReason`]: crate::state::StopReason

use thiserror::Error;
use uflarisc_isa::{Address, Word};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Invalid opcode at PC {pc}: {word:#010x}")]
    InvalidOpcode { pc: Address, word: Word },

    #[error("Instruction {mnemonic} at PC {pc} has no execution semantics")]
    Unimplemented { mnemonic: &'static str, pc: Address },

    #[error("Register index out of range at PC {pc}: {index}")]
    RegisterOutOfRange { index: u8, pc: Address },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
