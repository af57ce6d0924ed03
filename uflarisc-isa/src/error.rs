//! # Error Types for the ISA Definition

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IsaError {
    #[error("Unknown opcode: {code:#04x}")]
    UnknownOpcode { code: u8 },

    #[error("Unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    #[error("Malformed instruction word (expected 32 binary digits): {0:?}")]
    MalformedWord(String),
}

pub type Result<T> = std::result::Result<T, IsaError>;
