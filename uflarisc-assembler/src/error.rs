//! Assembler errors
//!
//! Every variant carries the offending 1-based source line; compilation
//! aborts on the first error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}: {message}")]
    SyntaxError { line: usize, message: String },

    #[error("Unknown mnemonic at line {line}: {mnemonic}")]
    UnknownMnemonic { line: usize, mnemonic: String },

    #[error("Wrong operand count for {mnemonic} at line {line}: expected {expected}, found {found}")]
    InvalidOperandCount {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid address directive at line {line}: {text}")]
    InvalidAddressDirective { line: usize, text: String },

    #[error("Invalid register at line {line}: {register}")]
    InvalidRegister { line: usize, register: String },

    #[error("Value out of range at line {line}: {value} does not fit in {bits} bits")]
    ValueOutOfRange { line: usize, value: u32, bits: u32 },

    #[error("No assembly form for {mnemonic} at line {line}")]
    NotEncodable { line: usize, mnemonic: String },
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
