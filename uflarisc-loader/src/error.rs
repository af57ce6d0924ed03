//! Loader errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoaderError {
    #[error("Malformed word at line {line} (expected 32 binary digits): {text:?}")]
    MalformedWord { line: usize, text: String },

    #[error("Invalid address directive at line {line}: {text}")]
    InvalidAddressDirective { line: usize, text: String },

    #[error("Load address out of range at line {line}: {address}")]
    AddressOutOfRange { line: usize, address: u32 },
}

pub type Result<T> = std::result::Result<T, LoaderError>;
