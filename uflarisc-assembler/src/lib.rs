//! # UFLA-RISC Assembler
//!
//! Translate mnemonic source text into the fixed 32-bit binary encoding,
//! emitted as newline-delimited binary program text.
//!
//! ## Example
//!
//! ```rust
//! use uflarisc_assembler::assemble;
//!
//! let source = r#"
//!     lcl r1, 5     # low half of r1 = 5
//!     halt
//! "#;
//!
//! let binary = assemble(source).unwrap();
//! assert_eq!(binary.lines().count(), 2);
//! ```

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;

pub use assembler::assemble;
pub use encoder::encode_instruction;
pub use error::{AssemblerError, Result};
pub use parser::{parse, Line, Operand, Statement};
