//! # UFLA-RISC Instruction Set Definition
//!
//! Single source of truth for the UFLA-RISC instruction set, shared by the
//! assembler and the execution engine so the two can never disagree.
//!
//! ## Key Features
//! - 32-bit instruction words, 8-bit opcode in the top byte
//! - 32 general-purpose 32-bit registers (r31 = stack pointer / link register)
//! - Harvard layout: 32K-word instruction store, 32K-word data store
//! - Line-oriented textual program form: one 32-character binary literal per
//!   instruction, plus `address N` placement directives

pub mod encoding;
pub mod error;
pub mod opcode;
pub mod program;
pub mod register;

pub use encoding::{decode, Decoded, HALT_WORD};
pub use error::IsaError;
pub use opcode::{ExecUnit, Opcode, OperandClass};
pub use program::Program;
pub use register::{Register, NUM_REGISTERS};

/// Instruction store size in words (addresses 0..32767)
pub const INSTR_MEM_WORDS: usize = 32768;

/// Data store size in words, independent from the instruction store
pub const DATA_MEM_WORDS: usize = 32768;

/// Instruction word width in bits
pub const WORD_BITS: usize = 32;

/// Machine word (registers, memory cells, instruction words)
pub type Word = u32;

/// Address into the instruction or data store
pub type Address = u32;
