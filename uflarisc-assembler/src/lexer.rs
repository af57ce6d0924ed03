//! # Lexer for UFLA-RISC Assembly
//!
//! Line-oriented: the parser feeds one source line at a time, so comments
//! run to end of input and no newline token is needed.

use logos::Logos;
use uflarisc_isa::Register;

/// Tokens for UFLA-RISC assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip whitespace
#[logos(skip r"#[^\n]*")] // Skip comments
pub enum Token {
    /// Instruction mnemonic or directive keyword
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Register (r0-r31, case-insensitive prefix)
    #[regex(r"[rR]([0-9]|[12][0-9]|3[01])", |lex| lex.slice().parse().ok(), priority = 10)]
    Register(Register),

    /// Non-negative decimal number
    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok())]
    Number(u32),

    /// Operand separator
    #[token(",")]
    Comma,
}
