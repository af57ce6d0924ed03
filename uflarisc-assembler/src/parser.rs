//! Assembly parser
//!
//! Line-oriented: comments and blank lines vanish, every remaining line is
//! either an `address` directive or one instruction. Mnemonics are matched
//! case-insensitively against the shared opcode table.

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use logos::Logos;
use uflarisc_isa::{Address, Opcode, Register};

/// A parsed operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Number(u32),
}

/// One meaningful source line
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `address N`: relocate the load cursor; passed through to the output
    Address(Address),
    /// An instruction to bit-encode
    Instruction { opcode: Opcode, operands: Vec<Operand> },
}

/// A statement tagged with its 1-based source line
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub statement: Statement,
}

/// Parse full source text into statements, skipping blanks and comments
pub fn parse(source: &str) -> Result<Vec<Line>> {
    let mut lines = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        let tokens = tokenize(raw, number)?;
        if tokens.is_empty() {
            continue;
        }
        let statement = parse_line(&tokens, raw, number)?;
        lines.push(Line { number, statement });
    }

    Ok(lines)
}

fn tokenize(raw: &str, number: usize) -> Result<Vec<Token>> {
    let mut lexer = Token::lexer(raw);
    let mut tokens = Vec::new();
    while let Some(item) = lexer.next() {
        match item {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(AssemblerError::SyntaxError {
                    line: number,
                    message: format!("unrecognized token {:?}", lexer.slice()),
                })
            }
        }
    }
    Ok(tokens)
}

fn parse_line(tokens: &[Token], raw: &str, number: usize) -> Result<Statement> {
    let Token::Identifier(first) = &tokens[0] else {
        return Err(AssemblerError::SyntaxError {
            line: number,
            message: "expected a mnemonic or directive".to_string(),
        });
    };
    let mnemonic = first.to_lowercase();

    if mnemonic == "address" {
        // the directive requires exactly one non-negative integer literal
        return match &tokens[1..] {
            [Token::Number(target)] => Ok(Statement::Address(*target)),
            _ => Err(AssemblerError::InvalidAddressDirective {
                line: number,
                text: raw.trim().to_string(),
            }),
        };
    }

    let opcode = Opcode::from_mnemonic(&mnemonic).ok_or_else(|| AssemblerError::UnknownMnemonic {
        line: number,
        mnemonic: mnemonic.clone(),
    })?;

    let mut operands = Vec::new();
    for token in &tokens[1..] {
        match token {
            Token::Comma => {}
            Token::Register(register) => operands.push(Operand::Register(*register)),
            Token::Number(value) => operands.push(Operand::Number(*value)),
            Token::Identifier(text) => {
                return Err(AssemblerError::SyntaxError {
                    line: number,
                    message: format!("unexpected identifier {text:?} in operand position"),
                })
            }
        }
    }

    Ok(Statement::Instruction { opcode, operands })
}
