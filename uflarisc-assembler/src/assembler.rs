//! Main assembler logic

use crate::encoder::encode_instruction;
use crate::error::Result;
use crate::parser::{parse, Statement};
use uflarisc_isa::encoding::to_binary_text;

/// Assemble source text into binary program text.
///
/// One output line per meaningful input line, in source order: a
/// 32-character binary literal per instruction, `address` directives passed
/// through for the loader.
pub fn assemble(source: &str) -> Result<String> {
    let lines = parse(source)?;
    let mut output = String::new();

    for line in &lines {
        match &line.statement {
            Statement::Address(target) => {
                output.push_str(&format!("address {target}\n"));
            }
            Statement::Instruction { opcode, operands } => {
                let word = encode_instruction(*opcode, operands, line.number)?;
                output.push_str(&to_binary_text(word));
                output.push('\n');
            }
        }
    }

    Ok(output)
}
