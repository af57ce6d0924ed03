//! Instruction encoder: operand-class validation and bit-field placement.
//!
//! Arity is checked against the opcode's operand class, and every literal is
//! range-checked against its field width before placement. Out-of-range
//! values are rejected here rather than silently truncated into the field.

use crate::error::{AssemblerError, Result};
use crate::parser::Operand;
use uflarisc_isa::encoding::{
    self, HALT_WORD, IMM16_MASK, TARGET24_MASK,
};
use uflarisc_isa::{Opcode, OperandClass, Register, Word};

/// Encode one instruction into its 32-bit word
pub fn encode_instruction(opcode: Opcode, operands: &[Operand], line: usize) -> Result<Word> {
    let Some(class) = opcode.operand_class() else {
        return Err(AssemblerError::NotEncodable {
            line,
            mnemonic: opcode.mnemonic().to_string(),
        });
    };

    let expected = arity(class);
    if operands.len() != expected {
        return Err(AssemblerError::InvalidOperandCount {
            line,
            mnemonic: opcode.mnemonic().to_string(),
            expected,
            found: operands.len(),
        });
    }

    let word = match class {
        OperandClass::ThreeReg => {
            let rc = expect_register(&operands[0], line)?;
            let ra = expect_register(&operands[1], line)?;
            let rb = expect_register(&operands[2], line)?;
            encoding::encode_three_reg(opcode, rc.field(), ra.field(), rb.field())
        }
        OperandClass::DestReg => {
            let rc = expect_register(&operands[0], line)?;
            encoding::encode_dest_reg(opcode, rc.field())
        }
        OperandClass::SrcReg | OperandClass::JumpReg => {
            let ra = expect_register(&operands[0], line)?;
            encoding::encode_src_reg(opcode, ra.field())
        }
        OperandClass::PopReg => {
            let rc = expect_register(&operands[0], line)?;
            encoding::encode_pop(rc.field())
        }
        OperandClass::NoOperands => encoding::encode_bare(opcode),
        OperandClass::Target24 => {
            let target = expect_literal(&operands[0], line)?;
            check_width(target, TARGET24_MASK, 24, line)?;
            encoding::encode_target24(opcode, target)
        }
        OperandClass::RegRegTarget => {
            let ra = expect_register(&operands[0], line)?;
            let rb = expect_register(&operands[1], line)?;
            let target = expect_literal(&operands[2], line)?;
            check_width(target, 0xFF, 8, line)?;
            encoding::encode_branch(opcode, ra.field(), rb.field(), target as u8)
        }
        OperandClass::DestSrc | OperandClass::LoadRegs => {
            // rc first in the syntax, into field3; ra second, into field1
            let rc = expect_register(&operands[0], line)?;
            let ra = expect_register(&operands[1], line)?;
            encoding::encode_reg_pair(opcode, ra.field(), rc.field())
        }
        OperandClass::StoreRegs => {
            // store ra, rb: value register first, address register into field3
            let ra = expect_register(&operands[0], line)?;
            let rb = expect_register(&operands[1], line)?;
            encoding::encode_reg_pair(opcode, ra.field(), rb.field())
        }
        OperandClass::DestImm16 => {
            let rc = expect_register(&operands[0], line)?;
            let imm = expect_literal(&operands[1], line)?;
            check_width(imm, IMM16_MASK, 16, line)?;
            encoding::encode_imm16(opcode, rc.field(), imm)
        }
        OperandClass::AllOnes => HALT_WORD,
    };

    Ok(word)
}

/// Operand count demanded by each class
const fn arity(class: OperandClass) -> usize {
    match class {
        OperandClass::NoOperands | OperandClass::AllOnes => 0,
        OperandClass::DestReg
        | OperandClass::SrcReg
        | OperandClass::PopReg
        | OperandClass::JumpReg
        | OperandClass::Target24 => 1,
        OperandClass::DestSrc
        | OperandClass::LoadRegs
        | OperandClass::StoreRegs
        | OperandClass::DestImm16 => 2,
        OperandClass::ThreeReg | OperandClass::RegRegTarget => 3,
    }
}

fn expect_register(operand: &Operand, line: usize) -> Result<Register> {
    match operand {
        Operand::Register(register) => Ok(*register),
        // a bare index is accepted where a register is expected
        Operand::Number(value) => {
            Register::from_index(*value as usize).ok_or(AssemblerError::InvalidRegister {
                line,
                register: value.to_string(),
            })
        }
    }
}

fn expect_literal(operand: &Operand, line: usize) -> Result<u32> {
    match operand {
        Operand::Number(value) => Ok(*value),
        Operand::Register(register) => Err(AssemblerError::SyntaxError {
            line,
            message: format!("expected an address or immediate literal, found {register}"),
        }),
    }
}

fn check_width(value: u32, mask: u32, bits: u32, line: usize) -> Result<()> {
    if value & !mask != 0 {
        return Err(AssemblerError::ValueOutOfRange { line, value, bits });
    }
    Ok(())
}
