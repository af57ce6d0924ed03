//! # Instruction Encoding
//!
//! Centralized constants and helpers for the fixed 32-bit UFLA-RISC
//! instruction encoding.
//!
//! ## Instruction Format
//!
//! The textual program form writes each word MSB-first, so "bits 0-7" of the
//! written form are the top byte of the integer word:
//!
//! ```text
//! [opcode:8][field1:8][field2:8][field3:8]
//! [opcode:8][target:24]            j, jal, call
//! [opcode:8][imm16:16][field3:8]   lcl, lch
//! [1 x 32]                         halt
//! ```

use crate::error::{IsaError, Result};
use crate::opcode::Opcode;
use crate::{Address, Word, WORD_BITS};

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: top byte of the word
pub const OPCODE_SHIFT: u32 = 24;

/// Operand field 1: bits 23-16
pub const FIELD1_SHIFT: u32 = 16;

/// Operand field 2: bits 15-8
pub const FIELD2_SHIFT: u32 = 8;

/// Operand field 3: bits 7-0
pub const FIELD3_SHIFT: u32 = 0;

/// 16-bit immediate for lcl/lch: bits 23-8 (fields 1-2 combined)
pub const IMM16_SHIFT: u32 = 8;

// ============================================================================
// Field Masks
// ============================================================================

/// Mask for the opcode and the three operand fields (8 bits each)
pub const FIELD_MASK: u32 = 0xFF;

/// Mask for the 24-bit absolute jump target (fields 1-3 combined)
pub const TARGET24_MASK: u32 = 0x00FF_FFFF;

/// Mask for the 16-bit immediate of lcl/lch
pub const IMM16_MASK: u32 = 0xFFFF;

/// The halt encoding: every bit set, overriding the field convention
pub const HALT_WORD: Word = u32::MAX;

// ============================================================================
// Field Extraction
// ============================================================================

/// Extract the raw opcode value (top byte)
#[inline]
pub const fn extract_opcode(word: Word) -> u8 {
    (word >> OPCODE_SHIFT) as u8
}

/// Extract operand field 1 (bits 23-16)
#[inline]
pub const fn extract_field1(word: Word) -> u8 {
    ((word >> FIELD1_SHIFT) & FIELD_MASK) as u8
}

/// Extract operand field 2 (bits 15-8)
#[inline]
pub const fn extract_field2(word: Word) -> u8 {
    ((word >> FIELD2_SHIFT) & FIELD_MASK) as u8
}

/// Extract operand field 3 (bits 7-0)
#[inline]
pub const fn extract_field3(word: Word) -> u8 {
    (word & FIELD_MASK) as u8
}

/// Extract the 24-bit absolute target of j/jal/call
#[inline]
pub const fn extract_target24(word: Word) -> Address {
    word & TARGET24_MASK
}

/// Extract the 16-bit immediate of lcl/lch
#[inline]
pub const fn extract_imm16(word: Word) -> u32 {
    (word >> IMM16_SHIFT) & IMM16_MASK
}

// ============================================================================
// Instruction Composition
// ============================================================================

#[inline]
const fn opcode_bits(opcode: Opcode) -> u32 {
    (opcode.code() as u32) << OPCODE_SHIFT
}

/// Encode a three-register ALU instruction: `op rc, ra, rb`
#[inline]
pub const fn encode_three_reg(opcode: Opcode, rc: u8, ra: u8, rb: u8) -> Word {
    opcode_bits(opcode)
        | ((ra as u32 & FIELD_MASK) << FIELD1_SHIFT)
        | ((rb as u32 & FIELD_MASK) << FIELD2_SHIFT)
        | ((rc as u32 & FIELD_MASK) << FIELD3_SHIFT)
}

/// Encode a destination-only instruction (inc, dec, zeros): `op rc`
#[inline]
pub const fn encode_dest_reg(opcode: Opcode, rc: u8) -> Word {
    opcode_bits(opcode) | ((rc as u32 & FIELD_MASK) << FIELD3_SHIFT)
}

/// Encode `push ra` / `jr ra`: the source register in field1
#[inline]
pub const fn encode_src_reg(opcode: Opcode, ra: u8) -> Word {
    opcode_bits(opcode) | ((ra as u32 & FIELD_MASK) << FIELD1_SHIFT)
}

/// Encode `pop rc`: the destination register in field2
#[inline]
pub const fn encode_pop(rc: u8) -> Word {
    opcode_bits(Opcode::Pop) | ((rc as u32 & FIELD_MASK) << FIELD2_SHIFT)
}

/// Encode an operand-less instruction (ret)
#[inline]
pub const fn encode_bare(opcode: Opcode) -> Word {
    opcode_bits(opcode)
}

/// Encode a 24-bit absolute-target instruction (call, jal, j)
#[inline]
pub const fn encode_target24(opcode: Opcode, target: Address) -> Word {
    opcode_bits(opcode) | (target & TARGET24_MASK)
}

/// Encode a conditional branch (beq, bne): `op ra, rb, target`
#[inline]
pub const fn encode_branch(opcode: Opcode, ra: u8, rb: u8, target: u8) -> Word {
    opcode_bits(opcode)
        | ((ra as u32 & FIELD_MASK) << FIELD1_SHIFT)
        | ((rb as u32 & FIELD_MASK) << FIELD2_SHIFT)
        | ((target as u32 & FIELD_MASK) << FIELD3_SHIFT)
}

/// Encode a register-pair instruction (passnota, passa, load, store):
/// first field1 operand, then field3 operand, field2 left zero
#[inline]
pub const fn encode_reg_pair(opcode: Opcode, field1: u8, field3: u8) -> Word {
    opcode_bits(opcode)
        | ((field1 as u32 & FIELD_MASK) << FIELD1_SHIFT)
        | ((field3 as u32 & FIELD_MASK) << FIELD3_SHIFT)
}

/// Encode a 16-bit-immediate instruction (lcl, lch): `op rc, imm`
#[inline]
pub const fn encode_imm16(opcode: Opcode, rc: u8, imm: u32) -> Word {
    opcode_bits(opcode)
        | ((imm & IMM16_MASK) << IMM16_SHIFT)
        | ((rc as u32 & FIELD_MASK) << FIELD3_SHIFT)
}

// ============================================================================
// Decoding
// ============================================================================

/// A decoded instruction word: resolved opcode, the three operand fields,
/// and the control-flow target where the opcode carries one in-word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Resolved table entry
    pub opcode: Opcode,
    /// Bits 23-16
    pub field1: u8,
    /// Bits 15-8
    pub field2: u8,
    /// Bits 7-0
    pub field3: u8,
    /// j/jal: the 24-bit absolute target; beq/bne: field3 widened.
    /// `None` for every other opcode (jr's target lives in a register).
    pub target: Option<Address>,
}

/// Split a word into opcode and operand fields via the shared table.
///
/// Fails with [`IsaError::UnknownOpcode`] when the top byte has no table
/// entry. The all-ones halt word resolves like any other: its opcode field
/// is 0xFF.
pub fn decode(word: Word) -> Result<Decoded> {
    let code = extract_opcode(word);
    let opcode = Opcode::from_code(code).ok_or(IsaError::UnknownOpcode { code })?;

    let field3 = extract_field3(word);
    let target = match opcode {
        Opcode::J | Opcode::Jal => Some(extract_target24(word)),
        Opcode::Beq | Opcode::Bne => Some(field3 as Address),
        _ => None,
    };

    Ok(Decoded {
        opcode,
        field1: extract_field1(word),
        field2: extract_field2(word),
        field3,
        target,
    })
}

// ============================================================================
// Textual Word Form
// ============================================================================

/// Render a word as the 32-character binary literal used in program text
#[inline]
pub fn to_binary_text(word: Word) -> String {
    format!("{word:032b}")
}

/// Parse a 32-character binary literal.
///
/// The line must be exactly 32 characters, all `0` or `1`.
pub fn parse_binary_text(text: &str) -> Result<Word> {
    if text.len() != WORD_BITS || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(IsaError::MalformedWord(text.to_string()));
    }
    Word::from_str_radix(text, 2).map_err(|_| IsaError::MalformedWord(text.to_string()))
}
