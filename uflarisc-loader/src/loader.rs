//! Binary program text parsing and instruction-store population.

use crate::error::{LoaderError, Result};
use uflarisc_isa::encoding::parse_binary_text;
use uflarisc_isa::{Address, Program, INSTR_MEM_WORDS};

/// Parse binary program text into a [`Program`].
///
/// Comment (`#` to end of line) and blank stripping matches the assembler.
/// `address N` directives move the write cursor (operand optional, default
/// 0); every other line must be a 32-character binary literal, stored at the
/// cursor, which then advances by one. The cursor starts at 0, so binary
/// lines preceding any directive land at address 0. The start address is the
/// first directive seen, or 0 when the text declares none.
pub fn load(text: &str) -> Result<Program> {
    let mut words = vec![0; INSTR_MEM_WORDS];
    let mut origins: Vec<Address> = Vec::new();
    let mut cursor: Address = 0;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        if parts.next() == Some("address") {
            // operand is optional here, unlike in assembly source
            cursor = match parts.next() {
                Some(operand) => {
                    operand
                        .parse::<Address>()
                        .map_err(|_| LoaderError::InvalidAddressDirective {
                            line: number,
                            text: line.to_string(),
                        })?
                }
                None => 0,
            };
            origins.push(cursor);
            continue;
        }

        let word = parse_binary_text(line).map_err(|_| LoaderError::MalformedWord {
            line: number,
            text: line.to_string(),
        })?;

        let slot =
            words
                .get_mut(cursor as usize)
                .ok_or(LoaderError::AddressOutOfRange {
                    line: number,
                    address: cursor,
                })?;
        *slot = word;
        cursor += 1;
    }

    Ok(Program::from_parts(words, origins))
}
