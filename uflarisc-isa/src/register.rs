//! Register file vocabulary: 32 general-purpose 32-bit registers.
//!
//! r31 doubles as the stack pointer / link register by convention (push,
//! pop, call, ret, jal all go through it).

use crate::error::IsaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of general-purpose registers
pub const NUM_REGISTERS: usize = 32;

/// A validated register index (r0-r31)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register(u8);

impl Register {
    /// r31, the stack pointer / link register by convention
    pub const SP: Self = Register(31);

    /// Build from an index, `None` when out of range
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_REGISTERS {
            Some(Register(index as u8))
        } else {
            None
        }
    }

    /// Index into the register file
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Value as placed into an 8-bit operand field
    #[inline]
    pub const fn field(self) -> u8 {
        self.0
    }
}

impl FromStr for Register {
    type Err = IsaError;

    /// Accepts `r5` / `R5`, or a bare index like `5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(['r', 'R']).unwrap_or(s);
        digits
            .parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| IsaError::InvalidRegister(s.to_string()))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
