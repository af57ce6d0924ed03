//! Data store: 32768 words, address space independent from the
//! instruction store. Every access is bounds-checked; out-of-range is a
//! reported fault at the call site, never a wrap.

use uflarisc_isa::{Address, Word, DATA_MEM_WORDS};

#[derive(Debug, Clone)]
pub struct DataMemory {
    cells: Vec<Word>,
}

impl DataMemory {
    /// Zero-initialized data store
    pub fn new() -> Self {
        Self {
            cells: vec![0; DATA_MEM_WORDS],
        }
    }

    /// Read the cell at `addr`, `None` when out of range
    #[inline]
    pub fn load(&self, addr: Address) -> Option<Word> {
        self.cells.get(addr as usize).copied()
    }

    /// Write the cell at `addr`, `None` when out of range
    #[inline]
    pub fn store(&mut self, addr: Address, value: Word) -> Option<()> {
        self.cells.get_mut(addr as usize).map(|cell| *cell = value)
    }

    /// Every non-zero cell in address order, for run-output dumps
    pub fn iter_non_zero(&self) -> impl Iterator<Item = (Address, Word)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &value)| value != 0)
            .map(|(addr, &value)| (addr as Address, value))
    }
}

impl Default for DataMemory {
    fn default() -> Self {
        Self::new()
    }
}
