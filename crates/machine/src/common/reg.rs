//! Register File.
//!
//! This module provides the `RegisterFile` struct holding the machine's eight
//! general-purpose registers. It provides:
//! 1. **Storage:** Eight 32-bit slots, all zero at start.
//! 2. **Access:** Indexed read and write.
//! 3. **Observability:** A snapshot and a formatted dump for diagnostics.

use std::fmt::{self, Write};

use super::Word;
use super::constants::NUM_REGISTERS;

/// The machine's general-purpose registers.
///
/// Indices always come from three-bit instruction fields, so an index outside
/// 0-7 is a programming error rather than a machine fault.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [Word; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the register.
    #[inline(always)]
    pub fn read(&self, idx: usize) -> Word {
        debug_assert!(idx < NUM_REGISTERS, "register index {idx} out of range");
        self.regs[idx]
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7).
    /// * `val` - The 32-bit value to store.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, val: Word) {
        debug_assert!(idx < NUM_REGISTERS, "register index {idx} out of range");
        self.regs[idx] = val;
    }

    /// Returns a copy of all eight registers.
    pub const fn snapshot(&self) -> [Word; NUM_REGISTERS] {
        self.regs
    }

    /// Formats the register contents, two per line, in hexadecimal.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dump(&mut out);
        out
    }

    fn write_dump(&self, out: &mut impl Write) -> fmt::Result {
        for i in (0..NUM_REGISTERS).step_by(2) {
            writeln!(
                out,
                "r{}={:#010x} r{}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            )?;
        }
        Ok(())
    }
}
