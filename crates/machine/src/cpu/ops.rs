//! Operation handlers.
//!
//! One method per opcode. Every fallible handler checks its operands before
//! writing anything, so a faulting instruction changes neither registers nor
//! segments.

use std::cmp;

use super::Machine;
use crate::common::constants::{END_OF_INPUT, MAX_OUTPUT_BYTE};
use crate::common::{Fault, Word};
use crate::devices::Console;

impl Machine {
    /// Opcode 0: `if R[c] != 0 { R[a] = R[b] }`.
    #[inline(always)]
    pub(super) fn conditional_move(&mut self, a: usize, b: usize, c: usize) {
        if self.regs.read(c) != 0 {
            self.regs.write(a, self.regs.read(b));
        }
    }

    /// Opcode 1: `R[a] = Segment[R[b]][R[c]]`.
    #[inline(always)]
    pub(super) fn segment_load(&mut self, a: usize, b: usize, c: usize) -> Result<(), Fault> {
        let value = self.segments.load(self.regs.read(b), self.regs.read(c))?;
        self.regs.write(a, value);
        Ok(())
    }

    /// Opcode 2: `Segment[R[a]][R[b]] = R[c]`.
    #[inline(always)]
    pub(super) fn segment_store(&mut self, a: usize, b: usize, c: usize) -> Result<(), Fault> {
        self.segments
            .store(self.regs.read(a), self.regs.read(b), self.regs.read(c))
    }

    /// Opcode 3: `R[a] = R[b] + R[c]` modulo 2^32.
    #[inline(always)]
    pub(super) fn add(&mut self, a: usize, b: usize, c: usize) {
        self.regs
            .write(a, self.regs.read(b).wrapping_add(self.regs.read(c)));
    }

    /// Opcode 4: `R[a] = R[b] * R[c]` modulo 2^32.
    #[inline(always)]
    pub(super) fn multiply(&mut self, a: usize, b: usize, c: usize) {
        self.regs
            .write(a, self.regs.read(b).wrapping_mul(self.regs.read(c)));
    }

    /// Opcode 5: `R[a] = R[b] / R[c]`, unsigned and truncating.
    #[inline(always)]
    pub(super) fn divide(&mut self, a: usize, b: usize, c: usize) -> Result<(), Fault> {
        let quotient = self
            .regs
            .read(b)
            .checked_div(self.regs.read(c))
            .ok_or(Fault::DivideByZero)?;
        self.regs.write(a, quotient);
        Ok(())
    }

    /// Opcode 6: `R[a] = !(R[b] & R[c])`.
    #[inline(always)]
    pub(super) fn nand(&mut self, a: usize, b: usize, c: usize) {
        self.regs.write(a, !(self.regs.read(b) & self.regs.read(c)));
    }

    /// Opcode 8: map a zeroed segment of `R[c]` words and put its identifier in `R[b]`.
    pub(super) fn map_segment(&mut self, b: usize, c: usize) -> Result<(), Fault> {
        let reused = self.segments.recycled_count() > 0;
        let id = self.segments.map(self.regs.read(c) as usize)?;
        self.regs.write(b, id);

        self.stats.segments_mapped += 1;
        if reused {
            self.stats.segments_recycled += 1;
        }
        self.stats.peak_active_segments =
            cmp::max(self.stats.peak_active_segments, self.segments.active_count());
        Ok(())
    }

    /// Opcode 9: unmap segment `R[c]`.
    pub(super) fn unmap_segment(&mut self, c: usize) -> Result<(), Fault> {
        self.segments.unmap(self.regs.read(c))?;
        self.stats.segments_unmapped += 1;
        Ok(())
    }

    /// Opcode 10: write the byte `R[c]`.
    pub(super) fn output<C: Console + ?Sized>(
        &mut self,
        console: &mut C,
        c: usize,
    ) -> Result<(), Fault> {
        let value = self.regs.read(c);
        if value > MAX_OUTPUT_BYTE {
            return Err(Fault::OutputRangeError { value });
        }
        console.write_byte(value as u8)?;
        self.stats.bytes_out += 1;
        Ok(())
    }

    /// Opcode 11: read one byte into `R[c]`, or all ones at end of input.
    pub(super) fn input<C: Console + ?Sized>(
        &mut self,
        console: &mut C,
        c: usize,
    ) -> Result<(), Fault> {
        let value = match console.read_byte()? {
            Some(byte) => {
                self.stats.bytes_in += 1;
                Word::from(byte)
            }
            None => {
                self.stats.input_eof += 1;
                END_OF_INPUT
            }
        };
        self.regs.write(c, value);
        Ok(())
    }

    /// Opcode 12: replace segment 0 with a copy of segment `R[b]` (unless
    /// `R[b]` is 0) and jump to `R[c]`.
    pub(super) fn load_program(&mut self, b: usize, c: usize) -> Result<(), Fault> {
        let target = self.regs.read(c);
        if self.segments.load_program(self.regs.read(b))? {
            self.stats.program_loads += 1;
        } else {
            self.stats.program_jumps += 1;
        }
        self.pc = target;
        Ok(())
    }

    /// Opcode 13: `R[a] = value`.
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, a: usize, value: Word) {
        self.regs.write(a, value);
    }
}
