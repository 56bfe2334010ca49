//! Symbolic assembler.
//!
//! Builds instruction streams from named operations and serializes them to
//! the big-endian image format the loader reads. It provides:
//! 1. **Operations:** `Op`, one variant per instruction with its operands.
//! 2. **Assembly:** `Op::encode` and `assemble`.
//! 3. **Serialization:** `write_program` and `to_bytes`.
//! 4. **Fixtures:** Named unit programs with their input and expected output.

/// Named unit-test programs.
pub mod fixtures;

use std::io::{self, Write};

use crate::common::Word;
use crate::isa::encode::{load_immediate, three_register};
use crate::isa::opcodes::Opcode;

/// A register operand, r0-r7.
pub type Reg = usize;

/// r0.
pub const R0: Reg = 0;
/// r1.
pub const R1: Reg = 1;
/// r2.
pub const R2: Reg = 2;
/// r3.
pub const R3: Reg = 3;
/// r4.
pub const R4: Reg = 4;
/// r5.
pub const R5: Reg = 5;
/// r6.
pub const R6: Reg = 6;
/// r7.
pub const R7: Reg = 7;

/// One instruction in symbolic form.
///
/// Operand names follow the instruction format: unused selectors are omitted
/// and encode as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// `if c != 0 { a = b }`.
    CMov(Reg, Reg, Reg),
    /// `a = seg[b][c]`.
    SLoad(Reg, Reg, Reg),
    /// `seg[a][b] = c`.
    SStore(Reg, Reg, Reg),
    /// `a = b + c`.
    Add(Reg, Reg, Reg),
    /// `a = b * c`.
    Mul(Reg, Reg, Reg),
    /// `a = b / c`.
    Div(Reg, Reg, Reg),
    /// `a = !(b & c)`.
    Nand(Reg, Reg, Reg),
    /// Stop.
    Halt,
    /// `b = map(len = c)`.
    Map(Reg, Reg),
    /// `unmap(c)`.
    Unmap(Reg),
    /// `out(c)`.
    Out(Reg),
    /// `c = in()`.
    In(Reg),
    /// `load program b, jump to c`.
    LoadP(Reg, Reg),
    /// `a = value`; the value is truncated to 25 bits.
    Lv(Reg, Word),
}

impl Op {
    /// Encodes this operation as an instruction word.
    pub const fn encode(self) -> Word {
        match self {
            Self::CMov(a, b, c) => three_register(Opcode::ConditionalMove, a, b, c),
            Self::SLoad(a, b, c) => three_register(Opcode::SegmentLoad, a, b, c),
            Self::SStore(a, b, c) => three_register(Opcode::SegmentStore, a, b, c),
            Self::Add(a, b, c) => three_register(Opcode::Add, a, b, c),
            Self::Mul(a, b, c) => three_register(Opcode::Multiply, a, b, c),
            Self::Div(a, b, c) => three_register(Opcode::Divide, a, b, c),
            Self::Nand(a, b, c) => three_register(Opcode::Nand, a, b, c),
            Self::Halt => three_register(Opcode::Halt, 0, 0, 0),
            Self::Map(b, c) => three_register(Opcode::MapSegment, 0, b, c),
            Self::Unmap(c) => three_register(Opcode::UnmapSegment, 0, 0, c),
            Self::Out(c) => three_register(Opcode::Output, 0, 0, c),
            Self::In(c) => three_register(Opcode::Input, 0, 0, c),
            Self::LoadP(b, c) => three_register(Opcode::LoadProgram, 0, b, c),
            Self::Lv(a, value) => load_immediate(a, value),
        }
    }
}

/// Assembles a sequence of operations into instruction words.
pub fn assemble(ops: &[Op]) -> Vec<Word> {
    ops.iter().map(|op| op.encode()).collect()
}

/// Serializes instruction words as big-endian bytes.
pub fn to_bytes(words: &[Word]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

/// Writes instruction words to `out` in the program image format.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_program(out: &mut impl Write, words: &[Word]) -> io::Result<()> {
    for word in words {
        out.write_all(&word.to_be_bytes())?;
    }
    Ok(())
}
