//! Instruction Decoder.
//!
//! Classifies a 32-bit word into an `Instruction`. Decoding is pure and never
//! fails: opcodes 14 and 15 decode to `Instruction::Unknown`, and the engine
//! decides what that means. Bits between the opcode and the register fields
//! of the three-register form are ignored.

use crate::common::Word;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{OP_LV, Opcode};

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Opcodes 0-12: three register selectors.
    ThreeRegister {
        /// Operation; never `Opcode::LoadImmediate`.
        op: Opcode,
        /// Register A index (0-7).
        a: usize,
        /// Register B index (0-7).
        b: usize,
        /// Register C index (0-7).
        c: usize,
    },
    /// Opcode 13: a register and a 25-bit literal.
    LoadImmediate {
        /// Target register index (0-7).
        a: usize,
        /// Zero-extended immediate (0 to 2^25 - 1).
        value: Word,
    },
    /// Opcodes 14 and 15.
    Unknown {
        /// The raw four-bit opcode.
        raw_opcode: u32,
    },
}

/// Decodes one instruction word.
///
/// # Arguments
///
/// * `word` - The raw 32-bit instruction.
///
/// # Returns
///
/// The tagged instruction with its operand fields.
#[inline]
pub fn decode(word: Word) -> Instruction {
    let raw = word.opcode();
    if raw == OP_LV {
        return Instruction::LoadImmediate {
            a: word.imm_reg(),
            value: word.imm_value(),
        };
    }
    match Opcode::from_bits(raw) {
        Some(op) => Instruction::ThreeRegister {
            op,
            a: word.ra(),
            b: word.rb(),
            c: word.rc(),
        },
        None => Instruction::Unknown { raw_opcode: raw },
    }
}

impl Instruction {
    /// The operation this instruction performs, if any.
    pub const fn opcode(&self) -> Option<Opcode> {
        match self {
            Self::ThreeRegister { op, .. } => Some(*op),
            Self::LoadImmediate { .. } => Some(Opcode::LoadImmediate),
            Self::Unknown { .. } => None,
        }
    }
}
