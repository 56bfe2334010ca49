//! Instruction word builders.
//!
//! The inverse of the decoder. Register indices are masked to three bits and
//! immediates to 25 bits, so every output decodes back to the masked operands.

use crate::common::Word;
use crate::common::constants::{
    IMM_REG_SHIFT, IMM_VALUE_MASK, OPCODE_SHIFT, RA_SHIFT, RB_SHIFT, RC_SHIFT, REG_MASK,
};
use crate::isa::opcodes::{OP_LV, Opcode};

/// Encodes a three-register instruction.
///
/// `Opcode::LoadImmediate` has no three-register form; use
/// [`load_immediate`]. Passing it trips a debug assertion, and release
/// builds encode `lv a, 0`.
#[inline]
pub const fn three_register(op: Opcode, a: usize, b: usize, c: usize) -> Word {
    debug_assert!(
        !matches!(op, Opcode::LoadImmediate),
        "load immediate has no three-register encoding"
    );
    if matches!(op, Opcode::LoadImmediate) {
        return load_immediate(a, 0);
    }
    (op.bits() << OPCODE_SHIFT)
        | ((a as u32 & REG_MASK) << RA_SHIFT)
        | ((b as u32 & REG_MASK) << RB_SHIFT)
        | ((c as u32 & REG_MASK) << RC_SHIFT)
}

/// Encodes a load-immediate instruction; `value` is truncated to 25 bits.
#[inline]
pub const fn load_immediate(a: usize, value: Word) -> Word {
    (OP_LV << OPCODE_SHIFT) | ((a as u32 & REG_MASK) << IMM_REG_SHIFT) | (value & IMM_VALUE_MASK)
}

/// Encodes a word with opcode 14 or 15 (or any raw opcode) and zero operands.
#[inline]
pub const fn raw_opcode(opcode: u32) -> Word {
    (opcode & 0xF) << OPCODE_SHIFT
}
