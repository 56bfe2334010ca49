//! Instruction field extraction.
//!
//! Provides bit extraction for both instruction forms:
//!
//! ```text
//! three-register:  | op:4 | unused:19 | a:3 | b:3 | c:3 |
//! load-immediate:  | op:4 | a:3 | value:25 |
//! ```

use crate::common::constants::{
    IMM_REG_SHIFT, IMM_VALUE_MASK, OPCODE_MASK, OPCODE_SHIFT, RA_SHIFT, RB_SHIFT, RC_SHIFT,
    REG_MASK,
};

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 31-28).
    fn opcode(&self) -> u32;

    /// Extracts register A of the three-register form (bits 8-6).
    fn ra(&self) -> usize;

    /// Extracts register B of the three-register form (bits 5-3).
    fn rb(&self) -> usize;

    /// Extracts register C of the three-register form (bits 2-0).
    fn rc(&self) -> usize;

    /// Extracts the target register of the load-immediate form (bits 27-25).
    fn imm_reg(&self) -> usize;

    /// Extracts the 25-bit value of the load-immediate form (bits 24-0), zero-extended.
    fn imm_value(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn ra(&self) -> usize {
        ((self >> RA_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rb(&self) -> usize {
        ((self >> RB_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rc(&self) -> usize {
        ((self >> RC_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn imm_reg(&self) -> usize {
        ((self >> IMM_REG_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn imm_value(&self) -> u32 {
        self & IMM_VALUE_MASK
    }
}
