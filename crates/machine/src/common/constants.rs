//! Machine-wide constants.
//!
//! Instruction field positions are given as shift amounts from the least
//! significant bit, with masks applied after shifting.

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 8;

/// Size of one serialized instruction word in bytes.
pub const WORD_BYTES: usize = 4;

/// Shift of the opcode field (bits 31-28).
pub const OPCODE_SHIFT: u32 = 28;

/// Mask of the opcode field after shifting.
pub const OPCODE_MASK: u32 = 0xF;

/// Mask of a three-bit register selector after shifting.
pub const REG_MASK: u32 = 0x7;

/// Shift of register A in the three-register form (bits 8-6).
pub const RA_SHIFT: u32 = 6;

/// Shift of register B in the three-register form (bits 5-3).
pub const RB_SHIFT: u32 = 3;

/// Shift of register C in the three-register form (bits 2-0).
pub const RC_SHIFT: u32 = 0;

/// Shift of the target register in the load-immediate form (bits 27-25).
pub const IMM_REG_SHIFT: u32 = 25;

/// Mask of the 25-bit load-immediate value (bits 24-0).
pub const IMM_VALUE_MASK: u32 = 0x01FF_FFFF;

/// Value written by Input when the input stream is exhausted.
pub const END_OF_INPUT: u32 = 0xFFFF_FFFF;

/// Largest value Output accepts.
pub const MAX_OUTPUT_BYTE: u32 = 0xFF;

/// Identifier of the executing program segment.
pub const PROGRAM_SEGMENT: u32 = 0;
