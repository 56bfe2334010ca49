//! Instruction Set Architecture.
//!
//! This module defines the machine's 14 operations and how they are laid out
//! in a 32-bit word. It includes:
//! 1. **Opcodes:** Numeric values and the `Opcode` enum.
//! 2. **Field Extraction:** The `InstructionBits` trait over raw words.
//! 3. **Decoding:** A pure, infallible classifier into `Instruction`.
//! 4. **Encoding:** Word builders for both instruction forms.
//! 5. **Disassembly:** Mnemonic text for tracing and diagnostics.

/// Instruction decoding into tagged variants.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction word builders.
pub mod encode;

/// Instruction field extraction utilities.
pub mod instruction;

/// Opcode values and the `Opcode` enum.
pub mod opcodes;

pub use decode::{Instruction, decode};
pub use opcodes::Opcode;
