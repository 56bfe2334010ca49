//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction word into a human-readable mnemonic string
//! for debug tracing, logging, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use umvm_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x3000_00CA), "add r3, r1, r2");
//! ```

use crate::common::Word;
use crate::isa::decode::{Instruction, decode};
use crate::isa::opcodes::Opcode;

/// Register names r0-r7.
const REG_NAMES: [&str; 8] = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7"];

#[inline]
fn reg(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("r?")
}

/// Disassembles a 32-bit instruction into a human-readable string.
///
/// Only the operands an instruction actually reads are shown, so `halt`
/// has none and `out` shows only register C.
pub fn disassemble(word: Word) -> String {
    match decode(word) {
        Instruction::LoadImmediate { a, value } => format!("lv {}, {}", reg(a), value),
        Instruction::Unknown { raw_opcode } => format!("unknown({raw_opcode:#x})"),
        Instruction::ThreeRegister { op, a, b, c } => {
            let m = op.mnemonic();
            match op {
                Opcode::Halt => m.to_string(),
                Opcode::MapSegment | Opcode::LoadProgram => {
                    format!("{m} {}, {}", reg(b), reg(c))
                }
                Opcode::UnmapSegment | Opcode::Output | Opcode::Input => {
                    format!("{m} {}", reg(c))
                }
                _ => format!("{m} {}, {}, {}", reg(a), reg(b), reg(c)),
            }
        }
    }
}
