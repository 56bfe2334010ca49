//! Universal machine emulator library.
//!
//! This crate implements a 32-bit word-oriented virtual machine with the following:
//! 1. **Core:** Eight-register file, program counter, and the fetch/decode/dispatch loop.
//! 2. **Memory:** A segment arena with FIFO identifier recycling and copy-then-swap program loads.
//! 3. **ISA:** Decoding, encoding, and disassembly of the 14-instruction set.
//! 4. **Devices:** Byte-stream consoles feeding the Input and Output instructions.
//! 5. **Simulation:** Program loading, configuration, statistics, and a fixture assembler.

/// Symbolic assembler and named test-vector fixtures.
pub mod asm;
/// Common types and constants (words, registers, faults).
pub mod common;
/// Machine configuration (defaults, policies, JSON loading).
pub mod config;
/// Execution engine and operation handlers.
pub mod cpu;
/// Console devices backing the Input and Output instructions.
pub mod devices;
/// Instruction set (opcodes, field extraction, decode, encode, disassembly).
pub mod isa;
/// Segment store.
pub mod memory;
/// Binary loader.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Fatal machine conditions.
pub use crate::common::Fault;
/// The machine itself; construct with `Machine::new` or `Machine::from_bytes`.
pub use crate::cpu::{Machine, Status};
