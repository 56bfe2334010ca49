//! Common utilities and types used throughout the machine.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Word size, register count, and instruction field layout.
//! 2. **Error Handling:** The fatal `Fault` taxonomy.
//! 3. **Register Management:** The eight-slot register file.

/// Common constants used throughout the machine.
pub mod constants;

/// Fatal error taxonomy.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{NUM_REGISTERS, WORD_BYTES};
pub use error::Fault;
pub use reg::RegisterFile;

/// A machine word. All arithmetic on words wraps modulo 2^32.
pub type Word = u32;

/// Identifier of a segment in the segment store.
pub type SegmentId = u32;
