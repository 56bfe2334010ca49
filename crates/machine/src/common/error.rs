//! Fatal fault definitions.
//!
//! This module defines every condition that terminates the machine. It provides:
//! 1. **Fault Representation:** One variant per violation, carrying the offending values.
//! 2. **Error Handling:** Integration with standard Rust error traits via `thiserror`.
//!
//! The machine has no recoverable-error channel. A `Fault` surfaces from the
//! instruction that detected it and ends the run.

use std::io;

use thiserror::Error;

use super::{SegmentId, Word};

/// Fatal machine conditions.
///
/// Every variant ends execution. Handlers detect the condition before
/// mutating any state, so a faulting instruction leaves no partial effect.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Fault {
    /// Instruction fetch beyond the end of segment 0.
    ///
    /// Carries the program counter and the length of segment 0 at fetch time.
    #[error("program counter {pc} is outside segment 0 (length {len})")]
    ProgramCounterOutOfRange {
        /// Program counter at the failed fetch.
        pc: Word,
        /// Length of segment 0.
        len: usize,
    },

    /// Division with a zero divisor.
    #[error("division by zero")]
    DivideByZero,

    /// Output of a value that does not fit in a byte.
    #[error("output value {value:#x} exceeds 255")]
    OutputRangeError {
        /// The rejected register value.
        value: Word,
    },

    /// Load, store, unmap, or program load naming an identifier that is not active.
    #[error("segment {id} is not mapped")]
    InvalidSegmentAccess {
        /// The offending segment identifier.
        id: SegmentId,
    },

    /// Load or store past the end of an active segment.
    #[error("offset {offset} is outside segment {id} (length {len})")]
    SegmentOutOfBounds {
        /// The segment that was addressed.
        id: SegmentId,
        /// The offending word offset.
        offset: Word,
        /// Length of the segment.
        len: usize,
    },

    /// Unmap of an identifier that was already released.
    #[error("segment {id} was already unmapped")]
    DoubleUnmap {
        /// The released identifier.
        id: SegmentId,
    },

    /// Every 32-bit segment identifier is in use.
    #[error("segment identifier space exhausted")]
    SegmentSpaceExhausted,

    /// The host could not provide memory for a mapped segment.
    #[error("cannot allocate a segment of {len} words")]
    SegmentAllocationFailed {
        /// Requested length in words.
        len: usize,
    },

    /// Opcode 14 or 15.
    #[error("unknown opcode {opcode} in instruction {word:#010x}")]
    UnknownOpcode {
        /// The raw four-bit opcode.
        opcode: u32,
        /// The full instruction word.
        word: Word,
    },

    /// Program image whose length is not a multiple of four bytes.
    #[error("program image of {len} bytes ends in a partial word")]
    MalformedProgram {
        /// Length of the image in bytes.
        len: usize,
    },

    /// The host input or output stream failed.
    #[error("console I/O failed: {kind}")]
    ConsoleIo {
        /// Kind of the underlying host error.
        kind: io::ErrorKind,
    },
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Self::ConsoleIo { kind: err.kind() }
    }
}
