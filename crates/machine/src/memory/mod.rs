//! Segment memory.
//!
//! The machine's only addressable storage is a set of independently sized
//! word segments named by 32-bit identifiers. Segment 0 always holds the
//! executing program.

/// Segment arena with identifier recycling.
pub mod segments;

pub use segments::SegmentStore;
