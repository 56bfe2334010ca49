//! Program loading.
//!
//! Provides utilities for reading program images from disk and packing them
//! into the instruction words that become segment 0.

/// Image reading and big-endian word packing.
pub mod loader;
