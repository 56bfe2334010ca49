//! Byte-stream devices.
//!
//! The Input and Output instructions talk to a `Console`. The process uses
//! `StreamConsole::stdio`; tests and embedders use `BufferConsole`.

/// Console trait and implementations.
pub mod console;

pub use console::{BufferConsole, Console, StreamConsole};
