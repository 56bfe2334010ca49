//! Execution engine tests.


/// Run loop, status transitions, and fault handling.
pub mod execution;

/// Input and Output against mock and stream consoles.
pub mod io;
