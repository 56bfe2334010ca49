//! Common component tests.

/// Fault display and conversion.
pub mod error;
