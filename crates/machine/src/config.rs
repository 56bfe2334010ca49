//! Configuration for the machine.
//!
//! This module defines the structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline values used when a field is omitted.
//! 2. **Structures:** General, machine, and loader sections.
//! 3. **Policies:** What the engine does with opcodes 14 and 15.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or taken from
//! `Config::default()`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants.
mod defaults {
    /// Arena slots reserved up front (segment 0 plus mapped segments).
    pub const INITIAL_SEGMENT_CAPACITY: usize = 64;
}

/// Errors raised while reading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration text is not valid JSON for `Config`.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What the engine does when it decodes opcode 14 or 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownOpcodePolicy {
    /// Stop with `Fault::UnknownOpcode`.
    #[default]
    Fail,
    /// Stop as if the instruction were Halt.
    Halt,
}

/// Root configuration.
///
/// # Example
///
/// ```
/// use umvm_core::config::{Config, UnknownOpcodePolicy};
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "machine": { "unknown_opcode": "halt" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.machine.unknown_opcode, UnknownOpcodePolicy::Halt);
/// assert!(!config.loader.allow_trailing_bytes);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Engine behaviour
    #[serde(default)]
    pub machine: MachineConfig,
    /// Program image handling
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` if the text is malformed or has wrongly typed fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Read` if the file cannot be read, `ConfigError::Parse` if it is malformed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General run settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace`-level event with the disassembly of every executed instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop `run` after this many instructions, leaving the machine `Running`
    #[serde(default)]
    pub max_steps: Option<u64>,
}

/// Engine behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineConfig {
    /// Treatment of opcodes 14 and 15
    #[serde(default)]
    pub unknown_opcode: UnknownOpcodePolicy,

    /// Segment identifiers reserved when the machine is built
    #[serde(default = "MachineConfig::default_initial_segment_capacity")]
    pub initial_segment_capacity: usize,
}

impl MachineConfig {
    const fn default_initial_segment_capacity() -> usize {
        defaults::INITIAL_SEGMENT_CAPACITY
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            unknown_opcode: UnknownOpcodePolicy::default(),
            initial_segment_capacity: defaults::INITIAL_SEGMENT_CAPACITY,
        }
    }
}

/// Program image handling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoaderConfig {
    /// Drop a trailing partial word instead of rejecting the image
    #[serde(default)]
    pub allow_trailing_bytes: bool,
}
