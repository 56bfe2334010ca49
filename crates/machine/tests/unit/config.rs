//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, and file loading.

use std::io::Write;

use tempfile::NamedTempFile;
use umvm_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_steps, None);
    assert_eq!(config.machine.unknown_opcode, UnknownOpcodePolicy::Fail);
    assert_eq!(config.machine.initial_segment_capacity, 64);
    assert!(!config.loader.allow_trailing_bytes);
}

#[test]
fn test_empty_json_matches_default() {
    let config = Config::from_json("{}").unwrap();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_steps, None);
    assert_eq!(config.machine.unknown_opcode, UnknownOpcodePolicy::Fail);
    assert_eq!(config.machine.initial_segment_capacity, 64);
    assert!(!config.loader.allow_trailing_bytes);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "machine": { "unknown_opcode": "halt" } }"#).unwrap();
    assert_eq!(config.machine.unknown_opcode, UnknownOpcodePolicy::Halt);
    assert_eq!(config.machine.initial_segment_capacity, 64);
}

#[test]
fn test_full_json() {
    let json = r#"{
        "general": { "trace_instructions": true, "max_steps": 1000 },
        "machine": { "unknown_opcode": "fail", "initial_segment_capacity": 4 },
        "loader": { "allow_trailing_bytes": true }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.max_steps, Some(1000));
    assert_eq!(config.machine.unknown_opcode, UnknownOpcodePolicy::Fail);
    assert_eq!(config.machine.initial_segment_capacity, 4);
    assert!(config.loader.allow_trailing_bytes);
}

#[test]
fn test_invalid_policy_is_rejected() {
    let err = Config::from_json(r#"{ "machine": { "unknown_opcode": "ignore" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_malformed_json_is_rejected() {
    let err = Config::from_json("{ general: ").unwrap_err();
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "general": { "max_steps": 7 } }"#)
        .unwrap();
    file.flush().unwrap();

    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.general.max_steps, Some(7));
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match Config::from_json_file(&path) {
        Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {other:?}"),
    }
}
