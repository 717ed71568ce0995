//! Tests for logging initialization

use protoflow::core::logging::{init_logging, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_variants() {
    for name in LogFormat::variants() {
        assert!(LogFormat::from_str(name).is_ok());
    }
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_init_logging_is_idempotent_enough() {
    // The second call fails because a global subscriber is already set;
    // neither call may panic.
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("off"), Some("json"));
}

#[test]
fn test_operations_log_without_panicking() {
    let _ = init_logging(Some("trace"), Some("pretty"));
    let mut diagram = protoflow::diagram::Diagram::default_protocol();
    diagram.add_node("", "ignored");
    diagram.add_edge("Q", "missing", "");
    let _ = protoflow::diagram::import(b"[]");
}
