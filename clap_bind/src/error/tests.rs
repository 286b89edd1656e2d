//! Unit tests for error construction and display.

use super::FlagError;

#[test]
fn parse_errors_name_the_flag() {
    let err = FlagError::parse("db-timeout", "duration", "went wrong");
    let text = err.to_string();
    assert!(text.contains("db-timeout"), "missing flag name: {text}");
    assert!(text.contains("duration"), "missing kind: {text}");
}

#[test]
fn unsupported_errors_name_the_field() {
    let err = FlagError::unsupported("matrix", "nested sequences are not supported");
    let text = err.to_string();
    assert!(text.contains("matrix"), "missing field name: {text}");
    assert!(text.contains("nested sequences"), "missing detail: {text}");
}
