//! Tests for core_kernel error types

use core_kernel::error::CoreError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("Item not found");

    match error {
        CoreError::NotFound(msg) => assert_eq!(msg, "Item not found"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_require_non_blank_accepts_text() {
    assert!(CoreError::require_non_blank("title", "Blue umbrella").is_ok());
}

#[test]
fn test_require_non_blank_rejects_whitespace() {
    let error = CoreError::require_non_blank("title", "   ").unwrap_err();
    assert_eq!(error.to_string(), "Validation error: title is required");
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::Configuration("Missing config".to_string());

    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing config"),
        _ => panic!("Expected Configuration error"),
    }
}
