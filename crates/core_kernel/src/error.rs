//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    /// Returns a validation error when `value` is empty after trimming
    pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }
}
