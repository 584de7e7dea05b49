//! Requirement parse errors.

use thiserror::Error;

/// Errors raised when a raw requirement value does not fit its declared type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid integer requirement '{value}'")]
    InvalidInteger { value: String },

    #[error("Invalid regular expression '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("Invalid range '{value}', expected two comma-separated numbers")]
    InvalidRange { value: String },

    #[error("Unsupported requirement type '{tag}'")]
    UnsupportedType { tag: String },
}
