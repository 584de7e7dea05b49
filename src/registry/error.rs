//! Registration errors.

use thiserror::Error;

/// Errors that reject a whole `add` call before any name is bound.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    #[error("No usable names supplied for validator '{class}'")]
    NoUsableNames { class: String },
}
