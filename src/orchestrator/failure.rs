//! Normalized per-rule failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a rule counted as failed.
///
/// Every shape a validator can fail in (a `false` answer, a returned error,
/// a panic) ends up here, so callers only ever see a list of failures.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleFailure {
    #[error("Rule '{rule}' rejected the value")]
    Invalid { rule: String },

    #[error("Rule '{rule}' failed with error: {message}")]
    Errored { rule: String, message: String },

    #[error("Rule '{rule}' panicked: {message}")]
    Panicked { rule: String, message: String },
}

impl RuleFailure {
    pub fn rule(&self) -> &str {
        match self {
            Self::Invalid { rule } | Self::Errored { rule, .. } | Self::Panicked { rule, .. } => {
                rule
            }
        }
    }

    /// Whether the rule ran to completion and answered `false`.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}
