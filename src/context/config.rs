//! Context configuration.

use crate::discovery::DEFAULT_ID_PREFIX;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a context configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(String),

    #[error("Identity prefix must not be empty")]
    EmptyIdPrefix,
}

/// Tunables for a [`ValidationContext`](super::ValidationContext).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Let a later registration take over an already bound rule name.
    pub allow_override: bool,

    /// Prefix of synthesized identities, followed by a counter.
    pub id_prefix: String,
}

impl ContextConfig {
    /// Load a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validated()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub(crate) fn validated(self) -> Result<Self, ConfigError> {
        if self.id_prefix.is_empty() {
            return Err(ConfigError::EmptyIdPrefix);
        }
        Ok(self)
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            allow_override: true,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}
