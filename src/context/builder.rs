//! Builder API for creating validation contexts.

use crate::context::config::{ConfigError, ContextConfig};
use crate::context::ValidationContext;
use crate::core::Validator;
use crate::registry::ValidatorClass;

/// Builder for creating a [`ValidationContext`] with validators pre-registered.
pub struct ValidationContextBuilder {
    config: ContextConfig,
    registrations: Vec<(ValidatorClass, Vec<String>)>,
}

impl ValidationContextBuilder {
    pub fn new() -> Self {
        Self {
            config: ContextConfig::default(),
            registrations: Vec::new(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the override policy
    pub fn allow_override(mut self, allow: bool) -> Self {
        self.config.allow_override = allow;
        self
    }

    /// Set the prefix for synthesized identities
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.id_prefix = prefix.into();
        self
    }

    /// Register a `Default`-constructible validator under `names`
    pub fn register<V: Validator + Default>(self, names: &[&str]) -> Self {
        self.register_class(ValidatorClass::of::<V>(), names)
    }

    /// Register an explicit validator class under `names`
    pub fn register_class(mut self, class: ValidatorClass, names: &[&str]) -> Self {
        let names = names.iter().map(|name| name.to_string()).collect();
        self.registrations.push((class, names));
        self
    }

    /// Build the context, applying registrations in the order they were added
    pub fn build(self) -> Result<ValidationContext, ConfigError> {
        let context = ValidationContext::with_config(self.config)?;
        for (class, names) in self.registrations {
            context.add(class, names.as_slice());
        }
        Ok(context)
    }
}

impl Default for ValidationContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
