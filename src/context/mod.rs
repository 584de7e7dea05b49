//! The validation context: one owner for registry, cache and policy.
//!
//! Everything that would otherwise be process-wide state (name bindings,
//! singletons, discovered rules, the identity counter and the override
//! flag) lives in a [`ValidationContext`]. Boot one per application, or one
//! per test for isolation.
//!
//! # Example
//!
//! ```rust
//! use rulebook::context::ValidationContextBuilder;
//! use rulebook::core::{FormControl, Requirement, Validatable, Validator, Verdict};
//!
//! #[derive(Default)]
//! struct Required;
//!
//! impl Validator for Required {
//!     fn validate<'a>(
//!         &'a self,
//!         target: &'a dyn Validatable,
//!         _rule: &'a str,
//!         _requirement: &'a Requirement,
//!     ) -> Verdict<'a> {
//!         (!target.value().is_empty()).into()
//!     }
//! }
//!
//! let context = ValidationContextBuilder::new()
//!     .register::<Required>(&["required"])
//!     .build()
//!     .unwrap();
//!
//! let mut control = FormControl::new("email")
//!     .in_form("signup")
//!     .with_attribute("data-validate", "required");
//!
//! let failures = futures::executor::block_on(context.validate(&mut control));
//! assert_eq!(failures, vec!["required"]);
//! ```

mod builder;
mod config;

pub use builder::ValidationContextBuilder;
pub use config::{ConfigError, ContextConfig};

use crate::core::{Validatable, Validator};
use crate::discovery::{IdentityCounter, RuleCache, ValidatorInfo};
use crate::orchestrator::{self, ValidationReport};
use crate::registry::{Registration, RegistrationError, Registry, ValidatorClass};
use std::sync::Arc;
use tracing::debug;

/// Registry, discovery cache and policy for one application.
#[derive(Debug)]
pub struct ValidationContext {
    config: ContextConfig,
    registry: Registry,
    cache: RuleCache,
}

impl ValidationContext {
    /// Context with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(config.validated()?))
    }

    pub fn builder() -> ValidationContextBuilder {
        ValidationContextBuilder::new()
    }

    fn from_parts(config: ContextConfig) -> Self {
        Self {
            registry: Registry::new(config.allow_override),
            cache: RuleCache::new(IdentityCounter::new(config.id_prefix.clone())),
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn allow_override(&self) -> bool {
        self.registry.allow_override()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn cache(&self) -> &RuleCache {
        &self.cache
    }

    /// Register `class` under `names`; failures are logged, never returned.
    pub fn add<S: AsRef<str>>(&self, class: ValidatorClass, names: &[S]) {
        self.registry.add(class, names);
    }

    pub fn try_add<S: AsRef<str>>(
        &self,
        class: ValidatorClass,
        names: &[S],
    ) -> Result<Registration, RegistrationError> {
        self.registry.try_add(class, names)
    }

    pub fn singleton_by_class(&self, class: &ValidatorClass) -> Arc<dyn Validator> {
        self.registry.singleton_by_class(class)
    }

    pub fn class_by_name(&self, name: &str) -> Option<ValidatorClass> {
        self.registry.class_by_name(name)
    }

    pub fn singleton_by_name(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.registry.singleton_by_name(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Rules discovered for `target`; a fresh copy on every call.
    pub fn rules_for(&self, target: &mut dyn Validatable) -> Vec<ValidatorInfo> {
        self.cache.rules_for(target, &self.registry)
    }

    /// Names of the rules `target` fails; empty when valid.
    pub async fn validate(&self, target: &mut dyn Validatable) -> Vec<String> {
        orchestrator::validate(&self.registry, &self.cache, target).await
    }

    pub async fn validate_report(&self, target: &mut dyn Validatable) -> ValidationReport {
        orchestrator::validate_report(&self.registry, &self.cache, target).await
    }

    pub fn cached_identities(&self) -> Vec<String> {
        self.cache.identities()
    }

    /// Drop cached rules for one identity so the next call rediscovers them.
    pub fn forget(&self, identity: &str) -> bool {
        self.cache.forget(identity)
    }

    /// Clear registrations, singletons and cached rules.
    ///
    /// The identity counter keeps counting so identities are never reused.
    pub fn reset(&self) {
        debug!(
            names = self.registry.len(),
            cached = self.cache.len(),
            "resetting validation context"
        );
        self.registry.clear();
        self.cache.clear();
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FormControl, Requirement, Verdict};

    #[derive(Default)]
    struct Required;

    impl Validator for Required {
        fn validate<'a>(
            &'a self,
            target: &'a dyn Validatable,
            _rule: &'a str,
            _requirement: &'a Requirement,
        ) -> Verdict<'a> {
            (!target.value().is_empty()).into()
        }
    }

    #[derive(Default)]
    struct AlwaysValid;

    impl Validator for AlwaysValid {
        fn validate<'a>(
            &'a self,
            _target: &'a dyn Validatable,
            _rule: &'a str,
            _requirement: &'a Requirement,
        ) -> Verdict<'a> {
            true.into()
        }
    }

    fn control() -> FormControl {
        FormControl::new("email")
            .in_form("signup")
            .with_attribute("data-required", "")
    }

    #[test]
    fn builder_applies_config_and_registrations() {
        let context = ValidationContext::builder()
            .allow_override(false)
            .id_prefix("field-")
            .register::<Required>(&["required"])
            .register::<AlwaysValid>(&["required", "anything"])
            .build()
            .unwrap();

        assert!(!context.allow_override());
        assert_eq!(
            context.class_by_name("required"),
            Some(ValidatorClass::of::<Required>())
        );
        assert!(context.singleton_by_name("anything").is_some());

        let mut control = control();
        context.rules_for(&mut control);
        assert_eq!(control.get_attribute("id").as_deref(), Some("field-0"));
    }

    #[test]
    fn builder_rejects_empty_prefix() {
        assert!(ValidationContext::builder().id_prefix("").build().is_err());
    }

    #[test]
    fn contexts_are_isolated() {
        let a = ValidationContext::new();
        let b = ValidationContext::new();
        a.add(ValidatorClass::of::<Required>(), &["required"]);

        assert_eq!(a.names(), vec!["required".to_string()]);
        assert!(b.names().is_empty());
    }

    #[tokio::test]
    async fn validate_reports_failures() {
        let context = ValidationContext::new();
        context.add(ValidatorClass::of::<Required>(), &["required"]);

        let mut empty = control();
        assert_eq!(context.validate(&mut empty).await, vec!["required"]);

        let mut filled = control().with_value("a@b.c");
        assert!(context.validate(&mut filled).await.is_empty());
    }

    #[test]
    fn reset_clears_state_but_not_counter() {
        let context = ValidationContext::new();
        context.add(ValidatorClass::of::<Required>(), &["required"]);

        let mut first = control();
        context.rules_for(&mut first);
        assert_eq!(context.cached_identities(), vec!["form-control-0".to_string()]);

        context.reset();
        assert!(context.names().is_empty());
        assert!(context.cached_identities().is_empty());

        context.add(ValidatorClass::of::<Required>(), &["required"]);
        let mut second = control();
        context.rules_for(&mut second);
        assert_eq!(second.get_attribute("id").as_deref(), Some("form-control-1"));
    }

    #[test]
    fn forget_drops_single_identity() {
        let context = ValidationContext::new();
        context.add(ValidatorClass::of::<Required>(), &["required"]);

        let mut control = control();
        context.rules_for(&mut control);

        assert!(context.forget("form-control-0"));
        assert!(!context.forget("form-control-0"));
    }
}
