//! Rulebook: a pluggable validation-rule registry and async validation orchestrator
//!
//! Rules are registered once under one or more names. Form controls declare
//! which rules apply through `data-*` attributes; the orchestrator resolves
//! those attributes against the registry, parses each requirement once,
//! runs every rule concurrently and reports the names of the rules that
//! failed. Nothing a rule does (answering `false`, returning an error,
//! panicking) can make validation itself fail.
//!
//! # Core Concepts
//!
//! - **Validator**: a rule implementing the `Validator` trait
//! - **Validatable**: anything exposing the attribute capability interface
//! - **Discovery**: mapping a validatable's attributes to cached rule calls
//! - **Context**: the owner of registry, cache and override policy
//!
//! # Example
//!
//! ```rust
//! use rulebook::core::{FormControl, Requirement, RequirementType, Validatable, Validator, Verdict};
//! use rulebook::ValidationContext;
//!
//! #[derive(Default)]
//! struct MaxLength;
//!
//! impl Validator for MaxLength {
//!     fn requirement_type(&self, _name: &str, _value: &str) -> RequirementType {
//!         RequirementType::Integer
//!     }
//!
//!     fn validate<'a>(
//!         &'a self,
//!         target: &'a dyn Validatable,
//!         _rule: &'a str,
//!         requirement: &'a Requirement,
//!     ) -> Verdict<'a> {
//!         let max = requirement.as_integer().unwrap_or(i64::MAX);
//!         ((target.value().chars().count() as i64) <= max).into()
//!     }
//! }
//!
//! let context = ValidationContext::builder()
//!     .register::<MaxLength>(&["maxLength"])
//!     .build()
//!     .unwrap();
//!
//! let mut control = FormControl::new("nickname")
//!     .in_form("profile")
//!     .with_value("a very long nickname")
//!     .with_attribute("data-max-length", "8");
//!
//! let failures = futures::executor::block_on(context.validate(&mut control));
//! assert_eq!(failures, vec!["maxLength"]);
//! ```

pub mod context;
pub mod core;
pub mod discovery;
pub mod orchestrator;
pub mod registry;

// Re-export commonly used types
pub use context::{ContextConfig, ValidationContext, ValidationContextBuilder};
pub use crate::core::{FormControl, Requirement, RequirementType, Validatable, Validator, Verdict};
pub use discovery::ValidatorInfo;
pub use orchestrator::{RuleFailure, ValidationReport};
pub use registry::{Registry, ValidatorClass};
