//! Core types shared by the registry, discovery and orchestrator.
//!
//! This module contains the leaf building blocks:
//! - Rule name canonicalization
//! - Requirement types and the shared parsing contract
//! - The `Validatable` capability interface and an in-memory `FormControl`
//! - The `Validator` extension trait and its `Verdict` task type

mod error;
mod name;
mod requirement;
mod validatable;
mod validator;

pub use error::ParseError;
pub use name::{
    canonical_name, dash_case, rule_attribute, rule_name_from_attribute, AGGREGATE_ATTRIBUTE,
    ATTRIBUTE_PREFIX,
};
pub use requirement::{Range, Requirement, RequirementType};
pub use validatable::{Attribute, FormControl, Validatable, ID_ATTRIBUTE};
pub use validator::{RuleError, RuleResult, Validator, Verdict};
pub(crate) use validator::panic_message;
