//! Resolved unit of work for one rule on one validatable.

use crate::core::{Requirement, Validator};
use std::fmt;
use std::sync::Arc;

/// A rule name, its parsed requirement and the validator that checks it.
///
/// Immutable once built; cached lists hand out clones.
#[derive(Clone)]
pub struct ValidatorInfo {
    name: String,
    requirement: Requirement,
    validator: Arc<dyn Validator>,
}

impl ValidatorInfo {
    pub fn new(name: String, requirement: Requirement, validator: Arc<dyn Validator>) -> Self {
        Self {
            name,
            requirement,
            validator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }
}

impl PartialEq for ValidatorInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.requirement == other.requirement
            && std::ptr::addr_eq(Arc::as_ptr(&self.validator), Arc::as_ptr(&other.validator))
    }
}

impl fmt::Debug for ValidatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorInfo")
            .field("name", &self.name)
            .field("requirement", &self.requirement)
            .finish_non_exhaustive()
    }
}
