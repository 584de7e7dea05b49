//! Validator extension interface.
//!
//! Concrete rules implement [`Validator`]. A rule may answer synchronously
//! or hand back a future; both shapes travel as a [`Verdict`] and are
//! normalized into one future type before the orchestrator joins them.

use super::requirement::{Requirement, RequirementType};
use super::validatable::Validatable;
use futures::future::{self, LocalBoxFuture};
use std::any::Any;
use std::future::Future;
use thiserror::Error;

/// Error raised by a validator while checking a rule.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct RuleError {
    message: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for RuleError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RuleError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Outcome of invoking a validator: `Ok(true)` passes, `Ok(false)` fails,
/// `Err` is an error the orchestrator records as a failure.
pub type RuleResult = Result<bool, RuleError>;

/// Result of a single validator invocation, either settled or deferred.
pub enum Verdict<'a> {
    Ready(RuleResult),
    Pending(LocalBoxFuture<'a, RuleResult>),
}

impl<'a> Verdict<'a> {
    /// Wrap a future that settles later.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = RuleResult> + 'a,
    {
        Self::Pending(Box::pin(future))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Normalize both shapes into a single future.
    pub fn into_future(self) -> LocalBoxFuture<'a, RuleResult> {
        match self {
            Self::Ready(result) => Box::pin(future::ready(result)),
            Self::Pending(fut) => fut,
        }
    }
}

impl From<bool> for Verdict<'_> {
    fn from(valid: bool) -> Self {
        Self::Ready(Ok(valid))
    }
}

impl From<RuleResult> for Verdict<'_> {
    fn from(result: RuleResult) -> Self {
        Self::Ready(result)
    }
}

impl std::fmt::Debug for Verdict<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// A validation rule.
///
/// Validators are shared singletons, one per registered type; keep them
/// stateless or synchronize interior state.
///
/// # Example
///
/// ```rust
/// use rulebook::core::{Requirement, RequirementType, Validatable, Validator, Verdict};
///
/// #[derive(Default)]
/// struct MaxLength;
///
/// impl Validator for MaxLength {
///     fn requirement_type(&self, _name: &str, _value: &str) -> RequirementType {
///         RequirementType::Integer
///     }
///
///     fn validate<'a>(
///         &'a self,
///         target: &'a dyn Validatable,
///         _rule: &'a str,
///         requirement: &'a Requirement,
///     ) -> Verdict<'a> {
///         let max = requirement.as_integer().unwrap_or(i64::MAX);
///         ((target.value().chars().count() as i64) <= max).into()
///     }
/// }
/// ```
pub trait Validator: Send + Sync + 'static {
    /// Classify the requirement so discovery knows how to parse it.
    ///
    /// Default implementation returns [`RequirementType::String`].
    ///
    /// Called while the owning context holds its discovery lock: calling
    /// back into the same `ValidationContext` from here deadlocks. A panic
    /// discards this one rule for the validatable being discovered.
    fn requirement_type(&self, requirement_name: &str, requirement_value: &str) -> RequirementType {
        let _ = (requirement_name, requirement_value);
        RequirementType::String
    }

    /// Check `target` against the parsed requirement of `rule`.
    fn validate<'a>(
        &'a self,
        target: &'a dyn Validatable,
        rule: &'a str,
        requirement: &'a Requirement,
    ) -> Verdict<'a>;
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
