//! Aggregate result of validating one validatable.

use super::failure::RuleFailure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of one `validate` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Identity the validatable was cached under, if any.
    pub identity: Option<String>,
    /// Number of rules that ran.
    pub checked: usize,
    /// Failed rules, in discovery order.
    pub failures: Vec<RuleFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Report for a validatable on which no rule ran.
    pub fn skipped(identity: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            identity,
            checked: 0,
            failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of the failed rules.
    pub fn failed_rules(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|failure| failure.rule().to_string())
            .collect()
    }

    /// Wall-clock time spent running rules.
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// View the report as an accumulated `Validation`.
    pub fn into_validation(self) -> Validation<(), NonEmptyVec<RuleFailure>> {
        let checks: Vec<Validation<(), NonEmptyVec<RuleFailure>>> =
            self.failures.into_iter().map(Validation::fail).collect();
        Validation::all_vec(checks).map(|_| ())
    }
}
