//! Validation orchestrator: run every discovered rule and collect failures.
//!
//! Rules for one validatable run concurrently on the caller's task. Each
//! outcome (a synchronous answer, a future that settles later, a returned
//! error or a panic) is normalized into a `Validation` and the whole set is
//! joined with `Validation::all_vec`, so nothing a validator does can make
//! `validate` itself fail.

mod failure;
mod report;

pub use failure::RuleFailure;
pub use report::ValidationReport;

use crate::core::{panic_message, Validatable, ID_ATTRIBUTE};
use crate::discovery::{RuleCache, ValidatorInfo};
use crate::registry::Registry;
use chrono::Utc;
use futures::future::join_all;
use futures::FutureExt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, error};

type RuleCheck = Validation<(), NonEmptyVec<RuleFailure>>;

/// Validate `target` and return the names of the rules that failed.
pub async fn validate(
    registry: &Registry,
    cache: &RuleCache,
    target: &mut dyn Validatable,
) -> Vec<String> {
    validate_report(registry, cache, target).await.failed_rules()
}

/// Validate `target` and return the full report.
///
/// Disabled validatables and validatables without rules are reported valid
/// without running anything.
pub async fn validate_report(
    registry: &Registry,
    cache: &RuleCache,
    target: &mut dyn Validatable,
) -> ValidationReport {
    if target.is_disabled() {
        debug!(name = target.name(), "skipping disabled validatable");
        return ValidationReport::skipped(target.get_attribute(ID_ATTRIBUTE));
    }

    let rules = cache.rules_for(target, registry);
    let target: &dyn Validatable = target;
    let identity = target.get_attribute(ID_ATTRIBUTE);

    if rules.is_empty() {
        return ValidationReport::skipped(identity);
    }

    let started_at = Utc::now();
    let checks = join_all(rules.iter().map(|info| check(target, info))).await;
    let finished_at = Utc::now();

    let failures = match Validation::all_vec(checks) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    };

    debug!(
        identity = identity.as_deref().unwrap_or_default(),
        checked = rules.len(),
        failed = failures.len(),
        "validation finished"
    );

    ValidationReport {
        identity,
        checked: rules.len(),
        failures,
        started_at,
        finished_at,
    }
}

/// Run one rule, turning every way it can go wrong into a failure.
async fn check(target: &dyn Validatable, info: &ValidatorInfo) -> RuleCheck {
    let rule = info.name();

    let invoked = panic::catch_unwind(AssertUnwindSafe(|| {
        info.validator().validate(target, rule, info.requirement())
    }));
    let verdict = match invoked {
        Ok(verdict) => verdict,
        Err(payload) => return panicked(rule, payload.as_ref()),
    };

    match AssertUnwindSafe(verdict.into_future()).catch_unwind().await {
        Ok(Ok(true)) => Validation::success(()),
        Ok(Ok(false)) => Validation::fail(RuleFailure::Invalid {
            rule: rule.to_string(),
        }),
        Ok(Err(e)) => {
            error!(rule, error = %e, "validator returned an error");
            Validation::fail(RuleFailure::Errored {
                rule: rule.to_string(),
                message: e.to_string(),
            })
        }
        Err(payload) => panicked(rule, payload.as_ref()),
    }
}

fn panicked(rule: &str, payload: &(dyn Any + Send)) -> RuleCheck {
    let message = panic_message(payload);
    error!(rule, panic = %message, "validator panicked");
    Validation::fail(RuleFailure::Panicked {
        rule: rule.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        FormControl, Requirement, RequirementType, RuleError, RuleResult, Validator, Verdict,
    };
    use crate::registry::ValidatorClass;

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
    struct MinLength;

    impl Validator for MinLength {
        fn requirement_type(&self, _name: &str, _value: &str) -> RequirementType {
            RequirementType::Integer
        }

        fn validate<'a>(
            &'a self,
            target: &'a dyn Validatable,
            _rule: &'a str,
            requirement: &'a Requirement,
        ) -> Verdict<'a> {
            Verdict::pending(async move {
                tokio::task::yield_now().await;
                let min = requirement.as_integer().unwrap_or(0);
                Ok((target.value().chars().count() as i64) >= min)
            })
        }
    }

    #[derive(Default)]
    struct Exploding;

    impl Validator for Exploding {
        fn validate<'a>(
            &'a self,
            _target: &'a dyn Validatable,
            _rule: &'a str,
            _requirement: &'a Requirement,
        ) -> Verdict<'a> {
            panic!("validator exploded");
        }
    }

    #[derive(Default)]
    struct Rejecting;

    impl Validator for Rejecting {
        fn validate<'a>(
            &'a self,
            _target: &'a dyn Validatable,
            _rule: &'a str,
            _requirement: &'a Requirement,
        ) -> Verdict<'a> {
            Verdict::pending(async { Err(RuleError::new("lookup service unavailable")) })
        }
    }

    fn explode() -> RuleResult {
        panic!("async validator exploded")
    }

    #[derive(Default)]
    struct PanicsLater;

    impl Validator for PanicsLater {
        fn validate<'a>(
            &'a self,
            _target: &'a dyn Validatable,
            _rule: &'a str,
            _requirement: &'a Requirement,
        ) -> Verdict<'a> {
            Verdict::pending(async {
                tokio::task::yield_now().await;
                explode()
            })
        }
    }

    #[derive(Default)]
    struct Failing;

    impl Validator for Failing {
        fn validate<'a>(
            &'a self,
            _target: &'a dyn Validatable,
            _rule: &'a str,
            _requirement: &'a Requirement,
        ) -> Verdict<'a> {
            Verdict::Ready(Err(RuleError::new("bad configuration")))
        }
    }

    #[derive(Default)]
    struct BadClassifier;

    impl Validator for BadClassifier {
        fn requirement_type(&self, _name: &str, _value: &str) -> RequirementType {
            panic!("classifier exploded");
        }

        fn validate<'a>(
            &'a self,
            _target: &'a dyn Validatable,
            _rule: &'a str,
            _requirement: &'a Requirement,
        ) -> Verdict<'a> {
            false.into()
        }
    }

    fn registry() -> Registry {
        let registry = Registry::default();
        registry.add(ValidatorClass::of::<Required>(), &["required"]);
        registry.add(ValidatorClass::of::<MinLength>(), &["minLength"]);
        registry.add(ValidatorClass::of::<Exploding>(), &["exploding"]);
        registry.add(ValidatorClass::of::<Rejecting>(), &["rejecting"]);
        registry.add(ValidatorClass::of::<PanicsLater>(), &["panicsLater"]);
        registry.add(ValidatorClass::of::<Failing>(), &["failing"]);
        registry.add(ValidatorClass::of::<BadClassifier>(), &["badClassifier"]);
        registry
    }

    #[tokio::test]
    async fn valid_input_yields_no_failures() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .with_value("Ada")
            .with_attribute("data-required", "")
            .with_attribute("data-min-length", "2");

        assert!(validate(&registry, &cache, &mut control).await.is_empty());
    }

    #[tokio::test]
    async fn sync_and_async_failures_are_collected() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .with_value("")
            .with_attribute("data-required", "")
            .with_attribute("data-min-length", "2");

        let failures = validate(&registry, &cache, &mut control).await;

        assert_eq!(failures, vec!["required", "minLength"]);
    }

    #[tokio::test]
    async fn disabled_validatable_is_always_valid() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .disabled(true)
            .with_attribute("data-required", "")
            .with_attribute("data-exploding", "");

        let report = validate_report(&registry, &cache, &mut control).await;

        assert!(report.is_valid());
        assert_eq!(report.checked, 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn validatable_without_rules_is_valid() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name").in_form("f").with_attribute("data-unknown", "");

        let report = validate_report(&registry, &cache, &mut control).await;

        assert!(report.is_valid());
        assert_eq!(report.identity, None);
    }

    #[tokio::test]
    async fn synchronous_panic_becomes_single_failure() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .with_attribute("data-exploding", "")
            .with_attribute("data-required", "");

        let report = validate_report(&registry, &cache, &mut control).await;

        assert_eq!(report.failed_rules(), vec!["exploding", "required"]);
        assert!(matches!(
            &report.failures[0],
            RuleFailure::Panicked { message, .. } if message == "validator exploded"
        ));
        assert!(report.failures[1].is_invalid());
    }

    #[tokio::test]
    async fn classifier_panic_does_not_escape_validate() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .with_attribute("data-bad-classifier", "")
            .with_attribute("data-required", "");

        let outcome = AssertUnwindSafe(validate(&registry, &cache, &mut control))
            .catch_unwind()
            .await;

        assert_eq!(outcome.ok(), Some(vec!["required".to_string()]));
    }

    #[tokio::test]
    async fn errors_and_async_panics_become_failures() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .with_value("ok")
            .with_attribute("data-rejecting", "")
            .with_attribute("data-panics-later", "")
            .with_attribute("data-failing", "")
            .with_attribute("data-required", "");

        let report = validate_report(&registry, &cache, &mut control).await;

        assert_eq!(report.checked, 4);
        assert_eq!(
            report.failed_rules(),
            vec!["rejecting", "panicsLater", "failing"]
        );
        assert!(matches!(
            &report.failures[0],
            RuleFailure::Errored { message, .. } if message == "lookup service unavailable"
        ));
        assert!(matches!(&report.failures[1], RuleFailure::Panicked { .. }));
        assert!(matches!(&report.failures[2], RuleFailure::Errored { .. }));
    }

    #[tokio::test]
    async fn report_carries_assigned_identity() {
        let registry = registry();
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .with_attribute("data-required", "");

        let report = validate_report(&registry, &cache, &mut control).await;

        assert_eq!(report.identity.as_deref(), Some("form-control-0"));
        assert!(report.finished_at >= report.started_at);
    }

    #[tokio::test]
    async fn rules_run_concurrently() {
        static LOG: parking_lot::Mutex<Vec<String>> = parking_lot::const_mutex(Vec::new());

        #[derive(Default)]
        struct Interleaving;

        impl Validator for Interleaving {
            fn validate<'a>(
                &'a self,
                _target: &'a dyn Validatable,
                rule: &'a str,
                _requirement: &'a Requirement,
            ) -> Verdict<'a> {
                Verdict::pending(async move {
                    LOG.lock().push(rule.to_string());
                    tokio::task::yield_now().await;
                    LOG.lock().push(rule.to_string());
                    Ok(true)
                })
            }
        }

        let registry = Registry::default();
        registry.add(ValidatorClass::of::<Interleaving>(), &["first", "second"]);
        let cache = RuleCache::default();
        let mut control = FormControl::new("name")
            .in_form("f")
            .with_attribute("data-first", "")
            .with_attribute("data-second", "");

        assert!(validate(&registry, &cache, &mut control).await.is_empty());

        // Both rules were in flight before either finished
        assert_eq!(*LOG.lock(), vec!["first", "second", "first", "second"]);
    }
}
