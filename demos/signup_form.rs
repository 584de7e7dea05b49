//! Sign-up Form Validation
//!
//! This example validates a small sign-up form declared entirely through
//! `data-*` attributes.
//!
//! Key concepts:
//! - Registering validators under several names
//! - Shorthand `data-validate` lists next to per-rule attributes
//! - Mixing synchronous and asynchronous rules
//! - Failing rules never abort validation
//!
//! Run with: cargo run --example signup_form

use rulebook::core::{
    FormControl, Requirement, RequirementType, RuleError, Validatable, Validator, Verdict,
};
use rulebook::ValidationContext;
use std::time::Duration;

#[derive(Default)]
struct Required;

impl Validator for Required {
    fn validate<'a>(
        &'a self,
        target: &'a dyn Validatable,
        _rule: &'a str,
        _requirement: &'a Requirement,
    ) -> Verdict<'a> {
        (!target.value().trim().is_empty()).into()
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
        let min = requirement.as_integer().unwrap_or(0);
        ((target.value().chars().count() as i64) >= min).into()
    }
}

#[derive(Default)]
struct Email;

impl Validator for Email {
    fn validate<'a>(
        &'a self,
        target: &'a dyn Validatable,
        _rule: &'a str,
        _requirement: &'a Requirement,
    ) -> Verdict<'a> {
        let value = target.value();
        match value.split_once('@') {
            Some((user, domain)) => (!user.is_empty() && domain.contains('.')).into(),
            None => false.into(),
        }
    }
}

// Pretends to ask a server whether the address is already registered
#[derive(Default)]
struct Available;

impl Validator for Available {
    fn validate<'a>(
        &'a self,
        target: &'a dyn Validatable,
        _rule: &'a str,
        _requirement: &'a Requirement,
    ) -> Verdict<'a> {
        Verdict::pending(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if target.value().ends_with("@unreachable.test") {
                return Err(RuleError::new("directory server timed out"));
            }
            Ok(target.value() != "taken@example.com")
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Sign-up Form Validation ===\n");

    let context = ValidationContext::builder()
        .register::<Required>(&["required", "mandatory"])
        .register::<MinLength>(&["minLength"])
        .register::<Email>(&["email"])
        .register::<Available>(&["available"])
        .build()
        .expect("default configuration is valid");

    let mut controls = vec![
        FormControl::new("username")
            .in_form("signup")
            .with_value("al")
            .with_attribute("data-validate", "required")
            .with_attribute("data-min-length", "3"),
        FormControl::new("email")
            .in_form("signup")
            .with_type("email")
            .with_value("taken@example.com")
            .with_attribute("data-validate", "required,email,available"),
        FormControl::new("backup-email")
            .in_form("signup")
            .with_value("me@unreachable.test")
            .with_attribute("data-validate", "email,available"),
        FormControl::new("referral")
            .in_form("signup")
            .disabled(true)
            .with_attribute("data-mandatory", ""),
    ];

    for control in &mut controls {
        let report = context.validate_report(control).await;
        println!(
            "{:<14} id={:<16} checked={} failed={:?}",
            control.name(),
            report.identity.as_deref().unwrap_or("-"),
            report.checked,
            report.failed_rules()
        );
        for failure in &report.failures {
            println!("    {failure}");
        }
    }

    println!("\nCached identities: {:?}", context.cached_identities());
}
