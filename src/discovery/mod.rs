//! Rule discovery: from declarative attributes to resolved validator calls.
//!
//! Discovery runs once per validatable. The first pass that finds at least
//! one rule assigns the validatable a stable identity and caches the
//! resolved list under it; later passes return a copy of that list without
//! looking at the attributes again. A pass that finds nothing is not cached,
//! so rules added afterwards are still picked up.

mod identity;
mod info;

pub use identity::{Identity, IdentityCounter, DEFAULT_ID_PREFIX};
pub use info::ValidatorInfo;

use crate::core::{
    canonical_name, panic_message, rule_attribute, rule_name_from_attribute, Validatable,
    AGGREGATE_ATTRIBUTE,
};
use crate::registry::Registry;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Per-identity cache of discovered rules.
#[derive(Debug)]
pub struct RuleCache {
    counter: IdentityCounter,
    entries: Mutex<HashMap<String, Vec<ValidatorInfo>>>,
}

impl RuleCache {
    pub fn new(counter: IdentityCounter) -> Self {
        Self {
            counter,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn counter(&self) -> &IdentityCounter {
        &self.counter
    }

    /// Rules that apply to `target`, resolved against `registry`.
    ///
    /// Returns an empty list for validatables outside a form. The returned
    /// list is a copy; mutating it never touches the cache.
    pub fn rules_for(&self, target: &mut dyn Validatable, registry: &Registry) -> Vec<ValidatorInfo> {
        if target.form().is_none() {
            return Vec::new();
        }

        let identity = Identity::resolve(target, &self.counter);

        // Held across check-compute-insert so one identity is discovered once.
        let mut entries = self.entries.lock();
        if let Some(cached) = entries.get(identity.as_str()) {
            return cached.clone();
        }

        expand_aggregate(target);
        let rules = discover(target, registry);

        if rules.is_empty() {
            debug!(identity = identity.as_str(), "no rules discovered");
            return rules;
        }

        identity.persist(target);
        debug!(
            identity = identity.as_str(),
            rules = rules.len(),
            "cached discovered rules"
        );
        entries.insert(identity.as_str().to_string(), rules.clone());
        rules
    }

    pub fn is_cached(&self, identity: &str) -> bool {
        self.entries.lock().contains_key(identity)
    }

    pub fn identities(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    /// Drop the cached rules for one identity.
    pub fn forget(&self, identity: &str) -> bool {
        self.entries.lock().remove(identity).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for RuleCache {
    fn default() -> Self {
        Self::new(IdentityCounter::default())
    }
}

/// Rewrite `data-validate="a,bC"` into `data-a=""` and `data-b-c=""`.
fn expand_aggregate(target: &mut dyn Validatable) {
    let Some(list) = target.get_attribute(AGGREGATE_ATTRIBUTE) else {
        return;
    };

    for entry in list.split(',') {
        let rule = canonical_name(entry);
        if rule.is_empty() {
            continue;
        }
        let attribute = rule_attribute(&rule);
        if !target.has_attribute(&attribute) {
            target.set_attribute(&attribute, "");
        }
    }

    target.remove_attribute(AGGREGATE_ATTRIBUTE);
}

fn discover(target: &dyn Validatable, registry: &Registry) -> Vec<ValidatorInfo> {
    let mut rules = Vec::new();

    for attribute in target.attributes() {
        let Some(rule) = rule_name_from_attribute(&attribute.name) else {
            continue;
        };

        // Factories and classifiers are rule-author code; a panic drops the attribute.
        let resolved = panic::catch_unwind(AssertUnwindSafe(|| {
            registry.singleton_by_name(&rule).map(|validator| {
                let requirement_type = validator.requirement_type(&rule, &attribute.value);
                (validator, requirement_type)
            })
        }));

        let (validator, requirement_type) = match resolved {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                debug!(attribute = %attribute.name, "no validator registered for attribute");
                continue;
            }
            Err(payload) => {
                warn!(
                    attribute = %attribute.name,
                    panic = %panic_message(payload.as_ref()),
                    "discarding rule whose validator panicked during discovery"
                );
                continue;
            }
        };

        match requirement_type.parse(&attribute.value) {
            Ok(requirement) => rules.push(ValidatorInfo::new(rule, requirement, validator)),
            Err(e) => warn!(
                attribute = %attribute.name,
                requirement_type = %requirement_type,
                error = %e,
                "discarding rule with unparsable requirement"
            ),
        }
    }

    rules
}
