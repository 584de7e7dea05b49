//! Validator registry: rule names to validator classes, classes to singletons.
//!
//! Names are canonicalized on the way in and on lookup, so `"Required"`,
//! `"required"` and `"max-length"`/`"maxLength"` pairs resolve alike. Each
//! class gets exactly one instance, created lazily on first lookup.
//!
//! # Example
//!
//! ```rust
//! use rulebook::core::{Requirement, Validatable, Validator, Verdict};
//! use rulebook::registry::{Registry, ValidatorClass};
//! use std::sync::Arc;
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
//! let registry = Registry::new(true);
//! registry.add(ValidatorClass::of::<Required>(), &["required"]);
//!
//! let a = registry.singleton_by_name("Required").unwrap();
//! let b = registry.singleton_by_name("required").unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

mod class;
mod error;

pub use class::ValidatorClass;
pub use error::RegistrationError;

use crate::core::{canonical_name, Validator};
use parking_lot::{Mutex, RwLock};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a single `add` call did to each supplied name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registration {
    /// Names newly bound, or re-bound to the same class (logged as a warning).
    pub bound: Vec<String>,
    /// Names taken over from a different class.
    pub replaced: Vec<String>,
    /// Names left untouched because override is disabled.
    pub skipped: Vec<String>,
}

/// Name-to-class bindings and per-class singletons.
pub struct Registry {
    allow_override: bool,
    bindings: RwLock<HashMap<String, ValidatorClass>>,
    singletons: Mutex<HashMap<TypeId, Arc<dyn Validator>>>,
}

impl Registry {
    pub fn new(allow_override: bool) -> Self {
        Self {
            allow_override,
            bindings: RwLock::new(HashMap::new()),
            singletons: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a later registration may take over a bound name.
    pub fn allow_override(&self) -> bool {
        self.allow_override
    }

    /// Register `class` under every usable name, logging instead of failing.
    pub fn add<S: AsRef<str>>(&self, class: ValidatorClass, names: &[S]) {
        if let Err(e) = self.try_add(class, names) {
            warn!(error = %e, "validator registration rejected");
        }
    }

    /// Register `class` under every usable name.
    ///
    /// Fails only when no name survives trimming and canonicalization.
    /// Conflicts are decided per name by the override policy and reported
    /// in the returned [`Registration`].
    pub fn try_add<S: AsRef<str>>(
        &self,
        class: ValidatorClass,
        names: &[S],
    ) -> Result<Registration, RegistrationError> {
        let keys: Vec<String> = names
            .iter()
            .map(|name| canonical_name(name.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();

        if keys.is_empty() {
            return Err(RegistrationError::NoUsableNames {
                class: class.type_name().to_string(),
            });
        }

        let mut registration = Registration::default();
        let mut bindings = self.bindings.write();

        for key in keys {
            match bindings.get(&key).cloned() {
                Some(existing) if existing == class => {
                    warn!(
                        name = %key,
                        class = existing.type_name(),
                        "validator name already bound to the same class"
                    );
                    registration.bound.push(key);
                }
                Some(existing) if !self.allow_override => {
                    warn!(
                        name = %key,
                        existing = existing.type_name(),
                        rejected = class.type_name(),
                        "validator name already bound, override disabled; skipping"
                    );
                    registration.skipped.push(key);
                }
                Some(existing) => {
                    warn!(
                        name = %key,
                        existing = existing.type_name(),
                        replacement = class.type_name(),
                        "overriding validator bound to name"
                    );
                    bindings.insert(key.clone(), class.clone());
                    registration.replaced.push(key);
                }
                None => {
                    debug!(name = %key, class = class.type_name(), "registered validator");
                    bindings.insert(key.clone(), class.clone());
                    registration.bound.push(key);
                }
            }
        }

        Ok(registration)
    }

    /// The one instance of `class`, created on first request.
    pub fn singleton_by_class(&self, class: &ValidatorClass) -> Arc<dyn Validator> {
        let mut singletons = self.singletons.lock();
        Arc::clone(
            singletons
                .entry(class.id())
                .or_insert_with(|| class.instantiate()),
        )
    }

    pub fn class_by_name(&self, name: &str) -> Option<ValidatorClass> {
        self.bindings.read().get(&canonical_name(name)).cloned()
    }

    pub fn singleton_by_name(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.class_by_name(name)
            .map(|class| self.singleton_by_class(&class))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.read().contains_key(&canonical_name(name))
    }

    /// All currently bound rule names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.bindings.read().keys().cloned().collect()
    }

    /// Distinct classes with at least one bound name.
    pub fn classes(&self) -> Vec<ValidatorClass> {
        let mut classes: Vec<ValidatorClass> = Vec::new();
        for class in self.bindings.read().values() {
            if !classes.contains(class) {
                classes.push(class.clone());
            }
        }
        classes
    }

    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }

    /// Drop every binding and singleton.
    pub fn clear(&self) {
        self.bindings.write().clear();
        self.singletons.lock().clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("allow_override", &self.allow_override)
            .field("names", &self.names())
            .finish()
    }
}
