//! Stable identities for validatables.

use crate::core::{Validatable, ID_ATTRIBUTE};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default prefix for synthesized identities.
pub const DEFAULT_ID_PREFIX: &str = "form-control-";

/// Process-lifetime counter behind synthesized identities.
///
/// The counter only moves forward, so no identity is handed out twice.
#[derive(Debug)]
pub struct IdentityCounter {
    prefix: String,
    next: AtomicU64,
}

impl IdentityCounter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Hand out the next identity, `<prefix><n>`.
    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }

    /// Number of identities synthesized so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdentityCounter {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

/// Identity of a validatable, either read from its `id` or freshly minted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    Existing(String),
    Synthesized(String),
}

impl Identity {
    /// Read the `id` attribute, or mint a new identity without persisting it.
    pub fn resolve(target: &dyn Validatable, counter: &IdentityCounter) -> Self {
        match target.get_attribute(ID_ATTRIBUTE) {
            Some(id) if !id.is_empty() => Self::Existing(id),
            _ => Self::Synthesized(counter.next_id()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Existing(id) | Self::Synthesized(id) => id,
        }
    }

    /// Write a synthesized identity back onto the validatable.
    pub fn persist(&self, target: &mut dyn Validatable) {
        if let Self::Synthesized(id) = self {
            target.set_attribute(ID_ATTRIBUTE, id);
        }
    }
}
