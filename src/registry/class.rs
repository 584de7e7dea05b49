//! Validator classes: a type identity plus a way to build its singleton.

use crate::core::Validator;
use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

type Factory = Arc<dyn Fn() -> Arc<dyn Validator> + Send + Sync>;

/// Identity of a validator type together with its instance factory.
///
/// Two classes are equal when they describe the same Rust type, regardless
/// of which factory built them.
#[derive(Clone)]
pub struct ValidatorClass {
    id: TypeId,
    type_name: &'static str,
    factory: Factory,
}

impl ValidatorClass {
    /// Class for a validator constructed through `Default`.
    pub fn of<V: Validator + Default>() -> Self {
        Self::with_factory(V::default)
    }

    /// Class for a validator constructed by `factory`.
    pub fn with_factory<V, F>(factory: F) -> Self
    where
        V: Validator,
        F: Fn() -> V + Send + Sync + 'static,
    {
        Self {
            id: TypeId::of::<V>(),
            type_name: type_name::<V>(),
            factory: Arc::new(move || Arc::new(factory()) as Arc<dyn Validator>),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn instantiate(&self) -> Arc<dyn Validator> {
        (self.factory)()
    }
}

impl PartialEq for ValidatorClass {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValidatorClass {}

impl fmt::Debug for ValidatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidatorClass").field(&self.type_name).finish()
    }
}
