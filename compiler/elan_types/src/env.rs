//! Generic environments: interned `TypeParameter -> Type` bindings.
//!
//! Grounded on `typestore.cpp`'s `createEnv`, which interns an unordered
//! binding map by canonical key. We sort bindings by `DefnId` to get a
//! canonical, order-independent key without needing a custom hash-set
//! key type.

use std::rc::Rc;

use crate::ty::{DefnId, Type};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EnvBinding {
    pub type_param: DefnId,
    pub value: Type,
}

/// An interned, canonically-ordered set of bindings. Two `Env`s compare
/// equal iff they are the same interned allocation (mirroring `Type`'s
/// identity-based equality), which the Type Store guarantees holds iff
/// the binding sets are equal as unordered maps.
#[derive(Clone)]
pub struct Env(Rc<Vec<EnvBinding>>);

impl Env {
    #[must_use]
    pub(crate) fn new(mut bindings: Vec<EnvBinding>) -> Self {
        bindings.sort_by_key(|b| b.type_param);
        Env(Rc::new(bindings))
    }

    #[must_use]
    pub fn bindings(&self) -> &[EnvBinding] {
        &self.0
    }

    #[must_use]
    pub fn lookup(&self, type_param: DefnId) -> Option<&Type> {
        self.0
            .iter()
            .find(|b| b.type_param == type_param)
            .map(|b| &b.value)
    }

    pub(crate) fn canonical_key(bindings: &[(DefnId, Type)]) -> Vec<(DefnId, Type)> {
        let mut key: Vec<_> = bindings.to_vec();
        key.sort_by_key(|(id, _)| *id);
        key
    }
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Env {}
impl std::hash::Hash for Env {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}
impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Env{:?}", self.0)
    }
}
