//! `Type` and `TypeData`. Grounded on `spark/semgraph/type.h`'s Kind set
//! (`spec.md` §3.2: Invalid, Ignored, Primitive, Composite, Union, Tuple,
//! Function, Const, Specialized, TypeVar) and `primitivetype.cpp`'s
//! primitive table.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::env::Env;

/// Opaque identity for a `TypeDefn` or `TypeParameter` defined in
/// `elan_semantic`. See the module doc comment for why this crate can't
/// hold a real back-reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct DefnId(u32);

impl DefnId {
    #[must_use]
    pub fn new(raw: u32) -> Self {
        DefnId(raw)
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A handle to an interned type. Cheap to clone (`Rc` bump), equality
/// and hashing are by allocation identity: two `Type`s compare equal iff
/// they are the same interned object, which the Type Store guarantees
/// holds iff they are structurally equal (`spec.md` §3.3 invariant 2).
#[derive(Clone)]
pub struct Type(Rc<TypeData>);

impl Type {
    #[must_use]
    pub fn new(data: TypeData) -> Self {
        Type(Rc::new(data))
    }

    #[must_use]
    pub fn data(&self) -> &TypeData {
        &self.0
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(*self.0, TypeData::Invalid)
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(*self.0, TypeData::Ignored)
    }

    /// Unwraps `Specialized`/`Const` layers to reach the underlying type,
    /// stopping at anything else. Grounded on `semgraph::types::raw`.
    #[must_use]
    pub fn raw(&self) -> Type {
        // `Specialized` wraps a `DefnId`, not a nested `Type`, so the
        // only structural layer this crate can unwrap on its own is
        // `Const`; unwrapping through a generic's underlying type is
        // `elan_semantic`'s job, since it owns the DefnId -> Type map.
        let mut current = self.clone();
        while let TypeData::Const(base, _) = current.data() {
            current = base.clone();
        }
        current
    }

    #[must_use]
    pub fn as_composite(&self) -> Option<&CompositeData> {
        match self.data() {
            TypeData::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// `spec.md` §3.2: Composite's `inheritsFrom` query. Grounded on
    /// `Composite::inheritsFrom` in `type.cpp`: identity, then the super
    /// chain, then the interface list, all recursive.
    #[must_use]
    pub fn inherits_from(&self, other: &Type) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        let Some(composite) = self.as_composite() else {
            return false;
        };
        if let Some(super_type) = &composite.super_type {
            if super_type.inherits_from(other) {
                return true;
            }
        }
        composite
            .interfaces
            .iter()
            .any(|iface| iface.inherits_from(other))
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Type {}
impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}
impl std::fmt::Debug for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum PrimitiveKind {
    Void,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    NullPtr,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CompositeKind {
    Class,
    Struct,
    Interface,
    Enum,
}

#[derive(Clone, Debug)]
pub struct CompositeData {
    pub kind: CompositeKind,
    pub defn: DefnId,
    pub super_type: Option<Type>,
    pub interfaces: Vec<Type>,
}

#[derive(Clone, Debug)]
pub struct FunctionData {
    pub return_type: Type,
    pub param_types: Vec<Type>,
}

#[derive(Clone, Debug)]
pub struct SpecializedData {
    pub generic: DefnId,
    pub env: Env,
}

#[derive(Clone, Debug)]
pub enum TypeData {
    /// Error sentinel. Propagates through derivations without poisoning
    /// interning (`spec.md` §3.2).
    Invalid,
    /// Placeholder for "no type computed yet".
    Ignored,
    Primitive(PrimitiveKind),
    Composite(CompositeData),
    /// Canonically sorted by `TypeOrdering`; see `ordering.rs`.
    Union(Vec<Type>),
    /// Positional, unsorted.
    Tuple(Vec<Type>),
    Function(FunctionData),
    Const(Type, bool),
    Specialized(SpecializedData),
    /// Pinned to a `TypeParameter`.
    TypeVar(DefnId),
}
