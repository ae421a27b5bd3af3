//! `TypeStore`: structural interning with canonical keys.
//!
//! Grounded on `typestore.cpp`'s `create*Type` methods and on
//! `ori_types::pool::Pool`'s interning-map pattern (hash-keyed insert,
//! primitives pre-interned at construction). Interior mutability uses
//! `RefCell`, matching this workspace's single-threaded model (see
//! DESIGN.md for why `ori_types`'s `parking_lot::RwLock` isn't carried
//! over).
//!
//! `memberType` from `spec.md` §4.2 is *not* implemented here: it
//! dispatches on `Member::kind()`, which this crate cannot see without
//! depending on `elan_semantic` (which itself depends on this crate for
//! `Type`). It lives in `elan_semantic` instead, as a function over
//! `&Member` that simply projects the field this crate already exposes
//! (`TypeDefn.type`, `ValueDefn.type`, `TypeParameter.typeVar`).

use rustc_hash::FxHashMap;
use std::cell::RefCell;

use crate::env::{Env, EnvBinding};
use crate::ordering::sort_dedup;
use crate::ty::{CompositeData, CompositeKind, DefnId, FunctionData, PrimitiveKind, SpecializedData, Type, TypeData};

type TypeKey = Vec<Type>;

pub struct TypeStore {
    error: Type,
    ignored: Type,
    primitives: FxHashMap<PrimitiveKind, Type>,
    unions: RefCell<FxHashMap<TypeKey, Type>>,
    tuples: RefCell<FxHashMap<TypeKey, Type>>,
    consts: RefCell<FxHashMap<(Type, bool), Type>>,
    functions: RefCell<FxHashMap<TypeKey, Type>>,
    envs: RefCell<FxHashMap<Vec<(DefnId, Type)>, Env>>,
}

impl Default for TypeStore {
    fn default() -> Self {
        let mut primitives = FxHashMap::default();
        for kind in [
            PrimitiveKind::Void,
            PrimitiveKind::Bool,
            PrimitiveKind::Char,
            PrimitiveKind::I8,
            PrimitiveKind::I16,
            PrimitiveKind::I32,
            PrimitiveKind::I64,
            PrimitiveKind::U8,
            PrimitiveKind::U16,
            PrimitiveKind::U32,
            PrimitiveKind::U64,
            PrimitiveKind::F32,
            PrimitiveKind::F64,
            PrimitiveKind::NullPtr,
        ] {
            primitives.insert(kind, Type::new(TypeData::Primitive(kind)));
        }
        TypeStore {
            error: Type::new(TypeData::Invalid),
            ignored: Type::new(TypeData::Ignored),
            primitives,
            unions: RefCell::new(FxHashMap::default()),
            tuples: RefCell::new(FxHashMap::default()),
            consts: RefCell::new(FxHashMap::default()),
            functions: RefCell::new(FxHashMap::default()),
            envs: RefCell::new(FxHashMap::default()),
        }
    }
}

impl TypeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The singleton error sentinel. Distinct from every primitive and
    /// never interned twice (`spec.md` §3.2).
    #[must_use]
    pub fn error(&self) -> Type {
        self.error.clone()
    }

    #[must_use]
    pub fn ignored(&self) -> Type {
        self.ignored.clone()
    }

    #[must_use]
    pub fn primitive(&self, kind: PrimitiveKind) -> Type {
        self.primitives[&kind].clone()
    }

    /// Constructs (but does not intern, since composites are nominal not
    /// structural) a `Composite` type. Composite identity is the
    /// `DefnId`, one per `TypeDefn`, so there is nothing to deduplicate
    /// here - `elan_semantic` calls this exactly once per `TypeDefn`.
    #[must_use]
    pub fn create_composite_type(
        &self,
        kind: CompositeKind,
        defn: DefnId,
        super_type: Option<Type>,
        interfaces: Vec<Type>,
    ) -> Type {
        Type::new(TypeData::Composite(CompositeData {
            kind,
            defn,
            super_type,
            interfaces,
        }))
    }

    /// `createUnionType`: sorts by `TypeOrdering`, dedups, interns by
    /// canonical key.
    pub fn create_union_type(&self, members: Vec<Type>) -> Type {
        let canonical = sort_dedup(members);
        if let Some(existing) = self.unions.borrow().get(&canonical) {
            return existing.clone();
        }
        let ty = Type::new(TypeData::Union(canonical.clone()));
        self.unions.borrow_mut().insert(canonical, ty.clone());
        ty
    }

    /// `createTupleType`: like union, but preserves positional order.
    pub fn create_tuple_type(&self, members: Vec<Type>) -> Type {
        if let Some(existing) = self.tuples.borrow().get(&members) {
            return existing.clone();
        }
        let ty = Type::new(TypeData::Tuple(members.clone()));
        self.tuples.borrow_mut().insert(members, ty.clone());
        ty
    }

    /// `createConstType`: key = `(base, provisional)`.
    pub fn create_const_type(&self, base: Type, provisional: bool) -> Type {
        let key = (base.clone(), provisional);
        if let Some(existing) = self.consts.borrow().get(&key) {
            return existing.clone();
        }
        let ty = Type::new(TypeData::Const(base, provisional));
        self.consts.borrow_mut().insert(key, ty.clone());
        ty
    }

    /// `createFunctionType(returnType, paramTypes)`: key =
    /// `[returnType, paramTypes...]`.
    pub fn create_function_type(&self, return_type: Type, param_types: Vec<Type>) -> Type {
        let mut key = Vec::with_capacity(param_types.len() + 1);
        key.push(return_type.clone());
        key.extend(param_types.iter().cloned());
        if let Some(existing) = self.functions.borrow().get(&key) {
            return existing.clone();
        }
        let ty = Type::new(TypeData::Function(FunctionData {
            return_type,
            param_types,
        }));
        self.functions.borrow_mut().insert(key, ty.clone());
        ty
    }

    /// Parameter-list overload: projects each parameter's type and
    /// delegates, matching the second `createFunctionType` overload in
    /// `typestore.cpp` (`const ArrayRef<Parameter*>&`).
    pub fn create_function_type_from_params(
        &self,
        return_type: Type,
        param_types: impl IntoIterator<Item = Type>,
    ) -> Type {
        self.create_function_type(return_type, param_types.into_iter().collect())
    }

    /// Wraps a `TypeDefn`/`Function`/... in a `Specialized` type with the
    /// given environment.
    pub fn create_specialized_type(&self, generic: DefnId, env: Env) -> Type {
        Type::new(TypeData::Specialized(SpecializedData { generic, env }))
    }

    pub fn create_type_var(&self, type_param: DefnId) -> Type {
        Type::new(TypeData::TypeVar(type_param))
    }

    /// `createEnv`: interns an (unordered) binding map by canonical key.
    pub fn create_env(&self, bindings: Vec<EnvBinding>) -> Env {
        let raw_key: Vec<(DefnId, Type)> = bindings
            .iter()
            .map(|b| (b.type_param, b.value.clone()))
            .collect();
        let key = Env::canonical_key(&raw_key);
        if let Some(existing) = self.envs.borrow().get(&key) {
            return existing.clone();
        }
        let env = Env::new(bindings);
        self.envs.borrow_mut().insert(key, env.clone());
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_distinct_and_stable() {
        let store = TypeStore::new();
        let i32_a = store.primitive(PrimitiveKind::I32);
        let i32_b = store.primitive(PrimitiveKind::I32);
        let i64_ty = store.primitive(PrimitiveKind::I64);
        assert_eq!(i32_a, i32_b);
        assert_ne!(i32_a, i64_ty);
    }

    #[test]
    fn error_and_ignored_are_distinct_singletons() {
        let store = TypeStore::new();
        assert_ne!(store.error(), store.ignored());
        assert_ne!(store.error(), store.primitive(PrimitiveKind::Void));
    }

    #[test]
    fn union_type_is_structurally_unique() {
        let store = TypeStore::new();
        let bool_ty = store.primitive(PrimitiveKind::Bool);
        let i32_ty = store.primitive(PrimitiveKind::I32);
        let u1 = store.create_union_type(vec![bool_ty.clone(), i32_ty.clone()]);
        let u2 = store.create_union_type(vec![i32_ty, bool_ty]);
        assert_eq!(u1, u2, "union member order must not affect identity");
    }

    #[test]
    fn union_of_duplicate_members_dedups() {
        let store = TypeStore::new();
        let bool_ty = store.primitive(PrimitiveKind::Bool);
        let u = store.create_union_type(vec![bool_ty.clone(), bool_ty.clone(), bool_ty]);
        match u.data() {
            TypeData::Union(members) => assert_eq!(members.len(), 1),
            other => panic!("expected Union, got {other:?}"),
        }
    }

    #[test]
    fn tuple_type_preserves_order() {
        let store = TypeStore::new();
        let bool_ty = store.primitive(PrimitiveKind::Bool);
        let i32_ty = store.primitive(PrimitiveKind::I32);
        let t1 = store.create_tuple_type(vec![bool_ty.clone(), i32_ty.clone()]);
        let t2 = store.create_tuple_type(vec![i32_ty, bool_ty]);
        assert_ne!(t1, t2, "tuple order is significant");
    }

    #[test]
    fn function_type_keys_on_return_and_params() {
        let store = TypeStore::new();
        let void_ty = store.primitive(PrimitiveKind::Void);
        let bool_ty = store.primitive(PrimitiveKind::Bool);
        let f1 = store.create_function_type(void_ty.clone(), vec![bool_ty.clone()]);
        let f2 = store.create_function_type(void_ty, vec![bool_ty]);
        assert_eq!(f1, f2);
    }

    #[test]
    fn const_type_keys_on_base_and_provisional() {
        let store = TypeStore::new();
        let i32_ty = store.primitive(PrimitiveKind::I32);
        let c1 = store.create_const_type(i32_ty.clone(), false);
        let c2 = store.create_const_type(i32_ty.clone(), true);
        let c3 = store.create_const_type(i32_ty, false);
        assert_ne!(c1, c2);
        assert_eq!(c1, c3);
    }

    #[test]
    fn env_interning_is_order_independent() {
        let store = TypeStore::new();
        let i32_ty = store.primitive(PrimitiveKind::I32);
        let bool_ty = store.primitive(PrimitiveKind::Bool);
        let t0 = DefnId::new(0);
        let t1 = DefnId::new(1);
        let e1 = store.create_env(vec![
            EnvBinding {
                type_param: t0,
                value: i32_ty.clone(),
            },
            EnvBinding {
                type_param: t1,
                value: bool_ty.clone(),
            },
        ]);
        let e2 = store.create_env(vec![
            EnvBinding {
                type_param: t1,
                value: bool_ty,
            },
            EnvBinding {
                type_param: t0,
                value: i32_ty,
            },
        ]);
        assert_eq!(e1, e2);
    }
}
