//! elan_types — the Type Store: structural interning for composite types.
//!
//! Grounded on `ori_types::pool` (hash-keyed interning, primitive
//! pre-interning, resolution chains) and on
//! `examples/original_source/cspark/spark/sema/types/typestore.cpp`
//! (exact canonical keys per type constructor) and
//! `spark/semgraph/{type,types,primitivetype}.cpp` (type kind set,
//! `inheritsFrom`, the `raw()` Specialized/Const unwrap helper).
//!
//! # Departure from the teacher's `Pool`
//!
//! `ori_types::pool::Pool` stores every type in one struct-of-arrays
//! table addressed by a flat `Idx`, built for a multi-threaded,
//! incremental driver. This crate is single-threaded and never needs to
//! serialize a type table to a cache (both non-goals, see DESIGN.md), so
//! `Type` is instead a reference-counted handle (`Rc<TypeData>`) —
//! equality and hashing are by allocation identity (`Rc::ptr_eq`), which
//! is correct precisely because interning guarantees structurally equal
//! types share one allocation. This keeps the recursive shape of `Type`
//! (a `Union`'s members are themselves `Type`s) straightforward without
//! an index-rewriting pass.
//!
//! `TypeDefn`/`TypeParameter` identity is represented here by the opaque
//! [`DefnId`] newtype rather than a real back-reference, to avoid a
//! dependency cycle with `elan_semantic` (which depends on this crate for
//! `Type` itself). `elan_semantic` assigns `DefnId`s and is the only
//! place that interprets them.

mod env;
mod ordering;
mod pool;
mod ty;

pub use env::{Env, EnvBinding};
pub use pool::TypeStore;
pub use ty::{CompositeData, CompositeKind, DefnId, FunctionData, PrimitiveKind, SpecializedData, Type, TypeData};
