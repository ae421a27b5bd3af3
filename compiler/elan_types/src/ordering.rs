//! `TypeOrdering`: a total, deterministic order on `Type`s, used to
//! canonicalize union member lists before they are interned.
//!
//! Grounded on `spec.md` §4.2: "(kind, then kind-specific tie-break:
//! primitive width/signedness, composite identity by defn pointer,
//! union/tuple by lexicographic ordering of members)."

use crate::ty::{CompositeData, FunctionData, Type, TypeData};

fn kind_rank(data: &TypeData) -> u8 {
    match data {
        TypeData::Invalid => 0,
        TypeData::Ignored => 1,
        TypeData::Primitive(_) => 2,
        TypeData::Composite(_) => 3,
        TypeData::Union(_) => 4,
        TypeData::Tuple(_) => 5,
        TypeData::Function(_) => 6,
        TypeData::Const(..) => 7,
        TypeData::Specialized(_) => 8,
        TypeData::TypeVar(_) => 9,
    }
}

fn compare_composite(a: &CompositeData, b: &CompositeData) -> std::cmp::Ordering {
    // "composite identity by defn pointer" - DefnId is the stand-in for
    // that pointer identity in this crate (see ty.rs's module doc).
    a.defn.raw().cmp(&b.defn.raw())
}

fn compare_function(a: &FunctionData, b: &FunctionData) -> std::cmp::Ordering {
    compare(&a.return_type, &b.return_type).then_with(|| compare_slices(&a.param_types, &b.param_types))
}

fn compare_slices(a: &[Type], b: &[Type]) -> std::cmp::Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| compare(x, y))
        .find(|o| *o != std::cmp::Ordering::Equal)
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Compare two types under `TypeOrdering`. Not the same relation as
/// `Type`'s `Eq` (which is allocation identity) — two distinct
/// allocations can tie under this ordering only if they are structurally
/// identical, which interning prevents from happening twice, so ties are
/// broken arbitrarily but stably by recursing into already-canonical
/// sub-orderings.
#[must_use]
pub fn compare(a: &Type, b: &Type) -> std::cmp::Ordering {
    let (ra, rb) = (kind_rank(a.data()), kind_rank(b.data()));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match (a.data(), b.data()) {
        (TypeData::Invalid, TypeData::Invalid) | (TypeData::Ignored, TypeData::Ignored) => {
            std::cmp::Ordering::Equal
        }
        (TypeData::Primitive(x), TypeData::Primitive(y)) => x.cmp(y),
        (TypeData::Composite(x), TypeData::Composite(y)) => compare_composite(x, y),
        (TypeData::Union(x), TypeData::Union(y)) | (TypeData::Tuple(x), TypeData::Tuple(y)) => {
            compare_slices(x, y)
        }
        (TypeData::Function(x), TypeData::Function(y)) => compare_function(x, y),
        (TypeData::Const(xb, xp), TypeData::Const(yb, yp)) => {
            compare(xb, yb).then_with(|| xp.cmp(yp))
        }
        (TypeData::Specialized(x), TypeData::Specialized(y)) => x
            .generic
            .raw()
            .cmp(&y.generic.raw())
            .then_with(|| x.env.bindings().len().cmp(&y.env.bindings().len())),
        (TypeData::TypeVar(x), TypeData::TypeVar(y)) => x.raw().cmp(&y.raw()),
        _ => unreachable!("kind_rank already equalized the discriminant"),
    }
}

/// Sort and de-duplicate a multiset of members into `TypeOrdering`
/// canonical form, matching `createUnionType`'s `std::sort` +
/// `TypeKey(members)` dedup-by-interning. `spec.md` §8: "For every union
/// constructed from multiset M, its stored members are `sort(dedup(M))`
/// under `TypeOrdering`."
#[must_use]
pub fn sort_dedup(mut members: Vec<Type>) -> Vec<Type> {
    members.sort_by(compare);
    members.dedup_by(|a, b| a == b);
    members
}
