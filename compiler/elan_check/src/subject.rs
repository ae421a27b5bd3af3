//! `Genus`/`MemberSet`/`Subject`/`ResolvedExpr`: the name-resolution
//! pass's own classification types. These live here rather than in
//! `elan_semantic` because they're computed fresh during each resolution
//! (`spec.md` §4.8.2/§4.8.4), not stored on a `Member`.
//!
//! Grounded on `sema/names/subject.cpp` (`isVisible`) and
//! `sema/names/fillmemberset.cpp` (`Genus`, `MemberSet`).

use elan_ir::{Location, Name};
use elan_semantic::scope::MemberSmallVec;
use elan_semantic::{enclosing_chain, member_type, unwrap_specialized, MemberId, MemberPayload, SemanticArena, Visibility};
use elan_types::{Type, TypeStore};

/// A member set's classification, per `spec.md` §4.8.2.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Genus {
    Namespace,
    Type,
    Variable,
    Function,
    /// No candidate at all (empty lookup result).
    Incomplete,
    /// Candidates disagree on genus.
    Inconsistent,
}

/// The classified result of `FillMemberSet::fill`: a name, the stem
/// Member it was looked up against (`None` for an unqualified lookup),
/// its genus, and the surviving (visible) members.
pub struct MemberSet {
    pub name: Name,
    pub stem: Option<MemberId>,
    pub location: Location,
    pub genus: Genus,
    pub members: MemberSmallVec,
}

/// Either a `MemberSet` (the common case: an identifier or member
/// reference resolved to some Members) or a bare `Type` (a built-in type
/// tag, which has no backing Member in this port - see `elan_types`'s
/// module doc on why primitives aren't `TypeDefn`s).
pub enum ResolvedExpr {
    Members(MemberSet),
    Builtin(Type),
}

impl ResolvedExpr {
    #[must_use]
    pub fn genus(&self) -> Genus {
        match self {
            ResolvedExpr::Members(set) => set.genus,
            ResolvedExpr::Builtin(_) => Genus::Type,
        }
    }

    /// Projects this resolution to a concrete `Type`, for callers that
    /// found this expression in type position (`spec.md` §4.8.1: the
    /// same four expression shapes serve both value and type position).
    /// Falls back to the Type Store's error sentinel when the
    /// resolution can't name exactly one type.
    #[must_use]
    pub fn as_type(&self, arena: &SemanticArena, types: &TypeStore) -> Type {
        match self {
            ResolvedExpr::Builtin(ty) => ty.clone(),
            ResolvedExpr::Members(set) => match set.members.as_slice() {
                [only] => member_type(arena, types, *only).unwrap_or_else(|_| types.error()),
                _ => types.error(),
            },
        }
    }
}

/// The Member currently being resolved - the reference point
/// `is_visible` checks every lookup candidate against.
#[derive(Copy, Clone)]
pub struct Subject(pub MemberId);

impl Subject {
    /// `isVisible`: unwraps `Specialized`, then always allows namespace
    /// kinds and `Public` members through; a `Private`/`Protected`
    /// member is visible only from within its own enclosing chain, and
    /// a `Protected` one is additionally visible from any type that
    /// inherits from the one declaring it.
    #[must_use]
    pub fn is_visible(&self, arena: &SemanticArena, target: MemberId) -> bool {
        let target = unwrap_specialized(arena, target);
        if matches!(arena.get(target).payload, MemberPayload::Package(_) | MemberPayload::Module(_)) {
            return true;
        }
        match arena.get(target).visibility {
            Visibility::Public => true,
            Visibility::Private => self.defined_alongside(arena, target),
            Visibility::Protected => self.defined_alongside(arena, target) || self.inherits_owner_of(arena, target),
        }
    }

    fn defined_alongside(&self, arena: &SemanticArena, target: MemberId) -> bool {
        let Some(owner) = arena.get(target).defined_in else {
            return false;
        };
        enclosing_chain(arena, self.0).contains(&owner)
    }

    /// Protected access through inheritance: some type enclosing the
    /// subject inherits from the composite that declares `target`.
    fn inherits_owner_of(&self, arena: &SemanticArena, target: MemberId) -> bool {
        let Some(owner) = arena.get(target).defined_in else {
            return false;
        };
        let MemberPayload::TypeDefn(owner_defn) = &arena.get(owner).payload else {
            return false;
        };
        let owner_ty = owner_defn.ty.clone();
        enclosing_chain(arena, self.0).iter().any(|&id| match &arena.get(id).payload {
            MemberPayload::TypeDefn(t) => t.ty.inherits_from(&owner_ty),
            _ => false,
        })
    }
}
