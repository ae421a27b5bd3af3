//! `SpecializedScope`: wraps every result of a primary scope's lookup in
//! a `Specialized` Member bound to a generic environment.
//!
//! Grounded on `scope/specializedscope.cpp`: `lookupName` delegates to
//! `primary`, then maps each hit through `TypeStore::specializeMember`
//! before returning it (`spec.md` §4.3).

use elan_ir::Name;
use elan_types::Env;

use super::{LookupContext, MemberSmallVec, Scope, ScopeKind};
use crate::member::{MemberData, MemberId, SpecializedData, MemberPayload};

pub struct SpecializedScope {
    primary: Box<dyn Scope>,
    env: Env,
}

impl SpecializedScope {
    #[must_use]
    pub fn new(primary: Box<dyn Scope>, env: Env) -> Self {
        SpecializedScope { primary, env }
    }
}

/// Wraps `member` in a fresh `Specialized` Member bound to `env`, copying
/// its name/location/visibility/modifiers so a single `unwrap_specialized`
/// still sees the original's position for visibility purposes.
pub fn specialize_member(ctx: &mut LookupContext, member: MemberId, env: Env) -> MemberId {
    let source = ctx.arena.get(member);
    let data = MemberData {
        name: source.name,
        defined_in: source.defined_in,
        location: source.location,
        visibility: source.visibility,
        modifiers: source.modifiers,
        payload: MemberPayload::Specialized(SpecializedData { generic: member, env }),
    };
    ctx.arena.alloc(data)
}

impl Scope for SpecializedScope {
    fn add_member(&mut self, name: Name, member: MemberId) {
        self.primary.add_member(name, member);
    }

    fn lookup_name(&self, name: Name, ctx: &mut LookupContext, out: &mut MemberSmallVec) {
        let mut hits = MemberSmallVec::new();
        self.primary.lookup_name(name, ctx, &mut hits);
        for hit in hits {
            out.push(specialize_member(ctx, hit, self.env.clone()));
        }
    }

    fn for_all_names(&self, f: &mut dyn FnMut(Name)) {
        self.primary.for_all_names(f);
    }

    fn scope_kind(&self) -> ScopeKind {
        self.primary.scope_kind()
    }
}
