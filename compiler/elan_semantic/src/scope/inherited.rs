//! `InheritedScope`: a composite's declared members layered over its
//! inherited ones.
//!
//! Grounded on `scope/inheritedscope.cpp`: if the primary (declared)
//! scope has any hit, only those are returned - no shadowing leaks
//! through from a base class; otherwise every secondary (inherited)
//! scope is consulted and results merged, deduplicated by identity,
//! preserving first-seen order (`spec.md` §4.3).

use elan_ir::Name;

use super::standard::StandardScope;
use super::{LookupContext, MemberSmallVec, Scope, ScopeKind};
use crate::member::MemberId;

pub struct InheritedScope {
    primary: StandardScope,
    secondary: Vec<StandardScope>,
}

impl InheritedScope {
    #[must_use]
    pub fn new(primary: StandardScope) -> Self {
        InheritedScope {
            primary,
            secondary: Vec::new(),
        }
    }

    pub fn add_secondary(&mut self, scope: StandardScope) {
        self.secondary.push(scope);
    }

    #[must_use]
    pub fn primary(&self) -> &StandardScope {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut StandardScope {
        &mut self.primary
    }
}

impl Scope for InheritedScope {
    fn add_member(&mut self, name: Name, member: MemberId) {
        self.primary.add_member(name, member);
    }

    fn lookup_name(&self, name: Name, ctx: &mut LookupContext, out: &mut MemberSmallVec) {
        let mut primary_hits = MemberSmallVec::new();
        self.primary.lookup_name(name, ctx, &mut primary_hits);
        if !primary_hits.is_empty() {
            out.extend(primary_hits);
            return;
        }
        let mut seen = MemberSmallVec::new();
        for scope in &self.secondary {
            let mut hits = MemberSmallVec::new();
            scope.lookup_name(name, ctx, &mut hits);
            for hit in hits {
                if !seen.contains(&hit) {
                    seen.push(hit);
                    out.push(hit);
                }
            }
        }
    }

    fn for_all_names(&self, f: &mut dyn FnMut(Name)) {
        self.primary.for_all_names(f);
        for scope in &self.secondary {
            scope.for_all_names(f);
        }
    }

    fn scope_kind(&self) -> ScopeKind {
        ScopeKind::Default
    }
}
