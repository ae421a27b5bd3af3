//! `StandardScope`: an in-memory `name -> [Member]` multimap.
//!
//! Grounded on `scope/stdscope.h`'s `StandardScope` (insertion-order
//! multimap over `llvm::StringMap`-like storage) and used directly for
//! member scopes, import scopes, type-parameter scopes, parameter
//! scopes, required-method scopes and intercept scopes (`spec.md` §3.1).

use elan_ir::Name;
use rustc_hash::FxHashMap;

use super::{LookupContext, MemberSmallVec, Scope, ScopeKind};
use crate::member::MemberId;

#[derive(Clone)]
pub struct StandardScope {
    kind: ScopeKind,
    /// Insertion order is significant (`spec.md` §4.3: "lookupName
    /// returns entries in insertion order"), so each bucket is a `Vec`,
    /// not a `Set`.
    entries: FxHashMap<Name, Vec<MemberId>>,
    /// Preserves the order names were first added, for `for_all_names`.
    order: Vec<Name>,
}

impl StandardScope {
    #[must_use]
    pub fn new(kind: ScopeKind) -> Self {
        StandardScope {
            kind,
            entries: FxHashMap::default(),
            order: Vec::new(),
        }
    }
}

impl Scope for StandardScope {
    fn add_member(&mut self, name: Name, member: MemberId) {
        if !self.entries.contains_key(&name) {
            self.order.push(name);
        }
        self.entries.entry(name).or_default().push(member);
    }

    fn lookup_name(&self, name: Name, _ctx: &mut LookupContext, out: &mut MemberSmallVec) {
        if let Some(bucket) = self.entries.get(&name) {
            out.extend(bucket.iter().copied());
        }
    }

    fn for_all_names(&self, f: &mut dyn FnMut(Name)) {
        for &name in &self.order {
            f(name);
        }
    }

    fn scope_kind(&self) -> ScopeKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elan_ir::NameInterner;
    use elan_types::TypeStore;

    struct NoopImporter;
    impl super::super::ModuleImporter for NoopImporter {
        fn import_module_from_source(
            &mut self,
            _path: &elan_ir::Path,
            _arena: &mut crate::member::SemanticArena,
            _interner: &mut NameInterner,
        ) -> Option<MemberId> {
            None
        }
    }

    #[test]
    fn lookup_returns_entries_in_insertion_order() {
        let mut interner = NameInterner::new();
        let a = interner.intern("a");
        let mut scope = StandardScope::new(ScopeKind::Default);
        let mut arena = crate::member::SemanticArena::new();
        let m1 = arena.alloc(crate::member::MemberData {
            name: a,
            defined_in: None,
            location: None,
            visibility: crate::visibility::Visibility::Public,
            modifiers: crate::visibility::Modifiers::empty(),
            payload: crate::member::MemberPayload::Value(crate::member::ValueData {
                kind: crate::member::ValueKind::Let,
                value_type: None,
                initialized: true,
            }),
        });
        scope.add_member(a, m1);
        let types = TypeStore::new();
        let mut importer = NoopImporter;
        let reporter = elan_diagnostic::Reporter::new();
        let mut ctx = LookupContext {
            arena: &mut arena,
            interner: &mut interner,
            types: &types,
            importer: &mut importer,
            reporter: &reporter,
        };
        let mut out = MemberSmallVec::new();
        scope.lookup_name(a, &mut ctx, &mut out);
        assert_eq!(out.as_slice(), &[m1]);
    }

    #[test]
    fn for_all_names_emits_names_with_nonempty_lookup() {
        let mut interner = NameInterner::new();
        let a = interner.intern("a");
        let mut scope = StandardScope::new(ScopeKind::Default);
        let mut arena = crate::member::SemanticArena::new();
        let m1 = arena.alloc(crate::member::MemberData {
            name: a,
            defined_in: None,
            location: None,
            visibility: crate::visibility::Visibility::Public,
            modifiers: crate::visibility::Modifiers::empty(),
            payload: crate::member::MemberPayload::Value(crate::member::ValueData {
                kind: crate::member::ValueKind::Let,
                value_type: None,
                initialized: true,
            }),
        });
        scope.add_member(a, m1);
        let mut seen = Vec::new();
        scope.for_all_names(&mut |n| seen.push(n));
        assert_eq!(seen, vec![a]);
    }
}
