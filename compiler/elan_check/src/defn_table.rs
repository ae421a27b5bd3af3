//! `DefnTable`: a `DefnId -> Member` back-reference.
//!
//! `elan_types::DefnId` is deliberately opaque to `elan_types` itself -
//! see that crate's module doc. `BuildGraphPass` mints a fresh `DefnId`
//! for every `TypeDefn`/`TypeParameter` it creates and registers the
//! resulting Member here; `MemberLookup`'s `TypeParameter` case (`spec.md`
//! §4.8.3) uses it to map a subtype constraint's `Type` back to the
//! Member whose scope it should recurse into. Shared (`Rc<RefCell<_>>`)
//! between the two passes for the same reason `elan_semantic::member`'s
//! module doc gives for its own `MemberId -> ast node` side table: this
//! is a pass concern, not a graph-shape one, so it doesn't belong on
//! `MemberData`/`TypeData` themselves.

use std::cell::RefCell;
use std::rc::Rc;

use elan_semantic::MemberId;
use elan_types::{DefnId, Type, TypeData};
use rustc_hash::FxHashMap;

#[derive(Default)]
struct Inner {
    next: u32,
    members: FxHashMap<DefnId, MemberId>,
}

#[derive(Clone, Default)]
pub struct DefnTable(Rc<RefCell<Inner>>);

impl DefnTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh `DefnId`, distinct from every previously minted one
    /// from this table.
    pub fn fresh_id(&self) -> DefnId {
        let mut inner = self.0.borrow_mut();
        let id = DefnId::new(inner.next);
        inner.next += 1;
        id
    }

    pub fn register(&self, defn: DefnId, member: MemberId) {
        self.0.borrow_mut().members.insert(defn, member);
    }

    #[must_use]
    pub fn get(&self, defn: DefnId) -> Option<MemberId> {
        self.0.borrow().members.get(&defn).copied()
    }

    /// Resolves a `Type`'s backing Member, if it has one: a `Composite`
    /// through its `defn`, a `TypeVar` through its type-parameter id.
    /// Every other `TypeData` variant (primitive, union, tuple, ...) has
    /// no Member and yields `None`.
    #[must_use]
    pub fn member_for(&self, ty: &Type) -> Option<MemberId> {
        match ty.data() {
            TypeData::Composite(c) => self.get(c.defn),
            TypeData::TypeVar(id) => self.get(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elan_semantic::{MemberData, Modifiers, PackageData, Visibility};

    #[test]
    fn fresh_ids_are_distinct() {
        let table = DefnTable::new();
        assert_ne!(table.fresh_id(), table.fresh_id());
    }

    #[test]
    fn registered_member_round_trips() {
        let table = DefnTable::new();
        let mut arena = elan_semantic::SemanticArena::new();
        let member = arena.alloc(MemberData {
            name: elan_ir::Name::EMPTY,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            payload: elan_semantic::MemberPayload::Package(PackageData {
                scope: elan_semantic::DirectoryScope::new(elan_ir::Path::new(".")),
            }),
        });
        let id = table.fresh_id();
        table.register(id, member);
        assert_eq!(table.get(id), Some(member));
    }
}
