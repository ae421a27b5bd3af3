//! `PendingTypes`: the `MemberId -> ast node` side table `elan_semantic`'s
//! module doc promises Build-Graph keeps for Name-Resolution to consume.
//!
//! Build-Graph mints Members before any name is resolvable (a `TypeDefn`'s
//! supertype may name a sibling not yet built), so it cannot resolve a
//! value's type expression, a function's return type, or a generic's
//! subtype constraints at construction time. It records the syntax
//! (`Expr`/`Requirement`) each Member still needs resolved against here;
//! Name-Resolution looks each one up once it has the right scope stack and
//! subject in place, resolves it, and writes the result back onto the
//! Member.

use std::cell::RefCell;
use std::rc::Rc;

use elan_semantic::MemberId;
use elan_syntax::{Expr, Requirement};
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct PendingEntry {
    /// `ValueDefn.value_type` / `Param.param_type` / `PropertyDefn.value_type`
    /// / `FunctionDefn.return_type` - whichever single type expression this
    /// Member's kind carries.
    pub type_expr: Option<Expr>,
    pub super_type: Option<Expr>,
    pub interfaces: Vec<Expr>,
    pub subtype_constraints: Vec<Expr>,
    pub where_clauses: Vec<Requirement>,
}

#[derive(Clone, Default)]
pub struct PendingTypes(Rc<RefCell<FxHashMap<MemberId, PendingEntry>>>);

impl PendingTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type_expr(&self, member: MemberId, expr: Expr) {
        self.0.borrow_mut().entry(member).or_default().type_expr = Some(expr);
    }

    pub fn set_super_type(&self, member: MemberId, expr: Expr) {
        self.0.borrow_mut().entry(member).or_default().super_type = Some(expr);
    }

    pub fn add_interface(&self, member: MemberId, expr: Expr) {
        self.0.borrow_mut().entry(member).or_default().interfaces.push(expr);
    }

    pub fn add_subtype_constraint(&self, member: MemberId, expr: Expr) {
        self.0.borrow_mut().entry(member).or_default().subtype_constraints.push(expr);
    }

    pub fn set_where_clauses(&self, member: MemberId, clauses: Vec<Requirement>) {
        if clauses.is_empty() {
            return;
        }
        self.0.borrow_mut().entry(member).or_default().where_clauses = clauses;
    }

    /// Removes and returns everything recorded for `member`. Name
    /// Resolution visits each Member exactly once, so there's nothing to
    /// gain by leaving the entry behind.
    #[must_use]
    pub fn take(&self, member: MemberId) -> PendingEntry {
        self.0.borrow_mut().remove(&member).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elan_ir::{Location, Name};
    use elan_semantic::{MemberData, MemberPayload, Modifiers, PackageData, SemanticArena, Visibility};
    use elan_syntax::IdentExpr;

    fn dummy_member() -> MemberId {
        let mut arena = SemanticArena::new();
        arena.alloc(MemberData {
            name: Name::EMPTY,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            payload: MemberPayload::Package(PackageData {
                scope: elan_semantic::DirectoryScope::new(elan_ir::Path::new(".")),
            }),
        })
    }

    #[test]
    fn take_returns_recorded_entry_and_clears_it() {
        let pending = PendingTypes::new();
        let member = dummy_member();
        let expr = Expr::Ident(IdentExpr {
            name: Name::EMPTY,
            location: Location::on_line(Name::EMPTY, 1, 1, 1),
        });
        pending.set_type_expr(member, expr);
        let entry = pending.take(member);
        assert!(entry.type_expr.is_some());
        let second = pending.take(member);
        assert!(second.type_expr.is_none());
    }
}
