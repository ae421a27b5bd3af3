//! elan_syntax - the syntax tree Build-Graph and Name-Resolution walk.
//!
//! This is deliberately a small stand-in for a full parser's AST
//! (`spec.md` §1: "the surrounding syntax tree, lexer, parser... are out
//! of scope and are treated only as external collaborators via their
//! interfaces"). It carries exactly the node shapes `buildgraph.cpp` and
//! `nameresolution.cpp` switch on: module/import/definition structure in
//! `items`, the four expression forms `ResolveExprs` handles in `expr`,
//! and the eight `where`-clause forms `ResolveRequirements` handles in
//! `requirement`.

mod expr;
mod items;
mod requirement;

pub use expr::{BuiltinTypeExpr, BuiltinTypeKind, Expr, IdentExpr, MemberRefExpr, SpecializeExpr};
pub use items::{
    Defn, FunctionDefn, Import, Modifiers, Module, Param, PropertyDefn, TypeDefn, TypeDefnKind, TypeParam, ValueDefn,
    ValueDefnKind, Visibility,
};
pub use requirement::Requirement;

#[cfg(test)]
mod tests {
    use super::*;
    use elan_ir::{Location, Name, NameInterner, Path};

    #[test]
    fn module_holds_its_members_in_declaration_order() {
        let mut interner = NameInterner::new();
        let file = interner.intern("m.sp");
        let loc = Location::on_line(file, 1, 1, 1);
        let a = interner.intern("a");
        let b = interner.intern("b");
        let module = Module {
            name: interner.intern("m"),
            source_path: Path::new("m.sp"),
            imports: Vec::new(),
            members: vec![
                Defn::Value(ValueDefn {
                    name: a,
                    kind: ValueDefnKind::Let,
                    value_type: None,
                    visibility: Visibility::Public,
                    modifiers: Modifiers::empty(),
                    location: loc,
                }),
                Defn::Value(ValueDefn {
                    name: b,
                    kind: ValueDefnKind::Var,
                    value_type: None,
                    visibility: Visibility::Private,
                    modifiers: Modifiers::empty(),
                    location: loc,
                }),
            ],
        };
        let names: Vec<Name> = module.members.iter().map(Defn::name).collect();
        assert_eq!(names, vec![a, b]);
    }

    #[test]
    fn member_ref_location_is_its_own_not_the_base() {
        let mut interner = NameInterner::new();
        let file = interner.intern("m.sp");
        let base_loc = Location::on_line(file, 1, 1, 5);
        let ref_loc = Location::on_line(file, 1, 6, 10);
        let base_name = interner.intern("Base");
        let member_ref = Expr::MemberRef(MemberRefExpr {
            base: Box::new(Expr::Ident(IdentExpr {
                name: base_name,
                location: base_loc,
            })),
            name: interner.intern("field"),
            location: ref_loc,
        });
        assert_eq!(member_ref.location(), ref_loc);
    }
}
