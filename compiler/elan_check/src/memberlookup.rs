//! `MemberLookup`: given an already-resolved base Member, finds the
//! scope its members live in and looks a name up there, per `spec.md`
//! §4.8.3.
//!
//! Grounded on `sema/names/memberlookup.cpp`.

use elan_ir::Name;
use elan_semantic::scope::MemberSmallVec;
use elan_semantic::{scope_for_drill, unwrap_specialized, LookupContext, MemberId, MemberPayload};

use crate::defn_table::DefnTable;

pub struct MemberLookup;

impl MemberLookup {
    /// Looks `name` up as a member of `base`. Package/Module/TypeDefn
    /// delegate straight to the scope the base exposes for drilling.
    /// TypeParameter has no member scope of its own: it recurses through
    /// each of its subtype constraints' backing Members instead,
    /// deduplicating hits by identity and preserving first-seen order.
    /// Function/Property/Value have no members at all. `Specialized` is
    /// unreachable - callers always unwrap it first.
    pub fn lookup(ctx: &mut LookupContext, defs: &DefnTable, base: MemberId, name: Name) -> MemberSmallVec {
        let base = unwrap_specialized(ctx.arena, base);
        let kind = arena_kind(ctx, base);
        match kind {
            LookupKind::Drill => {
                let mut out = MemberSmallVec::new();
                if let Some(scope) = scope_for_drill(ctx.arena, base) {
                    scope.lookup_name(name, ctx, &mut out);
                }
                out
            }
            LookupKind::TypeParameter(constraints) => {
                let mut out = MemberSmallVec::new();
                for constraint in &constraints {
                    let Some(constraint_member) = defs.member_for(constraint) else {
                        continue;
                    };
                    for hit in Self::lookup(ctx, defs, constraint_member, name) {
                        if !out.contains(&hit) {
                            out.push(hit);
                        }
                    }
                }
                out
            }
            LookupKind::None => MemberSmallVec::new(),
        }
    }
}

enum LookupKind {
    Drill,
    TypeParameter(Vec<elan_types::Type>),
    None,
}

fn arena_kind(ctx: &LookupContext, base: MemberId) -> LookupKind {
    match &ctx.arena.get(base).payload {
        MemberPayload::Package(_) | MemberPayload::Module(_) | MemberPayload::TypeDefn(_) => LookupKind::Drill,
        MemberPayload::TypeParameter(data) => LookupKind::TypeParameter(data.subtype_constraints.clone()),
        MemberPayload::Function(_) | MemberPayload::Property(_) | MemberPayload::Value(_) => LookupKind::None,
        MemberPayload::Specialized(_) => {
            unreachable!("unwrap_specialized already removed Specialized wrappers")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elan_ir::{NameInterner, Path};
    use elan_semantic::{DirectoryScope, MemberData, ModuleData, Modifiers, PackageData, Scope, ScopeKind, StandardScope, Visibility};
    use elan_semantic::{SemanticArena, ValueData, ValueKind};
    use elan_types::TypeStore;

    struct NoImports;
    impl elan_semantic::ModuleImporter for NoImports {
        fn import_module_from_source(
            &mut self,
            _path: &Path,
            _arena: &mut SemanticArena,
            _interner: &mut NameInterner,
        ) -> Option<MemberId> {
            None
        }
    }

    #[test]
    fn module_member_scope_lookup_finds_child() {
        let mut arena = SemanticArena::new();
        let mut interner = NameInterner::new();
        let types = TypeStore::new();
        let defs = DefnTable::new();
        let mut importer = NoImports;

        let mut member_scope = StandardScope::new(ScopeKind::Default);
        let child_name = interner.intern("x");
        let child = arena.alloc(MemberData {
            name: child_name,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            payload: MemberPayload::Value(ValueData {
                kind: ValueKind::Let,
                value_type: None,
                initialized: true,
            }),
        });
        member_scope.add_member(child_name, child);

        let module = arena.alloc(MemberData {
            name: Name::EMPTY,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            payload: MemberPayload::Module(ModuleData {
                source_path: Path::new("m.sp"),
                member_scope,
                import_scope: StandardScope::new(ScopeKind::Default),
            }),
        });

        let reporter = elan_diagnostic::Reporter::new();
        let mut ctx = LookupContext {
            arena: &mut arena,
            interner: &mut interner,
            types: &types,
            importer: &mut importer,
            reporter: &reporter,
        };
        let hits = MemberLookup::lookup(&mut ctx, &defs, module, child_name);
        assert_eq!(hits.as_slice(), &[child]);
    }

    #[test]
    fn value_member_has_no_members() {
        let mut arena = SemanticArena::new();
        let mut interner = NameInterner::new();
        let types = TypeStore::new();
        let defs = DefnTable::new();
        let mut importer = NoImports;
        let name = interner.intern("x");
        let value = arena.alloc(MemberData {
            name,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            payload: MemberPayload::Value(ValueData {
                kind: ValueKind::Let,
                value_type: None,
                initialized: true,
            }),
        });
        let reporter = elan_diagnostic::Reporter::new();
        let mut ctx = LookupContext {
            arena: &mut arena,
            interner: &mut interner,
            types: &types,
            importer: &mut importer,
            reporter: &reporter,
        };
        let hits = MemberLookup::lookup(&mut ctx, &defs, value, name);
        assert!(hits.is_empty());
    }

    #[test]
    fn directory_scope_package_lookup_materializes_module() {
        let dir = std::env::temp_dir().join(format!("elan_check_memberlookup_test_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let _ = std::fs::write(dir.join("child.sp"), "");
        let mut arena = SemanticArena::new();
        let mut interner = NameInterner::new();
        let types = TypeStore::new();
        let defs = DefnTable::new();

        struct YieldsModule;
        impl elan_semantic::ModuleImporter for YieldsModule {
            fn import_module_from_source(
                &mut self,
                _path: &Path,
                arena: &mut SemanticArena,
                _interner: &mut NameInterner,
            ) -> Option<MemberId> {
                Some(arena.alloc(MemberData {
                    name: Name::EMPTY,
                    defined_in: None,
                    location: None,
                    visibility: Visibility::Public,
                    modifiers: Modifiers::empty(),
                    payload: MemberPayload::Module(ModuleData {
                        source_path: Path::new("child.sp"),
                        member_scope: StandardScope::new(ScopeKind::Default),
                        import_scope: StandardScope::new(ScopeKind::Default),
                    }),
                }))
            }
        }
        let mut importer = YieldsModule;

        let root_path = Path::new(dir.to_str().expect("utf8 tmp dir"));
        let pkg = arena.alloc(MemberData {
            name: Name::EMPTY,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            payload: MemberPayload::Package(PackageData {
                scope: DirectoryScope::new(root_path),
            }),
        });

        let child_name = interner.intern("child");
        let reporter = elan_diagnostic::Reporter::new();
        let mut ctx = LookupContext {
            arena: &mut arena,
            interner: &mut interner,
            types: &types,
            importer: &mut importer,
            reporter: &reporter,
        };
        let hits = MemberLookup::lookup(&mut ctx, &defs, pkg, child_name);
        assert_eq!(hits.len(), 1);
        drop(ctx);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
