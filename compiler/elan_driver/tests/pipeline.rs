//! End-to-end exercise of `Compiler`/`Phase` over a real filesystem root:
//! two `.sp` files under a `tempfile::tempdir()`, discovered through a
//! real `FileSystemImporter` (not a synthetic `ModuleImporter` stub, as
//! every other test in this workspace uses), parsed by a fixture
//! [`SourceParser`] that hands back pre-built syntax trees keyed by file
//! stem instead of lexing anything - `.sp` lexing/parsing stays out of
//! scope, but the driver wiring around a real directory tree
//! (`add_root`/`import_module`/`run_phase` across package and file
//! boundaries) is exactly what this crate owns and `elanc` depends on.
//!
//! Grounded on `nameresolution.rs`'s own `#[cfg(test)]` fixtures in
//! `elan_check` (same `NoImports`/`loc()` idiom) for the parts that stay
//! synthetic, and on `module_path.rs`'s `missing_path_resolves_to_none`
//! test for driving a real `FileSystemImporter` off a `Path`.

use std::fs;

use elan_check::{BuildGraphPass, DefnTable, NameResolutionPass, PendingTypes};
use elan_driver::{Compiler, Phase, SourceParseError, SourceParser};
use elan_ir::{Location, Name, NameInterner, Path};
use elan_semantic::{LookupContext, MemberId, MemberPayload, MemberSmallVec, ModuleImporter, Scope, SemanticArena, StandardScope};
use elan_syntax::{Defn, Expr, FunctionDefn, IdentExpr, Import, Module, Modifiers, TypeDefn, TypeDefnKind, Visibility};
use elan_types::TypeStore;

fn loc() -> Location {
    Location::on_line(Name::EMPTY, 1, 1, 1)
}

/// Module `app.base`: one public class `Base` with one method `ping`.
fn base_module(interner: &mut NameInterner) -> Module {
    let ping = interner.intern("ping");
    Module {
        name: interner.intern("base"),
        source_path: Path::new("base.sp"),
        imports: Vec::new(),
        members: vec![Defn::Type(TypeDefn {
            name: interner.intern("Base"),
            kind: TypeDefnKind::Class,
            type_params: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
            members: vec![Defn::Function(FunctionDefn {
                name: ping,
                type_params: Vec::new(),
                params: Vec::new(),
                return_type: None,
                where_clauses: Vec::new(),
                visibility: Visibility::Public,
                modifiers: Modifiers::empty(),
                location: loc(),
            })],
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            location: loc(),
        })],
    }
}

/// Module `app.derived`: imports `app.base.Base` by its full dotted path
/// (binding under the bare name `Base`, per `NameResolutionPass::
/// resolve_imports`) and declares `class Derived : Base`.
fn derived_module(interner: &mut NameInterner) -> Module {
    let import_path = vec![interner.intern("app"), interner.intern("base"), interner.intern("Base")];
    let base_name = interner.intern("Base");
    Module {
        name: interner.intern("derived"),
        source_path: Path::new("derived.sp"),
        imports: vec![Import {
            path: import_path,
            alias: None,
            location: loc(),
        }],
        members: vec![Defn::Type(TypeDefn {
            name: interner.intern("Derived"),
            kind: TypeDefnKind::Class,
            type_params: Vec::new(),
            super_type: Some(Expr::Ident(IdentExpr { name: base_name, location: loc() })),
            interfaces: Vec::new(),
            members: Vec::new(),
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            location: loc(),
        })],
    }
}

struct FixtureParser;

impl SourceParser for FixtureParser {
    fn parse_module(&mut self, path: &Path, interner: &mut NameInterner) -> Result<Module, SourceParseError> {
        match path.stem().as_str() {
            "base" => Ok(base_module(interner)),
            "derived" => Ok(derived_module(interner)),
            other => Err(SourceParseError::Parse {
                path: path.to_string_lossy(),
                message: format!("no fixture wired up for '{other}'"),
            }),
        }
    }
}

struct NoImports;
impl ModuleImporter for NoImports {
    fn import_module_from_source(&mut self, _path: &Path, _arena: &mut SemanticArena, _interner: &mut NameInterner) -> Option<MemberId> {
        None
    }
}

/// Finds the single member bound to `name` in `scope`. `StandardScope`
/// and `InheritedScope`'s `lookup_name` never read any field of the
/// `LookupContext` they're handed (only `ModulePathScope`/
/// `DirectoryScope` touch `ctx.arena`/`ctx.importer`, to materialize
/// filesystem entries) - so a throwaway scratch context, backed by a
/// fresh empty arena, is sound here and sidesteps borrowing the real
/// arena twice (once to clone the scope out of a Member's payload, once
/// to hand `lookup_name` a `&mut LookupContext` into that same arena).
fn lookup_one(scope: &dyn Scope, name: Name) -> Option<MemberId> {
    let mut arena = SemanticArena::new();
    let mut interner = NameInterner::new();
    let types = TypeStore::new();
    let mut importer = NoImports;
    let reporter = elan_diagnostic::Reporter::new();
    let mut ctx = LookupContext {
        arena: &mut arena,
        interner: &mut interner,
        types: &types,
        importer: &mut importer,
        reporter: &reporter,
    };
    let mut out = MemberSmallVec::new();
    scope.lookup_name(name, &mut ctx, &mut out);
    out.first().copied()
}

fn find_in_module(arena: &SemanticArena, module: MemberId, name: Name) -> Option<MemberId> {
    let scope: StandardScope = match &arena.get(module).payload {
        MemberPayload::Module(data) => data.member_scope.clone(),
        _ => return None,
    };
    lookup_one(&scope, name)
}

#[test]
fn build_graph_and_name_resolution_wire_across_real_files_and_modules() {
    let root = tempfile::tempdir().expect("tempdir");
    let app_dir = root.path().join("app");
    fs::create_dir(&app_dir).expect("mkdir app");
    fs::write(app_dir.join("base.sp"), "").expect("write base.sp");
    fs::write(app_dir.join("derived.sp"), "").expect("write derived.sp");

    let mut compiler = Compiler::new(Box::new(FixtureParser));
    compiler.add_root(Path::new(root.path().to_path_buf()));

    let base_module_id = compiler.import_module("app.base").expect("app.base resolves through FileSystemImporter");
    let derived_module_id = compiler.import_module("app.derived").expect("app.derived resolves through FileSystemImporter");
    assert_eq!(compiler.module_count(), 2);

    let defs = DefnTable::new();
    let pending = PendingTypes::new();
    let mut build_graph = Phase::new("BuildGraph", vec![Box::new(BuildGraphPass::new(defs.clone(), pending.clone()))]);
    let mut name_resolution = Phase::new("NameResolution", vec![Box::new(NameResolutionPass::new(defs, pending))]);

    compiler.run_phase(&mut build_graph);
    compiler.run_phase(&mut name_resolution);

    assert!(
        !compiler.context.reporter.has_errors(),
        "unexpected diagnostics: {:?}",
        compiler.context.reporter.diagnostics()
    );

    let base_name = compiler.context.interner.intern("Base");
    let derived_name = compiler.context.interner.intern("Derived");
    let ping_name = compiler.context.interner.intern("ping");

    let base_type = find_in_module(&compiler.context.arena, base_module_id, base_name).expect("Base type defn registered in base's module scope");
    let derived_type =
        find_in_module(&compiler.context.arena, derived_module_id, derived_name).expect("Derived type defn registered in derived's module scope");

    let derived_inherited = match &compiler.context.arena.get(derived_type).payload {
        MemberPayload::TypeDefn(data) => &data.inherited_scope,
        _ => panic!("expected Derived to be a TypeDefn"),
    };
    let inherited_ping = lookup_one(derived_inherited, ping_name);
    assert!(inherited_ping.is_some(), "Derived's inherited_scope should reach Base::ping across the module boundary");

    let base_member_scope = match &compiler.context.arena.get(base_type).payload {
        MemberPayload::TypeDefn(data) => data.member_scope.clone(),
        _ => panic!("expected Base to be a TypeDefn"),
    };
    let base_ping = lookup_one(&base_member_scope, ping_name);
    assert_eq!(inherited_ping, base_ping, "the inherited ping should be the very same Member as Base's own ping");
}

#[test]
fn importing_a_path_with_no_matching_file_reports_nothing_found() {
    let root = tempfile::tempdir().expect("tempdir");
    fs::create_dir(root.path().join("app")).expect("mkdir app");

    let mut compiler = Compiler::new(Box::new(FixtureParser));
    compiler.add_root(Path::new(root.path().to_path_buf()));

    assert!(compiler.import_module("app.nonexistent").is_none());
    assert_eq!(compiler.module_count(), 0);
}
