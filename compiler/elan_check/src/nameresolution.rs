//! `NameResolutionPass`: walks the Member graph Build-Graph produced,
//! resolving every pending type expression, supertype, interface, and
//! `where`-clause against the scopes that graph implies, per `spec.md`
//! §4.8.
//!
//! Grounded on `sema/passes/nameresolution.cpp`.

use elan_diagnostic::{ErrorCode, Reporter};
use elan_driver::{Pass, PassContext};
use elan_semantic::scope::MemberSmallVec;
use elan_semantic::{
    InheritedScope, LookupContext, MemberId, MemberKind, MemberPayload, Scope, ScopeKind, ScopeStack, StandardScope,
};
use elan_syntax::{Expr, Import, Requirement};
use elan_types::Type;

use crate::defn_table::DefnTable;
use crate::pending::PendingTypes;
use crate::resolveexprs::ResolveExprs;
use crate::resolverequirements::ResolveRequirements;
use crate::subject::{ResolvedExpr, Subject};

/// Consumes the side table [`crate::buildgraph::BuildGraphPass`] filled
/// and writes resolved types back onto the Member graph. Shares its
/// `DefnTable`/`PendingTypes` handles with that pass (both `Rc`-backed) -
/// the two passes cooperate over the same build, not two independent
/// ones.
pub struct NameResolutionPass {
    defs: DefnTable,
    pending: PendingTypes,
}

impl NameResolutionPass {
    #[must_use]
    pub fn new(defs: DefnTable, pending: PendingTypes) -> Self {
        NameResolutionPass { defs, pending }
    }

    fn resolve_imports(ctx: &mut PassContext, reporter: &Reporter, imports: &[Import]) -> StandardScope {
        let mut import_scope = StandardScope::new(ScopeKind::Default);
        for import in imports {
            let path_str = import.path.iter().map(|&n| ctx.interner.resolve(n).to_string()).collect::<Vec<_>>().join(".");
            let resolved = ctx
                .module_path
                .find_absolute_symbol(&path_str, &mut *ctx.arena, &mut *ctx.interner, &*ctx.types, &mut *ctx.importer, reporter);
            let Some(member) = resolved else {
                reporter.error(ErrorCode::E2002).at(import.location).text("Imported name not found: ").text(&path_str);
                continue;
            };
            let bind_name = import.alias.unwrap_or(*import.path.last().expect("import path is non-empty"));

            let mut existing = MemberSmallVec::new();
            let mut lookup_ctx = LookupContext {
                arena: &mut *ctx.arena,
                interner: &mut *ctx.interner,
                types: &*ctx.types,
                importer: &mut *ctx.importer,
                reporter,
            };
            import_scope.lookup_name(bind_name, &mut lookup_ctx, &mut existing);
            if !existing.is_empty() {
                reporter
                    .error(ErrorCode::E2003)
                    .at(import.location)
                    .text("Import name '")
                    .text(ctx.interner.resolve(bind_name))
                    .text("' conflicts with previous definition");
                continue;
            }
            import_scope.add_member(bind_name, member);
        }
        import_scope
    }

    /// Every Member kind's own pending expressions (its type annotation,
    /// supertype, subtype constraints) are resolved with that Member
    /// itself as the visibility subject - the most literal reading of
    /// "adjusting scope stack and current subject" that extends cleanly
    /// to every kind, not just Function/Property as `spec.md` calls out
    /// explicitly.
    fn resolve_member(&self, member: MemberId, ctx: &mut PassContext, reporter: &Reporter, scopes: &mut ScopeStack) {
        match ctx.arena.get(member).payload.kind() {
            MemberKind::TypeDefn => self.resolve_type_defn(member, ctx, reporter, scopes),
            MemberKind::Function => self.resolve_function(member, ctx, reporter, scopes),
            MemberKind::Property => self.resolve_property(member, ctx, reporter, scopes),
            MemberKind::Value => self.resolve_value(member, ctx, reporter, scopes),
            MemberKind::TypeParameter => self.resolve_type_parameter(member, ctx, reporter, scopes),
            MemberKind::Package | MemberKind::Module | MemberKind::Specialized => {}
        }
    }

    fn resolve_value(&self, member: MemberId, ctx: &mut PassContext, reporter: &Reporter, scopes: &ScopeStack) {
        let entry = self.pending.take(member);
        let subject = Subject(member);
        if let Some(expr) = &entry.type_expr {
            let ty = self.resolve_type_expr(ctx, reporter, scopes, subject, expr);
            if let MemberPayload::Value(data) = &mut ctx.arena.get_mut(member).payload {
                data.value_type = Some(ty);
            }
        }
    }

    fn resolve_type_parameter(&self, member: MemberId, ctx: &mut PassContext, reporter: &Reporter, scopes: &ScopeStack) {
        let entry = self.pending.take(member);
        let subject = Subject(member);
        let mut constraints: Vec<Type> = Vec::with_capacity(entry.subtype_constraints.len());
        for e in &entry.subtype_constraints {
            constraints.push(self.resolve_type_expr(ctx, reporter, scopes, subject, e));
        }
        if let MemberPayload::TypeParameter(data) = &mut ctx.arena.get_mut(member).payload {
            data.subtype_constraints = constraints;
        }
    }

    fn resolve_type_expr(&self, ctx: &mut PassContext, reporter: &Reporter, scopes: &ScopeStack, subject: Subject, expr: &Expr) -> Type {
        let mut lookup_ctx = LookupContext {
            arena: &mut *ctx.arena,
            interner: &mut *ctx.interner,
            types: &*ctx.types,
            importer: &mut *ctx.importer,
            reporter,
        };
        let resolved = ResolveExprs::resolve(&mut lookup_ctx, reporter, &self.defs, scopes, subject, expr);
        resolved.as_type(lookup_ctx.arena, lookup_ctx.types)
    }

    fn resolve_type_defn(&self, member: MemberId, ctx: &mut PassContext, reporter: &Reporter, scopes: &mut ScopeStack) {
        tracing::debug!(member = ?member, "resolving TypeDefn");
        let entry = self.pending.take(member);
        let subject = Subject(member);

        let super_ty = match &entry.super_type {
            Some(e) => Some(self.resolve_type_expr(ctx, reporter, scopes, subject, e)),
            None => None,
        };
        let mut interface_tys: Vec<Type> = Vec::with_capacity(entry.interfaces.len());
        for e in &entry.interfaces {
            interface_tys.push(self.resolve_type_expr(ctx, reporter, scopes, subject, e));
        }

        let mut base_scopes: Vec<StandardScope> = Vec::new();
        if let Some(ty) = &super_ty {
            if let Some(base_member) = self.defs.member_for(ty) {
                if let MemberPayload::TypeDefn(base_data) = &ctx.arena.get(base_member).payload {
                    base_scopes.push(base_data.member_scope.clone());
                }
            }
        }
        for ty in &interface_tys {
            if let Some(base_member) = self.defs.member_for(ty) {
                if let MemberPayload::TypeDefn(base_data) = &ctx.arena.get(base_member).payload {
                    base_scopes.push(base_data.member_scope.clone());
                }
            }
        }

        let (own_member_scope, type_param_scope, type_params) = match &ctx.arena.get(member).payload {
            MemberPayload::TypeDefn(data) => (data.member_scope.clone(), data.type_param_scope.clone(), data.type_params.clone()),
            _ => return,
        };

        // The stored `InheritedScope` and the one pushed onto the live
        // stack are built independently from the same parts:
        // `InheritedScope` carries no `Clone` impl to share one.
        let stored_inherited = build_inherited_scope(&own_member_scope, &base_scopes);
        if let MemberPayload::TypeDefn(data) = &mut ctx.arena.get_mut(member).payload {
            data.inherited_scope = stored_inherited;
        }

        scopes.push(Some(member), Box::new(type_param_scope));
        for &tp in &type_params {
            self.resolve_type_parameter(tp, ctx, reporter, scopes);
        }

        let live_inherited = build_inherited_scope(&own_member_scope, &base_scopes);
        scopes.push(Some(member), Box::new(live_inherited));
        for child in scope_children(&own_member_scope, ctx, reporter) {
            self.resolve_member(child, ctx, reporter, scopes);
        }
        scopes.pop();
        scopes.pop();
    }

    fn resolve_function(&self, member: MemberId, ctx: &mut PassContext, reporter: &Reporter, scopes: &mut ScopeStack) {
        tracing::debug!(member = ?member, "resolving Function");
        let subject = Subject(member);
        let (params, type_params, param_scope, type_param_scope) = match &ctx.arena.get(member).payload {
            MemberPayload::Function(data) => (data.params.clone(), data.type_params.clone(), data.param_scope.clone(), data.type_param_scope.clone()),
            _ => return,
        };

        scopes.push(Some(member), Box::new(type_param_scope));
        for &tp in &type_params {
            self.resolve_type_parameter(tp, ctx, reporter, scopes);
        }
        scopes.push(Some(member), Box::new(param_scope));
        for &p in &params {
            self.resolve_value(p, ctx, reporter, scopes);
        }

        let entry = self.pending.take(member);
        if let Some(expr) = &entry.type_expr {
            let ty = self.resolve_type_expr(ctx, reporter, scopes, subject, expr);
            if let MemberPayload::Function(data) = &mut ctx.arena.get_mut(member).payload {
                data.return_type = Some(ty);
            }
        }
        self.resolve_where_clauses(member, ctx, reporter, scopes, subject, &entry.where_clauses);

        scopes.pop();
        scopes.pop();
    }

    fn resolve_property(&self, member: MemberId, ctx: &mut PassContext, reporter: &Reporter, scopes: &mut ScopeStack) {
        tracing::debug!(member = ?member, "resolving Property");
        let subject = Subject(member);
        let (params, type_params, param_scope, type_param_scope, getter, setter) = match &ctx.arena.get(member).payload {
            MemberPayload::Property(data) => (
                data.params.clone(),
                data.type_params.clone(),
                data.param_scope.clone(),
                data.type_param_scope.clone(),
                data.getter,
                data.setter,
            ),
            _ => return,
        };

        scopes.push(Some(member), Box::new(type_param_scope));
        for &tp in &type_params {
            self.resolve_type_parameter(tp, ctx, reporter, scopes);
        }
        scopes.push(Some(member), Box::new(param_scope));
        for &p in &params {
            self.resolve_value(p, ctx, reporter, scopes);
        }

        let entry = self.pending.take(member);
        if let Some(expr) = &entry.type_expr {
            let ty = self.resolve_type_expr(ctx, reporter, scopes, subject, expr);
            if let MemberPayload::Property(data) = &mut ctx.arena.get_mut(member).payload {
                data.value_type = Some(ty);
            }
        }
        self.resolve_where_clauses(member, ctx, reporter, scopes, subject, &entry.where_clauses);

        scopes.pop();
        scopes.pop();

        if let Some(getter) = getter {
            self.resolve_function(getter, ctx, reporter, scopes);
        }
        if let Some(setter) = setter {
            self.resolve_function(setter, ctx, reporter, scopes);
        }
    }

    /// `spec.md` §4.8.5: resolves each `where` form to a synthetic
    /// requirement Function and attaches it either to an intercept scope
    /// (keyed by the lookup contexts a `MemberRef` callable's base names)
    /// or, absent any such context, to the enclosing TypeDefn's
    /// required-method scope. The owning generic is taken to be the
    /// nearest enclosing TypeDefn of the function/property the clause is
    /// written on, since only `TypeDefnData` carries `intercept_scopes`/
    /// `required_method_scope`.
    fn resolve_where_clauses(
        &self,
        member: MemberId,
        ctx: &mut PassContext,
        reporter: &Reporter,
        scopes: &ScopeStack,
        subject: Subject,
        clauses: &[Requirement],
    ) {
        if clauses.is_empty() {
            return;
        }
        let owner = enclosing_type_defn(ctx.arena, member);

        for req in clauses {
            let contexts: Vec<MemberId> = match req {
                Requirement::CallRequired { callable: Expr::MemberRef(mr), .. } => {
                    let mut lookup_ctx = LookupContext {
                        arena: &mut *ctx.arena,
                        interner: &mut *ctx.interner,
                        types: &*ctx.types,
                        importer: &mut *ctx.importer,
                        reporter,
                    };
                    match ResolveExprs::resolve(&mut lookup_ctx, reporter, &self.defs, scopes, subject, &mr.base) {
                        ResolvedExpr::Members(set) => set.members.to_vec(),
                        ResolvedExpr::Builtin(_) => Vec::new(),
                    }
                }
                _ => Vec::new(),
            };

            let req_member = {
                let mut lookup_ctx = LookupContext {
                    arena: &mut *ctx.arena,
                    interner: &mut *ctx.interner,
                    types: &*ctx.types,
                    importer: &mut *ctx.importer,
                    reporter,
                };
                ResolveRequirements::resolve(&mut lookup_ctx, reporter, &self.defs, scopes, subject, req)
            };
            let Some(req_member) = req_member else { continue };

            let Some(owner) = owner else { continue };
            let req_name = ctx.arena.get(req_member).name;
            if let MemberPayload::TypeDefn(data) = &mut ctx.arena.get_mut(owner).payload {
                if contexts.is_empty() {
                    data.required_method_scope.add_member(req_name, req_member);
                } else {
                    for context in contexts {
                        data.intercept_scopes.entry(context).or_insert_with(|| StandardScope::new(ScopeKind::Intercept)).add_member(req_name, req_member);
                    }
                }
            }
        }
    }
}

fn build_inherited_scope(own: &StandardScope, bases: &[StandardScope]) -> InheritedScope {
    let mut inherited = InheritedScope::new(own.clone());
    for base in bases {
        inherited.add_secondary(base.clone());
    }
    inherited
}

fn enclosing_type_defn(arena: &elan_semantic::SemanticArena, start: MemberId) -> Option<MemberId> {
    let mut current = arena.get(start).defined_in;
    while let Some(id) = current {
        if matches!(arena.get(id).payload, MemberPayload::TypeDefn(_)) {
            return Some(id);
        }
        current = arena.get(id).defined_in;
    }
    None
}

/// Flattens a scope's `(name -> [Member])` multimap into a plain member
/// list, so `NameResolutionPass` can recurse over the Member graph
/// itself rather than re-walking the syntax tree (which would need a
/// syntax-defn-index-to-`MemberId` correspondence that doesn't survive
/// overloaded/duplicate names). Cross-name order is not reconstructed -
/// harmless, since by this point every Member in scope already exists
/// and resolving one never depends on the order its siblings resolve in.
fn scope_children(scope: &StandardScope, ctx: &mut PassContext, reporter: &Reporter) -> Vec<MemberId> {
    let mut names = Vec::new();
    scope.for_all_names(&mut |n| names.push(n));
    let mut out = Vec::new();
    for name in names {
        let mut hits = MemberSmallVec::new();
        let mut lookup_ctx = LookupContext {
            arena: &mut *ctx.arena,
            interner: &mut *ctx.interner,
            types: &*ctx.types,
            importer: &mut *ctx.importer,
            reporter,
        };
        scope.lookup_name(name, &mut lookup_ctx, &mut hits);
        out.extend(hits);
    }
    out
}

impl Pass for NameResolutionPass {
    fn name(&self) -> &'static str {
        "NameResolution"
    }

    fn prereqs(&self) -> &'static [&'static str] {
        &["BuildGraph"]
    }

    fn run(&mut self, module: MemberId, ctx: &mut PassContext) {
        let reporter = ctx.reporter;
        // Copying the field out borrows the RefCell itself, not `ctx` -
        // `ctx.arena`/`ctx.interner`/... stay free for `resolve_imports`
        // to use mutably while `module_ast` is held (same idiom as
        // `BuildGraphPass::run`).
        let syntax = ctx.module_syntax;
        let borrow = syntax.borrow();
        let Some(module_ast) = borrow.get(&module) else {
            drop(borrow);
            reporter.error(ErrorCode::E4001).text("Invalid AST node kind: expected Module");
            return;
        };
        let import_scope = Self::resolve_imports(ctx, reporter, &module_ast.imports);
        drop(borrow);

        let member_scope = match &ctx.arena.get(module).payload {
            MemberPayload::Module(data) => data.member_scope.clone(),
            _ => {
                reporter.error(ErrorCode::E4001).text("Invalid AST node kind: expected Module");
                return;
            }
        };

        if let MemberPayload::Module(data) = &mut ctx.arena.get_mut(module).payload {
            data.import_scope = import_scope.clone();
        }

        let mut scopes = ScopeStack::new();
        scopes.push(None, Box::new(import_scope));
        scopes.push(Some(module), Box::new(member_scope.clone()));

        for child in scope_children(&member_scope, ctx, reporter) {
            self.resolve_member(child, ctx, reporter, &mut scopes);
        }

        scopes.pop();
        scopes.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildgraph::BuildGraphPass;
    use elan_diagnostic::Reporter;
    use elan_driver::{Essentials, ModulePathLookup};
    use elan_ir::{Location, Name, NameInterner, Path};
    use elan_semantic::{
        Importer, MemberData, ModuleData, ModuleImporter, PackageData, SemanticArena, ValueData, ValueKind, Visibility,
    };
    use elan_syntax::{
        BuiltinTypeExpr, BuiltinTypeKind, FunctionDefn, IdentExpr, Import, Modifiers as SynModifiers, Module, TypeDefn,
        TypeDefnKind, ValueDefnKind, Visibility as SynVisibility,
    };
    use elan_types::TypeStore;
    use std::cell::RefCell;

    struct NoImports;
    impl ModuleImporter for NoImports {
        fn import_module_from_source(&mut self, _path: &Path, _arena: &mut SemanticArena, _interner: &mut NameInterner) -> Option<MemberId> {
            None
        }
    }

    struct FixedImporter {
        name: Name,
        member: MemberId,
    }
    impl Importer for FixedImporter {
        fn lookup_name(&self, name: Name, _ctx: &mut LookupContext, out: &mut MemberSmallVec) {
            if name == self.name {
                out.push(self.member);
            }
        }
    }

    fn loc() -> Location {
        Location::on_line(Name::EMPTY, 1, 1, 1)
    }

    fn empty_module(name: Name, imports: Vec<Import>) -> (MemberId, SemanticArena, RefCell<FxHashMap<MemberId, Module>>) {
        let mut arena = SemanticArena::new();
        let module = arena.alloc(MemberData {
            name,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: elan_semantic::Modifiers::empty(),
            payload: MemberPayload::Module(ModuleData {
                source_path: Path::new("m.sp"),
                member_scope: StandardScope::new(ScopeKind::Default),
                import_scope: StandardScope::new(ScopeKind::Default),
            }),
        });
        let module_syntax = RefCell::new(FxHashMap::default());
        module_syntax.borrow_mut().insert(
            module,
            Module {
                name,
                source_path: Path::new("m.sp"),
                imports,
                members: Vec::new(),
            },
        );
        (module, arena, module_syntax)
    }

    #[test]
    fn import_of_unknown_path_reports_e2002() {
        let mut interner = NameInterner::new();
        let name = interner.intern("nonexistent");
        let import = Import { path: vec![name], alias: None, location: loc() };
        let (module, mut arena, module_syntax) = empty_module(Name::EMPTY, vec![import]);

        let mut types = TypeStore::new();
        let reporter = Reporter::new();
        let module_path = ModulePathLookup::new();
        let essentials = Essentials::new();

        let mut pass = NameResolutionPass::new(DefnTable::new(), PendingTypes::new());
        let mut ctx = PassContext {
            arena: &mut arena,
            interner: &mut interner,
            types: &mut types,
            reporter: &reporter,
            module_path: &module_path,
            essentials: &essentials,
            importer: Box::new(NoImports),
            module_syntax: &module_syntax,
        };
        pass.run(module, &mut ctx);

        assert!(reporter.has_errors());
        assert_eq!(reporter.diagnostics()[0].code, ErrorCode::E2002);
    }

    #[test]
    fn repeated_import_of_the_same_name_reports_e2003() {
        let mut interner = NameInterner::new();
        let target_name = interner.intern("target");
        let import_a = Import { path: vec![target_name], alias: None, location: loc() };
        let import_b = Import { path: vec![target_name], alias: None, location: loc() };
        let (module, mut arena, module_syntax) = empty_module(Name::EMPTY, vec![import_a, import_b]);

        let target = arena.alloc(MemberData {
            name: target_name,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: elan_semantic::Modifiers::empty(),
            payload: MemberPayload::Package(PackageData {
                scope: elan_semantic::DirectoryScope::new(Path::new(".")),
            }),
        });

        let mut types = TypeStore::new();
        let reporter = Reporter::new();
        let mut module_path = ModulePathLookup::new();
        module_path.scope_mut().push_importer(Box::new(FixedImporter { name: target_name, member: target }));
        let essentials = Essentials::new();

        let mut pass = NameResolutionPass::new(DefnTable::new(), PendingTypes::new());
        let mut ctx = PassContext {
            arena: &mut arena,
            interner: &mut interner,
            types: &mut types,
            reporter: &reporter,
            module_path: &module_path,
            essentials: &essentials,
            importer: Box::new(NoImports),
            module_syntax: &module_syntax,
        };
        pass.run(module, &mut ctx);

        assert!(reporter.has_errors());
        assert_eq!(reporter.diagnostics()[0].code, ErrorCode::E2003);
    }

    #[test]
    fn type_defn_with_supertype_inherits_base_member() {
        let mut interner = NameInterner::new();
        let base_name = interner.intern("Base");
        let derived_name = interner.intern("Derived");
        let ping_name = interner.intern("ping");

        let base = Defn::Type(TypeDefn {
            name: base_name,
            kind: TypeDefnKind::Class,
            type_params: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
            members: vec![Defn::Function(FunctionDefn {
                name: ping_name,
                type_params: Vec::new(),
                params: Vec::new(),
                return_type: None,
                where_clauses: Vec::new(),
                visibility: SynVisibility::Public,
                modifiers: SynModifiers::empty(),
                location: loc(),
            })],
            visibility: SynVisibility::Public,
            modifiers: SynModifiers::empty(),
            location: loc(),
        });
        let derived = Defn::Type(TypeDefn {
            name: derived_name,
            kind: TypeDefnKind::Class,
            type_params: Vec::new(),
            super_type: Some(Expr::Ident(IdentExpr { name: base_name, location: loc() })),
            interfaces: Vec::new(),
            members: Vec::new(),
            visibility: SynVisibility::Public,
            modifiers: SynModifiers::empty(),
            location: loc(),
        });

        let mut arena = SemanticArena::new();
        let module = arena.alloc(MemberData {
            name: Name::EMPTY,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: elan_semantic::Modifiers::empty(),
            payload: MemberPayload::Module(ModuleData {
                source_path: Path::new("m.sp"),
                member_scope: StandardScope::new(ScopeKind::Default),
                import_scope: StandardScope::new(ScopeKind::Default),
            }),
        });
        let module_syntax = RefCell::new(FxHashMap::default());
        module_syntax.borrow_mut().insert(
            module,
            Module { name: Name::EMPTY, source_path: Path::new("m.sp"), imports: Vec::new(), members: vec![base, derived] },
        );

        let mut types = TypeStore::new();
        let reporter = Reporter::new();
        let module_path = ModulePathLookup::new();
        let essentials = Essentials::new();
        let defs = DefnTable::new();
        let pending = PendingTypes::new();

        {
            let mut build = BuildGraphPass::new(defs.clone(), pending.clone());
            let mut ctx = PassContext {
                arena: &mut arena,
                interner: &mut interner,
                types: &mut types,
                reporter: &reporter,
                module_path: &module_path,
                essentials: &essentials,
                importer: Box::new(NoImports),
                module_syntax: &module_syntax,
            };
            build.run(module, &mut ctx);
        }
        {
            let mut resolve = NameResolutionPass::new(defs, pending);
            let mut ctx = PassContext {
                arena: &mut arena,
                interner: &mut interner,
                types: &mut types,
                reporter: &reporter,
                module_path: &module_path,
                essentials: &essentials,
                importer: Box::new(NoImports),
                module_syntax: &module_syntax,
            };
            resolve.run(module, &mut ctx);
        }

        assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());

        let member_scope = match &arena.get(module).payload {
            MemberPayload::Module(data) => data.member_scope.clone(),
            _ => panic!("expected Module payload"),
        };
        let mut found = MemberSmallVec::new();
        let mut importer = NoImports;
        let mut lookup_ctx = LookupContext { arena: &mut arena, interner: &mut interner, types: &types, importer: &mut importer, reporter: &reporter };
        member_scope.lookup_name(derived_name, &mut lookup_ctx, &mut found);
        assert_eq!(found.len(), 1);
        let derived_member = found[0];

        // `InheritedScope` isn't `Clone`, so it can't be lifted out of the
        // arena borrow the way `member_scope` was above. Its `lookup_name`
        // never actually touches the `LookupContext` it's handed (neither
        // `StandardScope` nor `InheritedScope` drill through an importer),
        // so a throwaway scratch context sidesteps the aliasing conflict
        // with the real arena still borrowed by `data`.
        let mut scratch_arena = SemanticArena::new();
        let mut scratch_interner = NameInterner::new();
        let scratch_types = elan_types::TypeStore::new();
        let mut scratch_importer = NoImports;
        let scratch_reporter = Reporter::new();
        let mut scratch_ctx = LookupContext {
            arena: &mut scratch_arena,
            interner: &mut scratch_interner,
            types: &scratch_types,
            importer: &mut scratch_importer,
            reporter: &scratch_reporter,
        };
        let mut ping_hits = MemberSmallVec::new();
        match &lookup_ctx.arena.get(derived_member).payload {
            MemberPayload::TypeDefn(data) => data.inherited_scope.lookup_name(ping_name, &mut scratch_ctx, &mut ping_hits),
            other => panic!("expected TypeDefn, got {:?}", other.kind()),
        }
        assert_eq!(ping_hits.len(), 1, "Derived should see Base's ping through its inherited scope");
    }

    #[test]
    fn function_return_type_resolves_to_sibling_type_defn() {
        let mut interner = NameInterner::new();
        let num_name = interner.intern("Num");
        let foo_name = interner.intern("foo");

        let num = Defn::Type(TypeDefn {
            name: num_name,
            kind: TypeDefnKind::Class,
            type_params: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            visibility: SynVisibility::Public,
            modifiers: SynModifiers::empty(),
            location: loc(),
        });
        let foo = Defn::Function(FunctionDefn {
            name: foo_name,
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: Some(Expr::Ident(IdentExpr { name: num_name, location: loc() })),
            where_clauses: Vec::new(),
            visibility: SynVisibility::Public,
            modifiers: SynModifiers::empty(),
            location: loc(),
        });

        let mut arena = SemanticArena::new();
        let module = arena.alloc(MemberData {
            name: Name::EMPTY,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: elan_semantic::Modifiers::empty(),
            payload: MemberPayload::Module(ModuleData {
                source_path: Path::new("m.sp"),
                member_scope: StandardScope::new(ScopeKind::Default),
                import_scope: StandardScope::new(ScopeKind::Default),
            }),
        });
        let module_syntax = RefCell::new(FxHashMap::default());
        module_syntax.borrow_mut().insert(
            module,
            Module { name: Name::EMPTY, source_path: Path::new("m.sp"), imports: Vec::new(), members: vec![num, foo] },
        );

        let mut types = TypeStore::new();
        let reporter = Reporter::new();
        let module_path = ModulePathLookup::new();
        let essentials = Essentials::new();
        let defs = DefnTable::new();
        let pending = PendingTypes::new();

        {
            let mut build = BuildGraphPass::new(defs.clone(), pending.clone());
            let mut ctx = PassContext {
                arena: &mut arena,
                interner: &mut interner,
                types: &mut types,
                reporter: &reporter,
                module_path: &module_path,
                essentials: &essentials,
                importer: Box::new(NoImports),
                module_syntax: &module_syntax,
            };
            build.run(module, &mut ctx);
        }
        {
            let mut resolve = NameResolutionPass::new(defs, pending);
            let mut ctx = PassContext {
                arena: &mut arena,
                interner: &mut interner,
                types: &mut types,
                reporter: &reporter,
                module_path: &module_path,
                essentials: &essentials,
                importer: Box::new(NoImports),
                module_syntax: &module_syntax,
            };
            resolve.run(module, &mut ctx);
        }

        assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
        let member_scope = match &arena.get(module).payload {
            MemberPayload::Module(data) => data.member_scope.clone(),
            _ => panic!("expected Module payload"),
        };
        let mut found = MemberSmallVec::new();
        let mut importer = NoImports;
        let mut lookup_ctx = LookupContext { arena: &mut arena, interner: &mut interner, types: &types, importer: &mut importer, reporter: &reporter };
        member_scope.lookup_name(foo_name, &mut lookup_ctx, &mut found);
        assert_eq!(found.len(), 1);
        match &lookup_ctx.arena.get(found[0]).payload {
            MemberPayload::Function(data) => assert!(data.return_type.is_some(), "return type should have been resolved"),
            other => panic!("expected Function, got {:?}", other.kind()),
        }
    }

    #[test]
    fn relational_where_clause_attaches_to_required_method_scope() {
        let mut interner = NameInterner::new();
        let holder_name = interner.intern("Comparable");
        let cmp_name = interner.intern("cmp");

        let relational = Requirement::LessThan(
            Expr::BuiltinType(BuiltinTypeExpr { kind: BuiltinTypeKind::I32, location: loc() }),
            Expr::BuiltinType(BuiltinTypeExpr { kind: BuiltinTypeKind::I32, location: loc() }),
            loc(),
        );
        let holder = Defn::Type(TypeDefn {
            name: holder_name,
            kind: TypeDefnKind::Interface,
            type_params: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
            members: vec![Defn::Function(FunctionDefn {
                name: cmp_name,
                type_params: Vec::new(),
                params: Vec::new(),
                return_type: None,
                where_clauses: vec![relational],
                visibility: SynVisibility::Public,
                modifiers: SynModifiers::empty(),
                location: loc(),
            })],
            visibility: SynVisibility::Public,
            modifiers: SynModifiers::empty(),
            location: loc(),
        });

        let mut arena = SemanticArena::new();
        let module = arena.alloc(MemberData {
            name: Name::EMPTY,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: elan_semantic::Modifiers::empty(),
            payload: MemberPayload::Module(ModuleData {
                source_path: Path::new("m.sp"),
                member_scope: StandardScope::new(ScopeKind::Default),
                import_scope: StandardScope::new(ScopeKind::Default),
            }),
        });
        let module_syntax = RefCell::new(FxHashMap::default());
        module_syntax
            .borrow_mut()
            .insert(module, Module { name: Name::EMPTY, source_path: Path::new("m.sp"), imports: Vec::new(), members: vec![holder] });

        let mut types = TypeStore::new();
        let reporter = Reporter::new();
        let module_path = ModulePathLookup::new();
        let essentials = Essentials::new();
        let defs = DefnTable::new();
        let pending = PendingTypes::new();

        {
            let mut build = BuildGraphPass::new(defs.clone(), pending.clone());
            let mut ctx = PassContext {
                arena: &mut arena,
                interner: &mut interner,
                types: &mut types,
                reporter: &reporter,
                module_path: &module_path,
                essentials: &essentials,
                importer: Box::new(NoImports),
                module_syntax: &module_syntax,
            };
            build.run(module, &mut ctx);
        }
        {
            let mut resolve = NameResolutionPass::new(defs, pending);
            let mut ctx = PassContext {
                arena: &mut arena,
                interner: &mut interner,
                types: &mut types,
                reporter: &reporter,
                module_path: &module_path,
                essentials: &essentials,
                importer: Box::new(NoImports),
                module_syntax: &module_syntax,
            };
            resolve.run(module, &mut ctx);
        }

        assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
        let member_scope = match &arena.get(module).payload {
            MemberPayload::Module(data) => data.member_scope.clone(),
            _ => panic!("expected Module payload"),
        };
        let mut found = MemberSmallVec::new();
        let mut importer = NoImports;
        let mut lookup_ctx = LookupContext { arena: &mut arena, interner: &mut interner, types: &types, importer: &mut importer, reporter: &reporter };
        member_scope.lookup_name(holder_name, &mut lookup_ctx, &mut found);
        assert_eq!(found.len(), 1);

        let required_method_scope = match &lookup_ctx.arena.get(found[0]).payload {
            MemberPayload::TypeDefn(data) => data.required_method_scope.clone(),
            other => panic!("expected TypeDefn, got {:?}", other.kind()),
        };
        let mut hits = MemberSmallVec::new();
        required_method_scope.lookup_name(Name::EMPTY, &mut lookup_ctx, &mut hits);
        assert_eq!(hits.len(), 1, "where-clause requirement should register under Name::EMPTY");
        match &lookup_ctx.arena.get(hits[0]).payload {
            MemberPayload::Function(data) => assert!(data.requirement, "synthetic requirement function should be flagged"),
            other => panic!("expected Function, got {:?}", other.kind()),
        }
    }
}
