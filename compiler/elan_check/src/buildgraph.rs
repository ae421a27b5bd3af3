//! `BuildGraphPass`: walks a Module's syntax tree and allocates the
//! Member graph over it, per `spec.md` §4.7.
//!
//! Grounded on `sema/passes/buildgraph.cpp`.

use elan_diagnostic::ErrorCode;
use elan_driver::{Pass, PassContext};
use elan_ir::Name;
use elan_semantic::{
    FunctionData, InheritedScope, MemberData, MemberId, MemberPayload, Modifiers as SemModifiers, PropertyData, Scope,
    ScopeKind, StandardScope, TypeDefnData, TypeParameterData, ValueData, ValueKind, Visibility as SemVisibility,
};
use elan_syntax::{
    Defn, FunctionDefn, Modifiers as SynModifiers, Param, PropertyDefn, TypeDefn, TypeDefnKind, TypeParam, ValueDefn,
    ValueDefnKind, Visibility as SynVisibility,
};
use elan_types::CompositeKind;
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

/// A built Member paired with the name its parent scope binds it under.
/// Most Defn variants produce exactly one; `TypeDefnKind::Object` produces
/// two (the `Name#Class` composite and the `Name` singleton), both of
/// which must reach the parent's member scope (`spec.md` §4.7).
type BuiltMembers = SmallVec<[(Name, MemberId); 2]>;

use crate::defn_table::DefnTable;
use crate::pending::PendingTypes;

fn convert_visibility(v: SynVisibility) -> SemVisibility {
    match v {
        SynVisibility::Public => SemVisibility::Public,
        SynVisibility::Protected => SemVisibility::Protected,
        SynVisibility::Private => SemVisibility::Private,
    }
}

fn convert_modifiers(m: SynModifiers) -> SemModifiers {
    let mut out = SemModifiers::empty();
    if m.contains(SynModifiers::STATIC) {
        out |= SemModifiers::STATIC;
    }
    if m.contains(SynModifiers::FINAL) {
        out |= SemModifiers::FINAL;
    }
    if m.contains(SynModifiers::OVERRIDE) {
        out |= SemModifiers::OVERRIDE;
    }
    if m.contains(SynModifiers::ABSTRACT) {
        out |= SemModifiers::ABSTRACT;
    }
    if m.contains(SynModifiers::UNDEF) {
        out |= SemModifiers::UNDEF;
    }
    out
}

fn convert_value_kind(k: ValueDefnKind) -> ValueKind {
    match k {
        ValueDefnKind::Let => ValueKind::Let,
        ValueDefnKind::Var => ValueKind::Var,
        ValueDefnKind::EnumValue => ValueKind::EnumValue,
    }
}

/// Mints the Member graph for one module's syntax tree. Owns the
/// [`DefnTable`] that maps each `TypeDefn`/`TypeParameter` it allocates
/// back to its `DefnId`, shared with name resolution so `MemberLookup`
/// can walk a type parameter's subtype constraints.
pub struct BuildGraphPass {
    defs: DefnTable,
    pending: PendingTypes,
}

impl BuildGraphPass {
    #[must_use]
    pub fn new(defs: DefnTable, pending: PendingTypes) -> Self {
        BuildGraphPass { defs, pending }
    }

    #[must_use]
    pub fn defs(&self) -> DefnTable {
        self.defs.clone()
    }

    #[must_use]
    pub fn pending(&self) -> PendingTypes {
        self.pending.clone()
    }

    fn build_member(&self, defn: &Defn, defined_in: MemberId, ctx: &mut PassContext) -> BuiltMembers {
        match defn {
            Defn::Value(v) => smallvec![(v.name, self.build_value(v, defined_in, ctx))],
            Defn::Type(t) => self.build_type(t, defined_in, ctx),
            Defn::Function(f) => smallvec![(f.name, self.build_function(f, defined_in, ctx))],
            Defn::Property(p) => smallvec![(p.name, self.build_property(p, defined_in, ctx))],
        }
    }

    fn build_value(&self, v: &ValueDefn, defined_in: MemberId, ctx: &mut PassContext) -> MemberId {
        let member = ctx.arena.alloc(MemberData {
            name: v.name,
            defined_in: Some(defined_in),
            location: Some(v.location),
            visibility: convert_visibility(v.visibility),
            modifiers: convert_modifiers(v.modifiers),
            payload: MemberPayload::Value(ValueData {
                kind: convert_value_kind(v.kind),
                value_type: None,
                initialized: matches!(v.kind, ValueDefnKind::EnumValue),
            }),
        });
        if let Some(expr) = &v.value_type {
            self.pending.set_type_expr(member, expr.clone());
        }
        member
    }

    fn build_param(&self, p: &Param, defined_in: MemberId, ctx: &mut PassContext) -> MemberId {
        let member = ctx.arena.alloc(MemberData {
            name: p.name,
            defined_in: Some(defined_in),
            location: Some(p.location),
            visibility: SemVisibility::Public,
            modifiers: SemModifiers::empty(),
            payload: MemberPayload::Value(ValueData {
                kind: ValueKind::Param,
                value_type: None,
                initialized: true,
            }),
        });
        if let Some(expr) = &p.param_type {
            self.pending.set_type_expr(member, expr.clone());
        }
        member
    }

    fn build_type_param(&self, tp: &TypeParam, defined_in: MemberId, ctx: &mut PassContext) -> MemberId {
        let defn_id = self.defs.fresh_id();
        let type_var = ctx.types.create_type_var(defn_id);
        let member = ctx.arena.alloc(MemberData {
            name: tp.name,
            defined_in: Some(defined_in),
            location: Some(tp.location),
            visibility: SemVisibility::Public,
            modifiers: SemModifiers::empty(),
            payload: MemberPayload::TypeParameter(TypeParameterData {
                value_type: None,
                type_var,
                subtype_constraints: Vec::new(),
            }),
        });
        self.defs.register(defn_id, member);
        for constraint in &tp.subtype_constraints {
            self.pending.add_subtype_constraint(member, constraint.clone());
        }
        member
    }

    fn build_function(&self, f: &FunctionDefn, defined_in: MemberId, ctx: &mut PassContext) -> MemberId {
        let member = ctx.arena.alloc(MemberData {
            name: f.name,
            defined_in: Some(defined_in),
            location: Some(f.location),
            visibility: convert_visibility(f.visibility),
            modifiers: convert_modifiers(f.modifiers),
            payload: MemberPayload::Function(FunctionData {
                params: Vec::new(),
                type_params: Vec::new(),
                param_scope: StandardScope::new(ScopeKind::Default),
                type_param_scope: StandardScope::new(ScopeKind::TypeParam),
                return_type: None,
                requirement: false,
            }),
        });

        let type_params: Vec<MemberId> = f.type_params.iter().map(|tp| self.build_type_param(tp, member, ctx)).collect();
        let params: Vec<MemberId> = f.params.iter().map(|p| self.build_param(p, member, ctx)).collect();

        let mut param_scope = StandardScope::new(ScopeKind::Default);
        for (p, &id) in f.params.iter().zip(&params) {
            param_scope.add_member(p.name, id);
        }
        let mut type_param_scope = StandardScope::new(ScopeKind::TypeParam);
        for (tp, &id) in f.type_params.iter().zip(&type_params) {
            type_param_scope.add_member(tp.name, id);
        }

        if let MemberPayload::Function(data) = &mut ctx.arena.get_mut(member).payload {
            data.params = params;
            data.type_params = type_params;
            data.param_scope = param_scope;
            data.type_param_scope = type_param_scope;
        }
        if let Some(expr) = &f.return_type {
            self.pending.set_type_expr(member, expr.clone());
        }
        self.pending.set_where_clauses(member, f.where_clauses.clone());
        member
    }

    fn build_property(&self, p: &PropertyDefn, defined_in: MemberId, ctx: &mut PassContext) -> MemberId {
        let member = ctx.arena.alloc(MemberData {
            name: p.name,
            defined_in: Some(defined_in),
            location: Some(p.location),
            visibility: convert_visibility(p.visibility),
            modifiers: convert_modifiers(p.modifiers),
            payload: MemberPayload::Property(PropertyData {
                params: Vec::new(),
                type_params: Vec::new(),
                param_scope: StandardScope::new(ScopeKind::Default),
                type_param_scope: StandardScope::new(ScopeKind::TypeParam),
                value_type: None,
                getter: None,
                setter: None,
            }),
        });

        let type_params: Vec<MemberId> = p.type_params.iter().map(|tp| self.build_type_param(tp, member, ctx)).collect();
        let params: Vec<MemberId> = p.params.iter().map(|param| self.build_param(param, member, ctx)).collect();
        let getter = p.getter.as_deref().map(|g| self.build_function(g, member, ctx));
        let setter = p.setter.as_deref().map(|s| self.build_function(s, member, ctx));

        let mut param_scope = StandardScope::new(ScopeKind::Default);
        for (param, &id) in p.params.iter().zip(&params) {
            param_scope.add_member(param.name, id);
        }
        let mut type_param_scope = StandardScope::new(ScopeKind::TypeParam);
        for (tp, &id) in p.type_params.iter().zip(&type_params) {
            type_param_scope.add_member(tp.name, id);
        }

        if let MemberPayload::Property(data) = &mut ctx.arena.get_mut(member).payload {
            data.params = params;
            data.type_params = type_params;
            data.param_scope = param_scope;
            data.type_param_scope = type_param_scope;
            data.getter = getter;
            data.setter = setter;
        }
        if let Some(expr) = &p.value_type {
            self.pending.set_type_expr(member, expr.clone());
        }
        self.pending.set_where_clauses(member, p.where_clauses.clone());
        member
    }

    /// Builds a composite `TypeDefn`. `TypeDefnKind::Object` additionally
    /// produces a `Let` singleton named plainly `Name` alongside the
    /// `Name#Class` composite (`spec.md` §4.7): the parent scope binds
    /// *both* names - `Name#Class` to the composite, `Name` to the
    /// singleton - matching `createMembers()`'s unconditional
    /// `memberScope->addMember(d)` for the class followed by the
    /// object-only `memberScope->addMember(singleton)`.
    fn build_type(&self, t: &TypeDefn, defined_in: MemberId, ctx: &mut PassContext) -> BuiltMembers {
        let kind = match t.kind {
            TypeDefnKind::Class | TypeDefnKind::Object => CompositeKind::Class,
            TypeDefnKind::Struct => CompositeKind::Struct,
            TypeDefnKind::Interface => CompositeKind::Interface,
            TypeDefnKind::Enum => CompositeKind::Enum,
        };

        let defn_id = self.defs.fresh_id();
        let ty = ctx.types.create_composite_type(kind, defn_id, None, Vec::new());

        let class_name = if matches!(t.kind, TypeDefnKind::Object) {
            let suffixed = format!("{}#Class", ctx.interner.resolve(t.name));
            ctx.interner.intern(&suffixed)
        } else {
            t.name
        };

        let class_member = ctx.arena.alloc(MemberData {
            name: class_name,
            defined_in: Some(defined_in),
            location: Some(t.location),
            visibility: convert_visibility(t.visibility),
            modifiers: convert_modifiers(t.modifiers),
            payload: MemberPayload::TypeDefn(TypeDefnData {
                ty: ty.clone(),
                member_scope: StandardScope::new(ScopeKind::Default),
                inherited_scope: InheritedScope::new(StandardScope::new(ScopeKind::Default)),
                type_param_scope: StandardScope::new(ScopeKind::TypeParam),
                required_method_scope: StandardScope::new(ScopeKind::Default),
                type_params: Vec::new(),
                intercept_scopes: FxHashMap::default(),
            }),
        });
        self.defs.register(defn_id, class_member);
        if let Some(expr) = &t.super_type {
            self.pending.set_super_type(class_member, expr.clone());
        }
        for iface in &t.interfaces {
            self.pending.add_interface(class_member, iface.clone());
        }

        let type_params: Vec<MemberId> = t.type_params.iter().map(|tp| self.build_type_param(tp, class_member, ctx)).collect();
        let members: BuiltMembers = t.members.iter().flat_map(|m| self.build_member(m, class_member, ctx)).collect();

        let mut member_scope = StandardScope::new(ScopeKind::Default);
        for &(name, id) in &members {
            member_scope.add_member(name, id);
        }
        let mut type_param_scope = StandardScope::new(ScopeKind::TypeParam);
        for (tp, &id) in t.type_params.iter().zip(&type_params) {
            type_param_scope.add_member(tp.name, id);
        }

        if let MemberPayload::TypeDefn(data) = &mut ctx.arena.get_mut(class_member).payload {
            data.member_scope = member_scope;
            data.type_param_scope = type_param_scope;
            data.type_params = type_params;
        }

        if matches!(t.kind, TypeDefnKind::Object) {
            let singleton = ctx.arena.alloc(MemberData {
                name: t.name,
                defined_in: Some(defined_in),
                location: Some(t.location),
                visibility: convert_visibility(t.visibility),
                modifiers: convert_modifiers(t.modifiers),
                payload: MemberPayload::Value(ValueData {
                    kind: ValueKind::Let,
                    value_type: Some(ty),
                    initialized: true,
                }),
            });
            smallvec![(class_name, class_member), (t.name, singleton)]
        } else {
            smallvec![(t.name, class_member)]
        }
    }
}

impl Pass for BuildGraphPass {
    fn name(&self) -> &'static str {
        "BuildGraph"
    }

    fn run(&mut self, module: MemberId, ctx: &mut PassContext) {
        // `ctx.module_syntax` is a field of reference type, so copying it
        // out borrows the RefCell itself, not `ctx` - `ctx.arena` stays
        // free for `build_member` to mutate while `module_ast` is held.
        let syntax = ctx.module_syntax;
        let borrow = syntax.borrow();
        let Some(module_ast) = borrow.get(&module) else {
            drop(borrow);
            ctx.reporter.error(ErrorCode::E4001).text("Invalid AST node kind: expected Module");
            return;
        };

        let members: BuiltMembers = module_ast.members.iter().flat_map(|defn| self.build_member(defn, module, ctx)).collect();

        let mut member_scope = StandardScope::new(ScopeKind::Default);
        for &(name, id) in &members {
            member_scope.add_member(name, id);
        }
        drop(borrow);

        if let MemberPayload::Module(data) = &mut ctx.arena.get_mut(module).payload {
            data.member_scope = member_scope;
        }
    }
}
