//! `ResolveExprs`: resolves the four expression shapes `spec.md` §4.8.1
//! names (Ident, MemberRef, Specialize, BuiltinType) to a
//! [`ResolvedExpr`].
//!
//! Grounded on `sema/names/resolveexprs.cpp`.

use elan_diagnostic::{ErrorCode, Reporter, Suggestion};
use elan_semantic::scope::MemberSmallVec;
use elan_semantic::{CloseMatchFinder, LookupContext, ScopeStack};
use elan_syntax::{BuiltinTypeExpr, BuiltinTypeKind, Expr, IdentExpr, MemberRefExpr, SpecializeExpr};
use elan_types::PrimitiveKind;

use crate::defn_table::DefnTable;
use crate::fillmemberset::FillMemberSet;
use crate::memberlookup::MemberLookup;
use crate::subject::{Genus, ResolvedExpr, Subject};

pub struct ResolveExprs;

impl ResolveExprs {
    /// Resolves `expr` against the current `scopes`/`subject`.
    pub fn resolve(
        ctx: &mut LookupContext,
        reporter: &Reporter,
        defs: &DefnTable,
        scopes: &ScopeStack,
        subject: Subject,
        expr: &Expr,
    ) -> ResolvedExpr {
        match expr {
            Expr::Ident(e) => Self::resolve_ident(ctx, reporter, subject, scopes, e),
            Expr::MemberRef(e) => Self::resolve_member_ref(ctx, reporter, defs, scopes, subject, e),
            Expr::Specialize(e) => Self::resolve_specialize(ctx, reporter, defs, scopes, subject, e),
            Expr::BuiltinType(e) => Self::resolve_builtin_type(ctx, e),
        }
    }

    fn resolve_ident(
        ctx: &mut LookupContext,
        reporter: &Reporter,
        subject: Subject,
        scopes: &ScopeStack,
        e: &IdentExpr,
    ) -> ResolvedExpr {
        let found = scopes.find(e.name, ctx);
        let mut candidates = found.members;

        if candidates.is_empty() {
            let target = ctx.interner.resolve(e.name).to_string();
            let mut finder = CloseMatchFinder::new(&target);
            scopes.for_all_names(&mut |name| finder.consider(ctx.interner.resolve(name)));
            let mut sink = reporter.error(ErrorCode::E2001).at(e.location).text("Name lookup failed: ").text(&target);
            if let Some(suggestion) = finder.best() {
                sink = sink.suggest(Suggestion::did_you_mean(suggestion));
            }
            drop(sink);
            candidates = MemberSmallVec::new();
        }

        let set = FillMemberSet::fill(ctx.arena, ctx.interner, reporter, subject, e.name, found.stem, e.location, &candidates);
        ResolvedExpr::Members(set)
    }

    fn resolve_member_ref(
        ctx: &mut LookupContext,
        reporter: &Reporter,
        defs: &DefnTable,
        scopes: &ScopeStack,
        subject: Subject,
        e: &MemberRefExpr,
    ) -> ResolvedExpr {
        let base = Self::resolve(ctx, reporter, defs, scopes, subject, &e.base);
        let ResolvedExpr::Members(base_set) = base else {
            reporter
                .error(ErrorCode::E2008)
                .at(e.location)
                .text("Invalid member reference base: base must resolve to a namespace or type");
            return ResolvedExpr::Members(empty_set(e.name, e.location));
        };
        if !matches!(base_set.genus, Genus::Namespace | Genus::Type) {
            reporter
                .error(ErrorCode::E2008)
                .at(e.location)
                .text("Invalid member reference base: base must resolve to a namespace or type");
            return ResolvedExpr::Members(empty_set(e.name, e.location));
        }

        let mut candidates = MemberSmallVec::new();
        for &base_member in &base_set.members {
            for hit in MemberLookup::lookup(ctx, defs, base_member, e.name) {
                if !candidates.contains(&hit) {
                    candidates.push(hit);
                }
            }
        }

        let stem = base_set.members.first().copied();
        let set = FillMemberSet::fill(ctx.arena, ctx.interner, reporter, subject, e.name, stem, e.location, &candidates);
        ResolvedExpr::Members(set)
    }

    fn resolve_specialize(
        ctx: &mut LookupContext,
        reporter: &Reporter,
        defs: &DefnTable,
        scopes: &ScopeStack,
        subject: Subject,
        e: &SpecializeExpr,
    ) -> ResolvedExpr {
        let callable = Self::resolve(ctx, reporter, defs, scopes, subject, &e.callable);
        for arg in &e.args {
            let _ = Self::resolve(ctx, reporter, defs, scopes, subject, arg);
        }
        callable
    }

    fn resolve_builtin_type(ctx: &LookupContext, e: &BuiltinTypeExpr) -> ResolvedExpr {
        let kind = match e.kind {
            BuiltinTypeKind::Void => PrimitiveKind::Void,
            BuiltinTypeKind::Bool => PrimitiveKind::Bool,
            BuiltinTypeKind::Char => PrimitiveKind::Char,
            BuiltinTypeKind::I8 => PrimitiveKind::I8,
            BuiltinTypeKind::I16 => PrimitiveKind::I16,
            BuiltinTypeKind::I32 => PrimitiveKind::I32,
            BuiltinTypeKind::I64 => PrimitiveKind::I64,
            BuiltinTypeKind::U8 => PrimitiveKind::U8,
            BuiltinTypeKind::U16 => PrimitiveKind::U16,
            BuiltinTypeKind::U32 => PrimitiveKind::U32,
            BuiltinTypeKind::U64 => PrimitiveKind::U64,
            BuiltinTypeKind::F32 => PrimitiveKind::F32,
            BuiltinTypeKind::F64 => PrimitiveKind::F64,
            // `Int`/`UInt` are the pointer-sized aliases: I32/U32 on a
            // 32-bit target, I64/U64 on a 64-bit one (`spec.md` line 153).
            BuiltinTypeKind::Int => native_int_kind(),
            BuiltinTypeKind::UInt => native_uint_kind(),
        };
        ResolvedExpr::Builtin(ctx.types.primitive(kind))
    }
}

#[cfg(target_pointer_width = "64")]
fn native_int_kind() -> PrimitiveKind {
    PrimitiveKind::I64
}

#[cfg(not(target_pointer_width = "64"))]
fn native_int_kind() -> PrimitiveKind {
    PrimitiveKind::I32
}

#[cfg(target_pointer_width = "64")]
fn native_uint_kind() -> PrimitiveKind {
    PrimitiveKind::U64
}

#[cfg(not(target_pointer_width = "64"))]
fn native_uint_kind() -> PrimitiveKind {
    PrimitiveKind::U32
}

fn empty_set(name: elan_ir::Name, location: elan_ir::Location) -> crate::subject::MemberSet {
    crate::subject::MemberSet {
        name,
        stem: None,
        location,
        genus: Genus::Incomplete,
        members: MemberSmallVec::new(),
    }
}
