//! `where`-clause requirement syntax.
//!
//! Grounded on the `ast::Kind::CALL_REQUIRED`/`CALL_REQUIRED_STATIC`/
//! `EQUAL`/`REF_EQUAL`/`NOT_EQUAL`/`LESS_THAN`/`GREATER_THAN`/
//! `LESS_THAN_OR_EQUAL`/`GREATER_THAN_OR_EQUAL` node kinds
//! `sema/names/resolverequirements.cpp` dispatches on. These are
//! syntactically distinct from the general `Expr` grammar in the
//! original (any expression node may appear as a requirement), but
//! `spec.md` §4.8.5 only ever describes these eight forms, so this crate
//! models them as their own small enum rather than folding requirements
//! into `Expr`.

use elan_ir::Location;

use crate::expr::Expr;

#[derive(Clone, Debug)]
pub enum Requirement {
    /// `callable(argtypes...)`, optionally `static`. `arg_types` are
    /// type-position expressions, one per declared parameter.
    CallRequired {
        callable: Expr,
        arg_types: Vec<Expr>,
        is_static: bool,
        location: Location,
    },
    Equal(Expr, Expr, Location),
    RefEqual(Expr, Expr, Location),
    NotEqual(Expr, Expr, Location),
    LessThan(Expr, Expr, Location),
    GreaterThan(Expr, Expr, Location),
    LessThanOrEqual(Expr, Expr, Location),
    GreaterThanOrEqual(Expr, Expr, Location),
}

impl Requirement {
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Requirement::CallRequired { location, .. }
            | Requirement::Equal(_, _, location)
            | Requirement::RefEqual(_, _, location)
            | Requirement::NotEqual(_, _, location)
            | Requirement::LessThan(_, _, location)
            | Requirement::GreaterThan(_, _, location)
            | Requirement::LessThanOrEqual(_, _, location)
            | Requirement::GreaterThanOrEqual(_, _, location) => *location,
        }
    }
}
