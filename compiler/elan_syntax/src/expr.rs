//! Expression-position syntax: identifiers, member references,
//! specializations, and built-in type tags.
//!
//! Grounded on `ast::Ident`/`ast::MemberRef`/`ast::Oper`/`ast::BuiltInType`
//! (`sema/names/resolveexprs.cpp`). The original's expression grammar is
//! much larger (arithmetic, control flow, literals); `spec.md` §4.8.1
//! only ever resolves these four shapes, so that's all this crate
//! represents. Type-position syntax (parameter types, return types,
//! supertypes, subtype constraints) reuses the same `Expr` - the original
//! resolves a type annotation by running it through `ResolveExprs` and
//! then `ResolveTypes`, so a type name and a value name share one syntax
//! shape.

use elan_ir::{Location, Name};

#[derive(Clone, Debug)]
pub enum Expr {
    Ident(IdentExpr),
    MemberRef(MemberRefExpr),
    Specialize(SpecializeExpr),
    BuiltinType(BuiltinTypeExpr),
}

impl Expr {
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Expr::Ident(e) => e.location,
            Expr::MemberRef(e) => e.location,
            Expr::Specialize(e) => e.location,
            Expr::BuiltinType(e) => e.location,
        }
    }
}

#[derive(Clone, Debug)]
pub struct IdentExpr {
    pub name: Name,
    pub location: Location,
}

/// `base.name` - a qualified reference. `§9`'s open question on
/// `MemberRef` resolution covers how `elan_check` interprets this node.
#[derive(Clone, Debug)]
pub struct MemberRefExpr {
    pub base: Box<Expr>,
    pub name: Name,
    pub location: Location,
}

/// `callable<args...>` - generic instantiation.
#[derive(Clone, Debug)]
pub struct SpecializeExpr {
    pub callable: Box<Expr>,
    pub args: Vec<Expr>,
    pub location: Location,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BuiltinTypeKind {
    Void,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    Int,
    U8,
    U16,
    U32,
    U64,
    UInt,
    F32,
    F64,
}

#[derive(Clone, Debug)]
pub struct BuiltinTypeExpr {
    pub kind: BuiltinTypeKind,
    pub location: Location,
}
