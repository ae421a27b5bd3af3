//! Module- and definition-level syntax.
//!
//! Grounded on `ast::Module`/`ast::Defn`/`ast::ValueDefn`/`ast::TypeDefn`/
//! `ast::Function`/`ast::Property`/`ast::Parameter`/`ast::TypeParameter`/
//! `ast::Import` as referenced throughout `sema/passes/buildgraph.cpp`
//! and `sema/passes/nameresolution.cpp`, with field shapes and an
//! owned-`Vec`-of-definitions layout borrowed from `ori_ir::ast::items`
//! (`TypeDecl`/`Function`/`UseDef`).

use elan_ir::{Location, Name, Path};

use crate::expr::Expr;
use crate::requirement::Requirement;

/// `astVisibility`: `private`/`protected`/anything else (`buildgraph.cpp`).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

bitflags::bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
    pub struct Modifiers: u8 {
        const STATIC = 1 << 0;
        const FINAL = 1 << 1;
        const OVERRIDE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const UNDEF = 1 << 4;
    }
}

pub struct Module {
    pub name: Name,
    pub source_path: Path,
    pub imports: Vec<Import>,
    pub members: Vec<Defn>,
}

/// `import foo.bar.baz [as alias]`. `path` is the dotted absolute name;
/// resolution walks it one component at a time via the module-path scope
/// (`spec.md` §4.8 step 4).
pub struct Import {
    pub path: Vec<Name>,
    pub alias: Option<Name>,
    pub location: Location,
}

pub enum Defn {
    Value(ValueDefn),
    Type(TypeDefn),
    Function(FunctionDefn),
    Property(PropertyDefn),
}

impl Defn {
    #[must_use]
    pub fn name(&self) -> Name {
        match self {
            Defn::Value(d) => d.name,
            Defn::Type(d) => d.name,
            Defn::Function(d) => d.name,
            Defn::Property(d) => d.name,
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Defn::Value(d) => d.location,
            Defn::Type(d) => d.location,
            Defn::Function(d) => d.location,
            Defn::Property(d) => d.location,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ValueDefnKind {
    Let,
    Var,
    EnumValue,
}

pub struct ValueDefn {
    pub name: Name,
    pub kind: ValueDefnKind,
    pub value_type: Option<Expr>,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub location: Location,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TypeDefnKind {
    Class,
    Struct,
    Interface,
    /// Produces both a `TypeDefn` named `Name#Class` and a `Let` singleton
    /// named `Name` (`spec.md` §4.7's special case); the syntax node
    /// itself carries no extra shape beyond any other composite.
    Object,
    Enum,
}

pub struct TypeDefn {
    pub name: Name,
    pub kind: TypeDefnKind,
    pub type_params: Vec<TypeParam>,
    pub super_type: Option<Expr>,
    pub interfaces: Vec<Expr>,
    pub members: Vec<Defn>,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub location: Location,
}

pub struct TypeParam {
    pub name: Name,
    pub is_variadic: bool,
    pub subtype_constraints: Vec<Expr>,
    pub location: Location,
}

pub struct Param {
    pub name: Name,
    pub param_type: Option<Expr>,
    pub is_keyword_only: bool,
    pub is_variadic: bool,
    pub is_self_param: bool,
    pub is_class_param: bool,
    pub is_expansion: bool,
    pub location: Location,
}

pub struct FunctionDefn {
    pub name: Name,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub return_type: Option<Expr>,
    pub where_clauses: Vec<Requirement>,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub location: Location,
}

pub struct PropertyDefn {
    pub name: Name,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub value_type: Option<Expr>,
    pub getter: Option<Box<FunctionDefn>>,
    pub setter: Option<Box<FunctionDefn>>,
    pub where_clauses: Vec<Requirement>,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub location: Location,
}
