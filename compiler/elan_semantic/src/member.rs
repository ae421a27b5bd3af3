//! `Member`: the tagged variant every named entity in the semantic graph
//! is built from. Grounded on `semgraph/defn.h`/`defn.cpp` (the
//! Package/Module/TypeDefn/TypeParameter/Function/Property/ValueDefn/
//! Parameter/SpecializedMember hierarchy) and `sema/passes/buildgraph.cpp`
//! (which fields each kind needs at construction time).
//!
//! # Departure from the teacher's per-module arena
//!
//! `spec.md` §3.4 describes each Module owning a private arena of its
//! Members. The original can do this because Members are referenced by
//! raw pointer, so one module's arena can hold a pointer into another's.
//! An index-based [`elan_ir::Arena`] cannot: an `Id<T>` is only meaningful
//! against the exact `Arena<T>` that produced it, so per-module arenas
//! would need a second, global id space layered on top to let imports
//! reference another module's Members at all. Since `spec.md` §3.4 also
//! says Modules "are retained until the compiler exits" - nothing in this
//! subsystem ever tears one down early - the per-module arena buys
//! nothing a single global one doesn't, so every Member, from every
//! module, lives in one [`SemanticArena`]. A module's own scopes
//! (`ModuleData::member_scope`) already answer "which Members belong to
//! this module" for every caller that needs it.
//!
//! A module's syntax-tree attachment is deliberately not a field here:
//! that would pull `elan_syntax` into this crate's dependency graph for a
//! single read-only back-pointer. The pass that needs it (Build-Graph,
//! in `elan_check`) keeps its own `MemberId -> ast::ModuleId` side table.

use elan_ir::{Arena, Id, Name, Location};
use elan_types::{Env, Type};
use rustc_hash::FxHashMap;

use crate::scope::{DirectoryScope, InheritedScope, StandardScope};
use crate::visibility::{Modifiers, Visibility};

pub type MemberId = Id<MemberData>;

pub struct MemberData {
    pub name: Name,
    pub defined_in: Option<MemberId>,
    pub location: Option<Location>,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub payload: MemberPayload,
}

pub enum MemberPayload {
    Package(PackageData),
    Module(ModuleData),
    TypeDefn(TypeDefnData),
    TypeParameter(TypeParameterData),
    Function(FunctionData),
    Property(PropertyData),
    Value(ValueData),
    Specialized(SpecializedData),
}

/// Coarse tag mirroring `Member::Kind`, for call sites that only need to
/// switch on kind without matching the payload.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MemberKind {
    Package,
    Module,
    TypeDefn,
    TypeParameter,
    Function,
    Property,
    Value,
    Specialized,
}

impl MemberPayload {
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberPayload::Package(_) => MemberKind::Package,
            MemberPayload::Module(_) => MemberKind::Module,
            MemberPayload::TypeDefn(_) => MemberKind::TypeDefn,
            MemberPayload::TypeParameter(_) => MemberKind::TypeParameter,
            MemberPayload::Function(_) => MemberKind::Function,
            MemberPayload::Property(_) => MemberKind::Property,
            MemberPayload::Value(_) => MemberKind::Value,
            MemberPayload::Specialized(_) => MemberKind::Specialized,
        }
    }
}

pub struct PackageData {
    pub scope: DirectoryScope,
}

pub struct ModuleData {
    pub source_path: elan_ir::Path,
    pub member_scope: StandardScope,
    pub import_scope: StandardScope,
}

/// `spec.md` §3.1: a TypeDefn always backs a class/struct/interface/enum
/// `Composite` (primitives are process-static, not TypeDefns), so unlike
/// the spec's hedge ("only for class/struct/interface/enum") every field
/// here is unconditional rather than `Option`.
pub struct TypeDefnData {
    pub ty: Type,
    pub member_scope: StandardScope,
    pub inherited_scope: InheritedScope,
    pub type_param_scope: StandardScope,
    pub required_method_scope: StandardScope,
    pub type_params: Vec<MemberId>,
    /// Keyed by the `Member` a `where T.f(...)` requirement targets;
    /// created lazily per `spec.md` §4.8.5.
    pub intercept_scopes: FxHashMap<MemberId, StandardScope>,
}

pub struct TypeParameterData {
    /// `None` selects genus `Type` during `FillMemberSet`; `Some`
    /// selects genus `Variable` (`spec.md` §4.8.2).
    pub value_type: Option<Type>,
    /// Fresh `TypeVar` type created by `TypeStore::create_type_var` at
    /// Build-Graph time (`spec.md` §4.7).
    pub type_var: Type,
    /// Subtype constraints used by `MemberLookup`'s TypeParameter case
    /// (`spec.md` §4.8.3).
    pub subtype_constraints: Vec<Type>,
}

pub struct FunctionData {
    pub params: Vec<MemberId>,
    pub type_params: Vec<MemberId>,
    pub param_scope: StandardScope,
    pub type_param_scope: StandardScope,
    pub return_type: Option<Type>,
    /// Set by `ResolveRequirements` for synthetic functions built from a
    /// `where` clause (`spec.md` §4.8.5).
    pub requirement: bool,
}

pub struct PropertyData {
    pub params: Vec<MemberId>,
    pub type_params: Vec<MemberId>,
    pub param_scope: StandardScope,
    pub type_param_scope: StandardScope,
    pub value_type: Option<Type>,
    pub getter: Option<MemberId>,
    pub setter: Option<MemberId>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ValueKind {
    Let,
    Var,
    Param,
    EnumValue,
    TupleMember,
}

pub struct ValueData {
    pub kind: ValueKind,
    pub value_type: Option<Type>,
    /// Tracks whether a `Let`/`Var` has been assigned yet, for the
    /// "reference before assignment" diagnostic (`spec.md` §4.8.2).
    pub initialized: bool,
}

pub struct SpecializedData {
    pub generic: MemberId,
    pub env: Env,
}

/// Owns every `Member` ever allocated. See the module doc for why this is
/// one global arena rather than one per module.
#[derive(Default)]
pub struct SemanticArena {
    members: Arena<MemberData>,
}

impl SemanticArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, data: MemberData) -> MemberId {
        self.members.alloc(data)
    }

    #[must_use]
    pub fn get(&self, id: MemberId) -> &MemberData {
        self.members.get(id)
    }

    pub fn get_mut(&mut self, id: MemberId) -> &mut MemberData {
        self.members.get_mut(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Unwraps `Specialized` wrappers, repeatedly, per `spec.md` §3.3
/// invariant 4 ("chains are flattened on construction") and §9's call for
/// one centralized unwrap helper.
#[must_use]
pub fn unwrap_specialized(arena: &SemanticArena, mut id: MemberId) -> MemberId {
    while let MemberPayload::Specialized(data) = &arena.get(id).payload {
        id = data.generic;
    }
    id
}

/// Walks the `definedIn` chain starting at (and including) `start`,
/// outermost last. Used by visibility's `containsSubject` and by
/// `Subject::isVisible`'s protected-inheritance search.
pub fn enclosing_chain(arena: &SemanticArena, start: MemberId) -> Vec<MemberId> {
    let mut chain = Vec::new();
    let mut current = Some(start);
    while let Some(id) = current {
        chain.push(id);
        current = arena.get(id).defined_in;
    }
    chain
}

#[derive(Debug, thiserror::Error)]
pub enum MemberTypeError {
    #[error("member has no associated type (Function/Property/Specialized require caller-side handling)")]
    Unsupported,
}

/// `spec.md` §4.2 `memberType`. Namespace kinds (`Package`/`Module`)
/// return the Type Store's `ERROR` sentinel, matching `typestore.cpp`'s
/// behavior of never asserting on a namespace member.
pub fn member_type(arena: &SemanticArena, types: &elan_types::TypeStore, id: MemberId) -> Result<Type, MemberTypeError> {
    match &arena.get(id).payload {
        MemberPayload::Package(_) | MemberPayload::Module(_) => Ok(types.error()),
        MemberPayload::TypeDefn(t) => Ok(t.ty.clone()),
        MemberPayload::TypeParameter(t) => Ok(t.type_var.clone()),
        MemberPayload::Value(v) => Ok(v.value_type.clone().unwrap_or_else(|| types.error())),
        MemberPayload::Function(_) | MemberPayload::Property(_) | MemberPayload::Specialized(_) => {
            Err(MemberTypeError::Unsupported)
        }
    }
}
