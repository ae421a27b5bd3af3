//! elan_semantic - the semantic graph and the scope graph built over it.
//!
//! - `member`: `Member`/`MemberData`, the tagged-variant semantic graph
//!   node (`spec.md` §3.1), and the arena that owns them.
//! - `visibility`: `Visibility` and modifier bits.
//! - `scope`: the polymorphic scope hierarchy (`spec.md` §4.3) -
//!   `StandardScope`, `InheritedScope`, `SpecializedScope`,
//!   `DirectoryScope`, `ModulePathScope`/`FileSystemImporter`,
//!   `ScopeStack`.
//! - `closematch`: Levenshtein "did you mean" suggestions.
//!
//! # Why scopes live in the same crate as Members
//!
//! The original keeps `semgraph::` (Members) and `scope::` (Scopes) in
//! separate namespaces, but a `TypeDefn`'s member scope holds `Member*`
//! pointers and a `Scope::addMember` call takes a `Member*` - in a single
//! C++ translation unit that's free, but splitting them into two Rust
//! crates makes it a dependency cycle (`elan_semantic` would need
//! `elan_scope` for `TypeDefnData::member_scope`'s type, and
//! `elan_scope` would need `elan_semantic` for `MemberId`). Rather than
//! introduce a back-channel trait object to split them, both live here;
//! see DESIGN.md for the fuller rationale.

mod closematch;
mod member;
pub mod scope;
mod visibility;

pub use closematch::{edit_distance, CloseMatchFinder};
pub use member::{
    enclosing_chain, member_type, unwrap_specialized, FunctionData, MemberData, MemberId, MemberKind, MemberPayload,
    MemberTypeError, ModuleData, PackageData, PropertyData, SemanticArena, SpecializedData, TypeDefnData,
    TypeParameterData, ValueData, ValueKind,
};
pub use scope::{
    scope_for_drill, DirectoryScope, FileSystemImporter, Importer, InheritedScope, LookupContext, MemberSmallVec,
    ModuleImporter, ModulePathScope, Scope, ScopeKind, ScopeStack, SpecializedScope, StackFind, StandardScope,
};
pub use visibility::{Modifiers, Visibility};
