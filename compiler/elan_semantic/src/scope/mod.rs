//! The scope graph: polymorphic lookup nodes over the capability set
//! `spec.md` §4.3 describes (`addMember`, `lookupName`, `forAllNames`,
//! `scopeType`). `§9`'s design note calls for a sum-type-plus-trait
//! rather than virtual dispatch; `Scope` is that trait, and `ScopeStack`
//! stores trait objects over it.

mod directory;
mod inherited;
mod module_path;
mod specialized;
mod stack;
mod standard;

pub use directory::{scope_for_drill, DirectoryScope, ModuleImporter};
pub use inherited::InheritedScope;
pub use module_path::{FileSystemImporter, Importer, ModulePathScope};
pub use specialized::SpecializedScope;
pub use stack::{ScopeStack, StackFind};
pub use standard::StandardScope;

use elan_ir::{Name, NameInterner};
use elan_types::TypeStore;
use smallvec::SmallVec;

use crate::member::{MemberId, SemanticArena};

/// Inline capacity for lookup result sets: most lookups resolve to a
/// single Member, and a handful (ambiguous imports, overload sets) to a
/// few more; this avoids a heap allocation for the common case.
pub type MemberSmallVec = SmallVec<[MemberId; 4]>;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScopeKind {
    Default,
    Instance,
    TypeParam,
    Constraint,
    Intercept,
}

/// Shared state a scope's `lookup_name` may need: the semantic arena (to
/// read or allocate Members), the name interner (to turn raw filesystem
/// entries into `Name`s), the Type Store (for `SpecializedScope`'s member
/// specialization), the importer callback `DirectoryScope` uses to
/// materialize Modules on demand, and the `Reporter` `DirectoryScope`
/// uses to raise a fatal diagnostic on a malformed `package.txt` line.
/// Every lookup call site builds one of these and threads it through the
/// scope stack.
pub struct LookupContext<'a> {
    pub arena: &'a mut SemanticArena,
    pub interner: &'a mut NameInterner,
    pub types: &'a TypeStore,
    pub importer: &'a mut dyn ModuleImporter,
    pub reporter: &'a elan_diagnostic::Reporter,
}

pub trait Scope {
    /// Appends `member` under `name`. Scopes never remove or overwrite an
    /// existing entry (`spec.md` §3.3 invariant 3).
    fn add_member(&mut self, name: Name, member: MemberId);

    fn lookup_name(&self, name: Name, ctx: &mut LookupContext, out: &mut MemberSmallVec);

    fn for_all_names(&self, f: &mut dyn FnMut(Name));

    fn scope_kind(&self) -> ScopeKind;
}
