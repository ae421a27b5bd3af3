//! `Pass`: the unit of work a `Phase` runs once per module, and
//! `PassContext`: the mutable state bundle every pass threads through
//! its `run` call (`spec.md` §4.6).
//!
//! The original's `sema::Pass` base (`sema/pass.h`) carries no retrieved
//! body, so this surface is reconstructed from how `Phase::run` drives
//! it (`compiler/phase.cpp`): a name, a prerequisite list the driver
//! checks before calling in, and `run(module)`.

use elan_diagnostic::Reporter;
use elan_ir::NameInterner;
use elan_semantic::{MemberId, ModuleImporter, SemanticArena};
use elan_syntax::Module;
use elan_types::TypeStore;
use rustc_hash::FxHashMap;

use crate::{Essentials, ModulePathLookup};

/// Every handle a pass needs to walk one module's syntax tree and grow
/// the semantic graph over it. Bundled the same way `LookupContext`
/// bundles a lookup's dependencies (`elan_semantic::scope`), for the
/// same reason: threading five separate `&mut` parameters through every
/// visitor method is worse than one struct of disjoint borrows.
pub struct PassContext<'a> {
    pub arena: &'a mut SemanticArena,
    pub interner: &'a mut NameInterner,
    pub types: &'a mut TypeStore,
    pub reporter: &'a Reporter,
    pub module_path: &'a ModulePathLookup,
    pub essentials: &'a Essentials,
    /// Owned rather than borrowed: the adapter behind this trait object
    /// holds only shared references into `Compiler`'s interior-mutable
    /// module registry (see `compiler.rs`), so a fresh one is cheap to
    /// build per `(pass, module)` call and there's nothing for a
    /// borrowed `&mut` to usefully alias here.
    pub importer: Box<dyn ModuleImporter + 'a>,
    /// The syntax tree each Module Member was built from. A pass looks
    /// up its module's tree here rather than owning one itself, since
    /// the tree is read-only from a pass's perspective (`spec.md` §4.7:
    /// "attaches the syntax node (read-only back-reference)").
    pub module_syntax: &'a std::cell::RefCell<FxHashMap<MemberId, Module>>,
}

/// A single compiler pass, run once per unfinished module in a `Phase`.
pub trait Pass {
    /// Stable name used in prerequisite checks and diagnostics; matches
    /// the class name the original's Python pseudocode reports
    /// (`passToRun.__class__.__name__`).
    fn name(&self) -> &'static str;

    /// Names of passes that must already have run against a module
    /// before this one may. `Phase::run` checks this, not the pass
    /// itself.
    fn prereqs(&self) -> &'static [&'static str] {
        &[]
    }

    fn run(&mut self, module: MemberId, ctx: &mut PassContext);
}
