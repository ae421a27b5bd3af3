//! `Context`: everything the compiler front end needs that isn't the
//! module set or the pass pipeline itself (`spec.md` §4.6, grounded on
//! `compiler/contextimpl.cpp`'s `ContextImpl`).

use elan_diagnostic::Reporter;
use elan_ir::NameInterner;
use elan_semantic::SemanticArena;
use elan_types::TypeStore;

use crate::{Essentials, ModulePathLookup};

/// Owns the Reporter, the module-path scope, the Type Store, the
/// semantic arena, the name interner, and the Essentials table. The
/// original additionally holds a back-reference to the owning Compiler
/// (for `importModuleFromSource`'s delegation); we invert that -
/// `Compiler` owns a `Context` rather than the reverse, and the
/// importer delegation is a method on `Compiler` instead, which avoids
/// the back-reference's aliasing entirely.
pub struct Context {
    pub reporter: Reporter,
    pub module_path: ModulePathLookup,
    pub types: TypeStore,
    pub arena: SemanticArena,
    pub interner: NameInterner,
    pub essentials: Essentials,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            reporter: Reporter::new(),
            module_path: ModulePathLookup::new(),
            types: TypeStore::new(),
            arena: SemanticArena::new(),
            interner: NameInterner::new(),
            essentials: Essentials::new(),
        }
    }
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
