//! Absolute dotted-path resolution over a `ModulePathScope`.
//!
//! Grounded on `sema/types/essentials.cpp`'s `findAbsoluteSymbol` and its
//! twin in `nameresolution.cpp` (used there to resolve an absolute import
//! path): split the path on `.`, look the first component up in the
//! module-path scope, then drill through each subsequent component's
//! Package/Module/Type member scope. Both call sites want the identical
//! walk, so it lives once here and `Essentials::load` and
//! `elan_check`'s import resolution both call it.

use elan_diagnostic::Reporter;
use elan_ir::NameInterner;
use elan_semantic::{scope_for_drill, LookupContext, MemberId, MemberSmallVec, ModuleImporter, ModulePathScope, Scope};
use elan_types::TypeStore;

/// Thin wrapper around `ModulePathScope` exposing the absolute-path walk.
/// Holds no state of its own beyond the scope; `Context` owns one.
#[derive(Default)]
pub struct ModulePathLookup {
    scope: ModulePathScope,
}

impl ModulePathLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scope(&self) -> &ModulePathScope {
        &self.scope
    }

    #[must_use]
    pub fn scope_mut(&mut self) -> &mut ModulePathScope {
        &mut self.scope
    }

    /// Resolves a dotted absolute path (e.g. `elan.core.any.Any`) to a
    /// single Member. Returns `None` if any component fails to resolve
    /// to exactly one Member - the original asserts `members.size() ==
    /// 1` at each step; this walk is stricter about it and simply stops,
    /// leaving the caller (which owns the Reporter) to report the
    /// failure.
    pub fn find_absolute_symbol(
        &self,
        path: &str,
        arena: &mut elan_semantic::SemanticArena,
        interner: &mut NameInterner,
        types: &TypeStore,
        importer: &mut dyn ModuleImporter,
        reporter: &Reporter,
    ) -> Option<MemberId> {
        let mut current: Option<MemberId> = None;
        for part in path.split('.') {
            let name = interner.intern(part);
            let mut out = MemberSmallVec::new();
            // Reborrowed rather than moved: the loop needs `arena`,
            // `interner`, and `importer` again on its next iteration.
            let mut ctx = LookupContext {
                arena: &mut *arena,
                interner: &mut *interner,
                types,
                importer: &mut *importer,
                reporter,
            };
            match current {
                None => self.scope.lookup_name(name, &mut ctx, &mut out),
                Some(member) => {
                    if let Some(scope) = scope_for_drill(ctx.arena, member) {
                        scope.lookup_name(name, &mut ctx, &mut out);
                    }
                }
            }
            if out.len() != 1 {
                return None;
            }
            current = Some(out[0]);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elan_ir::Path;
    use elan_semantic::{FileSystemImporter, SemanticArena};
    use elan_types::TypeStore;

    struct NoopImporter;
    impl ModuleImporter for NoopImporter {
        fn import_module_from_source(
            &mut self,
            _path: &Path,
            _arena: &mut SemanticArena,
            _interner: &mut NameInterner,
        ) -> Option<MemberId> {
            None
        }
    }

    #[test]
    fn missing_path_resolves_to_none() {
        let mut lookup = ModulePathLookup::new();
        let fs = FileSystemImporter::new();
        lookup.scope_mut().push_importer(Box::new(fs));

        let mut arena = SemanticArena::default();
        let mut interner = NameInterner::new();
        let types = TypeStore::new();
        let mut importer = NoopImporter;
        let reporter = Reporter::new();

        let result = lookup.find_absolute_symbol("nonexistent.path", &mut arena, &mut interner, &types, &mut importer, &reporter);
        assert!(result.is_none());
    }
}
