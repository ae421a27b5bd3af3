//! `ModulePathScope` and the `FileSystemImporter`.
//!
//! Grounded on `scope/modulepathscope.cpp` (an ordered list of Importers,
//! queried in order, results concatenated) and `compiler/fsimport.cpp`'s
//! `FileSystemImporter` (the sole production Importer: a list of root
//! Packages with their originating filesystem paths, `addPath`/
//! `getPackageForPath`). `spec.md` §4.4: `lookupName` does *not* apply a
//! first-match policy - every root is consulted and results appended, so
//! an ambiguity (two roots exposing the same top-level package name)
//! surfaces through the member-set classifier rather than being silently
//! resolved by import order.

use elan_ir::{Name, NameInterner, Path};

use super::directory::DirectoryScope;
use super::{LookupContext, MemberSmallVec, Scope, ScopeKind};
use crate::member::{MemberId, MemberPayload, SemanticArena};
use crate::visibility::{Modifiers, Visibility};

pub trait Importer {
    fn lookup_name(&self, name: Name, ctx: &mut LookupContext, out: &mut MemberSmallVec);
}

struct FsRoot {
    path: Path,
    package: MemberId,
}

#[derive(Default)]
pub struct FileSystemImporter {
    roots: Vec<FsRoot>,
}

impl FileSystemImporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `addPath`: creates a root Package named after `dir`'s final path
    /// component, attaches a fresh `DirectoryScope`, and registers it.
    pub fn add_path(&mut self, dir: Path, arena: &mut SemanticArena, interner: &mut NameInterner) -> MemberId {
        let name = interner.intern(&dir.name());
        let package = arena.alloc(crate::member::MemberData {
            name,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: Modifiers::empty(),
            payload: MemberPayload::Package(crate::member::PackageData {
                scope: DirectoryScope::new(dir.clone()),
            }),
        });
        self.roots.push(FsRoot { path: dir, package });
        package
    }

    /// `getPackageForPath`: strips whichever root's path is a prefix of
    /// `fs_path` and drills the remainder as package names. Returns
    /// `None` if no root matches or an intermediate package was never
    /// materialized.
    #[must_use]
    pub fn get_package_for_path(&self, fs_path: &Path, arena: &SemanticArena, interner: &NameInterner) -> Option<MemberId> {
        for root in &self.roots {
            if !fs_path.as_std().starts_with(root.path.as_std()) {
                continue;
            }
            let relative = fs_path.make_relative(&root.path);
            let mut current = root.package;
            for part in relative.parts() {
                let name = interner.get(&part)?;
                match &arena.get(current).payload {
                    MemberPayload::Package(p) => current = p.scope.cached_child(name)?,
                    _ => return None,
                }
            }
            return Some(current);
        }
        None
    }
}

impl Importer for FileSystemImporter {
    fn lookup_name(&self, name: Name, ctx: &mut LookupContext, out: &mut MemberSmallVec) {
        for root in &self.roots {
            let scope = match &ctx.arena.get(root.package).payload {
                MemberPayload::Package(p) => p.scope.clone(),
                _ => continue,
            };
            scope.lookup_name(name, ctx, out);
        }
    }
}

#[derive(Default)]
pub struct ModulePathScope {
    importers: Vec<Box<dyn Importer>>,
}

impl ModulePathScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_importer(&mut self, importer: Box<dyn Importer>) {
        self.importers.push(importer);
    }
}

impl Scope for ModulePathScope {
    /// `ModulePathScope` has no declared members of its own; adding one
    /// directly is a caller error the original never exercises.
    fn add_member(&mut self, _name: Name, _member: MemberId) {}

    fn lookup_name(&self, name: Name, ctx: &mut LookupContext, out: &mut MemberSmallVec) {
        for importer in &self.importers {
            importer.lookup_name(name, ctx, out);
        }
    }

    fn for_all_names(&self, _f: &mut dyn FnMut(Name)) {}

    fn scope_kind(&self) -> ScopeKind {
        ScopeKind::Default
    }
}
