//! `DirectoryScope`: a filesystem directory as a lookup scope.
//!
//! Grounded on `compiler/fsimport.cpp`'s `DirectoryScope`/`Context
//! ::importModuleFromSource` pairing: a directory is listed once and
//! cached; `package.txt`, if present, is parsed into an alias map; a
//! lookup either follows an alias, reuses an already-materialized child
//! Package, or touches the filesystem to materialize one (`spec.md`
//! §4.3, §6).
//!
//! `DirectoryScope` is cheap to `Clone` (an `Rc<RefCell<..>>` around its
//! mutable cache) so callers can copy it out of the `Package` Member that
//! owns it, drop the arena borrow that produced the copy, and then call
//! `lookup_name` with a fresh `&mut` borrow of the same arena - the
//! aliasing the alternative (borrowing the scope and the arena at once)
//! would forbid.

use std::cell::RefCell;
use std::rc::Rc;

use elan_ir::{Name, Path};
use rustc_hash::FxHashMap;

use super::{LookupContext, MemberSmallVec, Scope, ScopeKind};
use crate::member::{MemberId, SemanticArena};

/// Callback the driver implements to parse (or return a cached) Module
/// for a `.sp` source file. Kept as a trait here, implemented in
/// `elan_driver`/`elan_check`, so this crate never depends on a parser.
pub trait ModuleImporter {
    fn import_module_from_source(
        &mut self,
        path: &Path,
        arena: &mut SemanticArena,
        interner: &mut elan_ir::NameInterner,
    ) -> Option<MemberId>;
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum EntryKind {
    Dir,
    File,
}

#[derive(Default)]
struct DirectoryScopeInner {
    /// Lazily populated on first lookup/`for_all_names` call.
    listing: Option<FxHashMap<Name, EntryKind>>,
    /// Lazily parsed from `package.txt`; maps an alias name to its
    /// dotted expansion (e.g. `foo.bar.baz` -> `["foo", "bar", "baz"]`).
    aliases: Option<FxHashMap<Name, Vec<Name>>>,
    /// Already-materialized Package/Module children, keyed by the
    /// filesystem entry's stem.
    children: FxHashMap<Name, MemberId>,
}

#[derive(Clone)]
pub struct DirectoryScope {
    root: Path,
    inner: Rc<RefCell<DirectoryScopeInner>>,
}

impl DirectoryScope {
    #[must_use]
    pub fn new(root: Path) -> Self {
        DirectoryScope {
            root,
            inner: Rc::new(RefCell::new(DirectoryScopeInner::default())),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Already-materialized child, if any, without touching the
    /// filesystem. Used by `FileSystemImporter::get_package_for_path`,
    /// which only ever asks about packages its own `add_path`/prior
    /// lookups have already created.
    #[must_use]
    pub fn cached_child(&self, name: Name) -> Option<MemberId> {
        self.inner.borrow().children.get(&name).copied()
    }

    fn ensure_listing(&self, interner: &mut elan_ir::NameInterner, reporter: &elan_diagnostic::Reporter) {
        let mut inner = self.inner.borrow_mut();
        if inner.listing.is_some() {
            return;
        }
        let mut listing = FxHashMap::default();
        for entry in self.root.read_dir_names() {
            let entry_path = self.root.join(&entry);
            let kind = if entry_path.is_dir() {
                EntryKind::Dir
            } else if entry_path.is_file() {
                EntryKind::File
            } else {
                continue;
            };
            // Directory entries are keyed by their bare name (no
            // extension to strip); file entries are keyed by their stem,
            // since a dotted path component never spells the `.sp`
            // suffix and the `File` branch below re-appends it via
            // `with_suffix` before handing the path to the importer.
            let key = match kind {
                EntryKind::Dir => entry.clone(),
                EntryKind::File => entry_path.stem(),
            };
            listing.insert(interner.intern(&key), kind);
        }
        inner.listing = Some(listing);

        if inner.aliases.is_none() {
            inner.aliases = Some(self.parse_aliases(interner, reporter));
        }
    }

    /// Parses `package.txt`: each non-empty line is a dotted name whose
    /// last component is the alias and whose full list is the expansion
    /// (`spec.md` §6). A line with fewer than two components is rejected
    /// with a fatal `E2005` diagnostic and otherwise skipped, matching
    /// `fsimport.cpp`'s `context.reporter().fatal() << "Invalid alias in
    /// package.txt: " << line`.
    fn parse_aliases(&self, interner: &mut elan_ir::NameInterner, reporter: &elan_diagnostic::Reporter) -> FxHashMap<Name, Vec<Name>> {
        let mut aliases = FxHashMap::default();
        let package_txt = self.root.join("package.txt");
        let Ok(contents) = std::fs::read_to_string(package_txt.as_std()) else {
            return aliases;
        };
        let file = interner.intern(&package_txt.to_string_lossy());
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split('.').collect();
            if parts.len() < 2 {
                let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
                reporter
                    .fatal(elan_diagnostic::ErrorCode::E2005)
                    .at(elan_ir::Location::on_line(file, line_no, 1, 1))
                    .text("Invalid alias in package.txt: ")
                    .text(line);
                continue;
            }
            let alias = interner.intern(parts[parts.len() - 1]);
            let expansion = parts.iter().map(|p| interner.intern(p)).collect();
            aliases.insert(alias, expansion);
        }
        aliases
    }

    /// Drills through each part of a dotted alias expansion, starting at
    /// this directory and then through each intermediate Package/
    /// Module/Type's member scope (`spec.md` §4.3).
    fn drill_alias(&self, parts: &[Name], ctx: &mut LookupContext, out: &mut MemberSmallVec) {
        let Some((&first, rest)) = parts.split_first() else {
            return;
        };
        let mut current = MemberSmallVec::new();
        self.lookup_name(first, ctx, &mut current);
        for &part in rest {
            let mut next = MemberSmallVec::new();
            for member in &current {
                if let Some(scope) = scope_for_drill(ctx.arena, *member) {
                    scope.lookup_name(part, ctx, &mut next);
                }
            }
            current = next;
        }
        out.extend(current);
    }
}

/// Returns the scope a Package/Module/composite Type exposes for further
/// drilling, per the chain `DirectoryScope`'s alias expansion walks, and
/// the same "package/module/type member scope" chain `spec.md` §4.5's
/// Essentials loader walks to resolve an absolute dotted path.
/// Value-kind Members have no member scope and yield `None`. Each branch
/// clones its scope out of the arena (`DirectoryScope` cheaply via its
/// `Rc`, `StandardScope` by value) so the immutable borrow of `arena`
/// ends before the caller threads a `&mut` arena into the lookup itself.
#[must_use]
pub fn scope_for_drill(arena: &SemanticArena, id: MemberId) -> Option<Box<dyn Scope>> {
    use crate::member::MemberPayload;
    match &arena.get(id).payload {
        MemberPayload::Package(p) => Some(Box::new(p.scope.clone())),
        MemberPayload::Module(m) => Some(Box::new(m.member_scope.clone())),
        MemberPayload::TypeDefn(t) => Some(Box::new(t.member_scope.clone())),
        _ => None,
    }
}

impl Scope for DirectoryScope {
    fn add_member(&mut self, name: Name, member: MemberId) {
        self.inner.borrow_mut().children.insert(name, member);
    }

    fn lookup_name(&self, name: Name, ctx: &mut LookupContext, out: &mut MemberSmallVec) {
        self.ensure_listing(ctx.interner, ctx.reporter);

        let alias_parts = {
            let inner = self.inner.borrow();
            inner.aliases.as_ref().and_then(|a| a.get(&name)).cloned()
        };
        if let Some(parts) = alias_parts {
            self.drill_alias(&parts, ctx, out);
            return;
        }

        if let Some(&cached) = self.inner.borrow().children.get(&name) {
            out.push(cached);
            return;
        }

        let entry_kind = self.inner.borrow().listing.as_ref().and_then(|l| l.get(&name).copied());
        match entry_kind {
            Some(EntryKind::Dir) => {
                let stem = ctx.interner.resolve(name).to_string();
                let subdir = self.root.join(&stem);
                let package = crate::member::MemberData {
                    name,
                    defined_in: None,
                    location: None,
                    visibility: crate::visibility::Visibility::Public,
                    modifiers: crate::visibility::Modifiers::empty(),
                    payload: crate::member::MemberPayload::Package(crate::member::PackageData {
                        scope: DirectoryScope::new(subdir),
                    }),
                };
                let id = ctx.arena.alloc(package);
                self.inner.borrow_mut().children.insert(name, id);
                out.push(id);
            }
            Some(EntryKind::File) => {
                let stem = ctx.interner.resolve(name).to_string();
                let file_path = self.root.join(&stem).with_suffix(".sp");
                if let Some(module) = ctx.importer.import_module_from_source(&file_path, ctx.arena, ctx.interner) {
                    self.inner.borrow_mut().children.insert(name, module);
                    out.push(module);
                }
            }
            None => {}
        }
    }

    fn for_all_names(&self, f: &mut dyn FnMut(Name)) {
        let inner = self.inner.borrow();
        if let Some(listing) = &inner.listing {
            for (&name, kind) in listing {
                if matches!(kind, EntryKind::File) {
                    f(name);
                }
            }
        }
        if let Some(aliases) = &inner.aliases {
            for &alias in aliases.keys() {
                f(alias);
            }
        }
    }

    fn scope_kind(&self) -> ScopeKind {
        ScopeKind::Default
    }
}
