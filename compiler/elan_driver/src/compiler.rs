//! `Compiler`: owns the module registry, the pluggable source parser,
//! and the `Context`; drives `Phase`s over the registered modules and
//! implements `ModuleImporter` so scope lookups can pull in new modules
//! on demand (`spec.md` §4.6, grounded on `compiler/compiler.cpp`'s
//! empty-but-named role as the thing `Context::importModuleFromSource`
//! delegates to via `parseImportSource`).
//!
//! The module registry, the path cache, and the syntax-tree table are
//! each wrapped in a `RefCell`: a `Phase` run needs a stable snapshot of
//! "which modules to iterate this invocation" (`spec.md` §4.6 - index-
//! based, not iterator-based, so growth mid-iteration is tolerated) at
//! the same time a pass's scope lookups may, through `ModuleImporter`,
//! append brand-new modules to that same registry. A plain `&mut
//! Vec<MemberId>` can't be both snapshotted and grown at once; a shared
//! `&RefCell<Vec<MemberId>>` can.

use std::cell::RefCell;
use std::path::PathBuf;

use elan_diagnostic::{ErrorCode, Reporter};
use elan_ir::{NameInterner, Path};
use elan_semantic::{
    MemberData, MemberId, MemberPayload, ModuleData, ModuleImporter, ScopeKind, SemanticArena, StandardScope,
    Visibility,
};
use elan_syntax::Module;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::Context;
use crate::pass::PassContext;
use crate::phase::Phase;

/// External collaborator the driver treats as a black box: parsing is
/// explicitly out of scope (`spec.md` §1), so `Compiler` depends only on
/// this trait, not on any concrete lexer/parser crate.
pub trait SourceParser {
    /// Parses the file at `path` into a syntax-tree `Module`. The
    /// interner is threaded through so identifiers in the parsed tree
    /// share the same `Name` space as the rest of the compiler.
    fn parse_module(&mut self, path: &Path, interner: &mut NameInterner) -> Result<Module, SourceParseError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceParseError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },
}

pub struct Compiler {
    pub context: Context,
    parser: RefCell<Box<dyn SourceParser>>,
    /// Every Module Member created so far, in creation order.
    modules: RefCell<Vec<MemberId>>,
    /// `path -> Module` so a second `importModuleFromSource` call for
    /// the same file reuses the Member instead of re-parsing
    /// (`spec.md` §4.6: "on first call for a given path, a new Module
    /// is created").
    module_by_path: RefCell<FxHashMap<PathBuf, MemberId>>,
    module_syntax: RefCell<FxHashMap<MemberId, Module>>,
    passes_run: FxHashMap<MemberId, FxHashSet<&'static str>>,
}

impl Compiler {
    #[must_use]
    pub fn new(parser: Box<dyn SourceParser>) -> Self {
        Compiler {
            context: Context::new(),
            parser: RefCell::new(parser),
            modules: RefCell::new(Vec::new()),
            module_by_path: RefCell::new(FxHashMap::default()),
            module_syntax: RefCell::new(FxHashMap::default()),
            passes_run: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.borrow().len()
    }

    /// Registers a root directory as a package importer.
    pub fn add_root(&mut self, root: Path) {
        let mut importer = elan_semantic::FileSystemImporter::new();
        importer.add_path(root, &mut self.context.arena, &mut self.context.interner);
        self.context.module_path.scope_mut().push_importer(Box::new(importer));
    }

    pub fn load_essentials(&mut self) {
        let Context {
            module_path,
            arena,
            interner,
            types,
            reporter,
            essentials,
        } = &mut self.context;
        let mut importer = CompilerImporter {
            parser: &self.parser,
            modules: &self.modules,
            module_by_path: &self.module_by_path,
            module_syntax: &self.module_syntax,
            reporter: &*reporter,
        };
        essentials.load(module_path, arena, interner, types, &mut importer, reporter);
    }

    /// Resolves a dotted absolute path (e.g. `app.main`) to a Module
    /// Member, importing it from source on first use. This is the entry
    /// point a driver uses to seed `run_phase` with the module(s) it was
    /// asked to check; `Essentials::load` reaches the same modules
    /// incidentally by resolving well-known paths.
    pub fn import_module(&mut self, path: &str) -> Option<MemberId> {
        let Context {
            module_path,
            arena,
            interner,
            types,
            reporter,
            ..
        } = &mut self.context;
        let mut importer = CompilerImporter {
            parser: &self.parser,
            modules: &self.modules,
            module_by_path: &self.module_by_path,
            module_syntax: &self.module_syntax,
            reporter: &*reporter,
        };
        module_path.find_absolute_symbol(path, arena, interner, types, &mut importer, &*reporter)
    }

    /// Runs one `Phase` to completion (all passes, over every
    /// not-yet-finished module registered so far). A snapshot of the
    /// module registry is taken once at entry; modules a pass appends
    /// via the importer during this call are only visible to the next
    /// `run_phase` call, per `spec.md` §4.6.
    pub fn run_phase(&mut self, phase: &mut Phase) {
        let snapshot = self.modules.borrow().clone();
        let Compiler {
            context,
            parser,
            modules,
            module_by_path,
            module_syntax,
            passes_run,
        } = self;
        let Context {
            arena,
            interner,
            types,
            reporter,
            module_path,
            essentials,
        } = context;

        phase.run(&snapshot, &mut *passes_run, &*reporter, || {
            // Every field is reborrowed explicitly (`&*x`/`&mut *x`)
            // rather than moved out of the closure's environment, so
            // this `FnMut` stays callable across every `(pass, module)`
            // iteration `Phase::run` drives it through.
            let importer: Box<dyn ModuleImporter> = Box::new(CompilerImporter {
                parser: &*parser,
                modules: &*modules,
                module_by_path: &*module_by_path,
                module_syntax: &*module_syntax,
                reporter: &*reporter,
            });
            PassContext {
                arena: &mut *arena,
                interner: &mut *interner,
                types: &mut *types,
                reporter: &*reporter,
                module_path: &*module_path,
                essentials: &*essentials,
                importer,
                module_syntax: &*module_syntax,
            }
        });
    }
}

/// Adapter implementing `ModuleImporter` over shared references into
/// `Compiler`'s interior-mutable module registry - see the module doc
/// for why these are `RefCell`s rather than plain fields.
struct CompilerImporter<'a> {
    parser: &'a RefCell<Box<dyn SourceParser>>,
    modules: &'a RefCell<Vec<MemberId>>,
    module_by_path: &'a RefCell<FxHashMap<PathBuf, MemberId>>,
    module_syntax: &'a RefCell<FxHashMap<MemberId, Module>>,
    reporter: &'a Reporter,
}

impl ModuleImporter for CompilerImporter<'_> {
    fn import_module_from_source(
        &mut self,
        path: &Path,
        arena: &mut SemanticArena,
        interner: &mut NameInterner,
    ) -> Option<MemberId> {
        if let Some(&existing) = self.module_by_path.borrow().get(path.as_std()) {
            return Some(existing);
        }

        let ast = match self.parser.borrow_mut().parse_module(path, interner) {
            Ok(ast) => ast,
            Err(err) => {
                self.reporter.fatal(ErrorCode::E6003).text(err);
                return None;
            }
        };

        let name = ast.name;
        let member = arena.alloc(MemberData {
            name,
            defined_in: None,
            location: None,
            visibility: Visibility::Public,
            modifiers: elan_semantic::Modifiers::empty(),
            payload: MemberPayload::Module(ModuleData {
                source_path: path.clone(),
                member_scope: StandardScope::new(ScopeKind::Default),
                import_scope: StandardScope::new(ScopeKind::Default),
            }),
        });

        self.modules.borrow_mut().push(member);
        self.module_by_path.borrow_mut().insert(path.as_std().to_path_buf(), member);
        self.module_syntax.borrow_mut().insert(member, ast);
        Some(member)
    }
}
