//! The Essentials table: a fixed set of well-known absolute names the
//! compiler must have in hand (`spec.md` §4.5).
//!
//! Grounded on `sema/types/essentials.cpp`. The original's table is a
//! static array of `(id, dotted path)`; `load` resolves each path by
//! splitting on `.` and walking the module-path scope, then the
//! appropriate scope of each intermediate hit (package/module member
//! scope). Unlike the original, which stops as soon as it finds *a*
//! member (`assert(members.size() == 1)`), this walk reports
//! `EssentialMissing` rather than asserting, since an absent essential is
//! the caller's (embedder's) misconfiguration, not a compiler bug.

use elan_diagnostic::{ErrorCode, Reporter};
use elan_ir::NameInterner;
use elan_semantic::{MemberPayload, ModuleImporter, SemanticArena};
use elan_types::{Type, TypeStore};

use crate::ModulePathLookup;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EssentialType {
    Any,
    Enum,
    Object,
}

const ESSENTIAL_TYPES: &[(EssentialType, &str)] = &[
    (EssentialType::Any, "elan.core.any.Any"),
    (EssentialType::Enum, "elan.core.enumeration.Enum"),
    (EssentialType::Object, "elan.core.object.Object"),
];

/// Holds the canonical `Type` each essential resolved to - the exact
/// `Type` handle `TypeDefnData::ty` already carries, not a reconstructed
/// one, since composite types are nominal (`DefnId`-keyed, not
/// structurally interned) and building a second one would not compare
/// equal to the first (`spec.md` §3.3 invariant 2 only covers the
/// structurally-interned kinds).
#[derive(Default)]
pub struct Essentials {
    any: Option<Type>,
    enum_: Option<Type>,
    object: Option<Type>,
}

impl Essentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: EssentialType) -> Option<&Type> {
        match id {
            EssentialType::Any => self.any.as_ref(),
            EssentialType::Enum => self.enum_.as_ref(),
            EssentialType::Object => self.object.as_ref(),
        }
    }

    /// Resolves every table entry via `module_path`'s `find_absolute_symbol`.
    /// Each path must resolve to exactly one `TypeDefn`; otherwise
    /// `ErrorCode::E5001` is reported and that entry is left unset.
    pub fn load(
        &mut self,
        module_path: &ModulePathLookup,
        arena: &mut SemanticArena,
        interner: &mut NameInterner,
        types: &TypeStore,
        importer: &mut dyn ModuleImporter,
        reporter: &Reporter,
    ) {
        for &(id, path) in ESSENTIAL_TYPES {
            let Some(member) = module_path.find_absolute_symbol(path, arena, interner, types, importer, reporter) else {
                reporter.error(ErrorCode::E5001).text("Essential symbol not found: ").text(path);
                continue;
            };
            let ty = match &arena.get(member).payload {
                MemberPayload::TypeDefn(t) => Some(t.ty.clone()),
                _ => None,
            };
            let Some(ty) = ty else {
                reporter.error(ErrorCode::E5002).text("Essential symbol is not a type: ").text(path);
                continue;
            };
            match id {
                EssentialType::Any => self.any = Some(ty),
                EssentialType::Enum => self.enum_ = Some(ty),
                EssentialType::Object => self.object = Some(ty),
            }
        }
    }
}
