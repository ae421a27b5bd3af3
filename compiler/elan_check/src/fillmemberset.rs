//! `FillMemberSet`: classifies a raw lookup result into a `Genus` and
//! checks visibility, per `spec.md` §4.8.2.
//!
//! Grounded on `sema/names/fillmemberset.cpp`.

use elan_diagnostic::{ErrorCode, Reporter};
use elan_ir::{Location, Name, NameInterner};
use elan_semantic::scope::MemberSmallVec;
use elan_semantic::{unwrap_specialized, MemberId, MemberPayload, SemanticArena};

use crate::subject::{Genus, MemberSet, Subject};

/// `genusOf`: classifies a single, already-unwrapped Member.
#[must_use]
fn genus_of(arena: &SemanticArena, id: MemberId) -> Genus {
    match &arena.get(id).payload {
        MemberPayload::Package(_) | MemberPayload::Module(_) => Genus::Namespace,
        MemberPayload::TypeDefn(_) => Genus::Type,
        MemberPayload::TypeParameter(t) => {
            if t.value_type.is_none() {
                Genus::Type
            } else {
                Genus::Variable
            }
        }
        MemberPayload::Function(_) => Genus::Function,
        MemberPayload::Property(p) => {
            if p.params.is_empty() {
                Genus::Variable
            } else {
                Genus::Function
            }
        }
        MemberPayload::Value(_) => Genus::Variable,
        // The caller always unwraps Specialized before reaching here.
        MemberPayload::Specialized(_) => Genus::Inconsistent,
    }
}

/// Two genera combine to themselves if equal, to `Inconsistent` otherwise.
fn combine(members: &[MemberId], arena: &SemanticArena) -> Genus {
    let mut genera = members.iter().map(|&id| genus_of(arena, id));
    let Some(first) = genera.next() else {
        return Genus::Incomplete;
    };
    if genera.all(|g| g == first) {
        first
    } else {
        Genus::Inconsistent
    }
}

pub struct FillMemberSet;

impl FillMemberSet {
    /// Partitions `candidates` into visible/hidden members of `subject`,
    /// computes the set's genus over whichever partition is non-empty
    /// (preferring visible), and reports the "not visible"/"ambiguous
    /// reference"/"used before assignment" diagnostics `spec.md` §4.8.2
    /// describes.
    pub fn fill(
        arena: &SemanticArena,
        interner: &NameInterner,
        reporter: &Reporter,
        subject: Subject,
        name: Name,
        stem: Option<MemberId>,
        location: Location,
        candidates: &[MemberId],
    ) -> MemberSet {
        let unwrapped: MemberSmallVec = candidates.iter().map(|&id| unwrap_specialized(arena, id)).collect();

        let mut visible = MemberSmallVec::new();
        let mut hidden = MemberSmallVec::new();
        for &id in &unwrapped {
            if subject.is_visible(arena, id) {
                visible.push(id);
            } else {
                hidden.push(id);
            }
        }

        if visible.is_empty() && !hidden.is_empty() {
            let genus = combine(&hidden, arena);
            reporter
                .error(ErrorCode::E2006)
                .at(location)
                .text(interner.resolve(name))
                .text(" is not visible here");
            for &id in &hidden {
                reporter.info(&format!("candidate not visible: {:?}", arena.get(id).location));
            }
            return MemberSet {
                name,
                stem,
                location,
                genus,
                members: MemberSmallVec::new(),
            };
        }

        let genus = combine(&visible, arena);

        if genus == Genus::Inconsistent {
            reporter
                .error(ErrorCode::E2007)
                .at(location)
                .text("Ambiguous reference to `")
                .text(interner.resolve(name))
                .text("`");
            return MemberSet {
                name,
                stem,
                location,
                genus,
                members: visible,
            };
        }

        if genus == Genus::Variable {
            if let [only] = visible.as_slice() {
                if let MemberPayload::Value(v) = &arena.get(*only).payload {
                    if !v.initialized {
                        reporter
                            .error(ErrorCode::E2009)
                            .at(location)
                            .text("`")
                            .text(interner.resolve(name))
                            .text("` is used before it is assigned");
                    }
                }
            }
        }

        MemberSet {
            name,
            stem,
            location,
            genus,
            members: visible,
        }
    }
}
