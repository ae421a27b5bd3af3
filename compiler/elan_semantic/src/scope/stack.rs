//! `ScopeStack`: the ordered sequence of scopes pushed during traversal.
//!
//! Grounded on `scope/scopestack.h`/`sema/passes/nameresolution.cpp`'s
//! push/pop discipline around entering modules, type definitions, and
//! function bodies. `find` searches innermost-first and returns the
//! first scope with a non-empty hit, along with the `stem` Member that
//! owns that scope (`None` for a free, unqualified lookup) - `spec.md`
//! §4.3.

use elan_ir::Name;

use super::{LookupContext, MemberSmallVec, Scope};
use crate::member::MemberId;

struct StackFrame {
    stem: Option<MemberId>,
    scope: Box<dyn Scope>,
}

pub struct StackFind {
    pub stem: Option<MemberId>,
    pub members: MemberSmallVec,
}

#[derive(Default)]
pub struct ScopeStack {
    frames: Vec<StackFrame>,
}

impl ScopeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stem: Option<MemberId>, scope: Box<dyn Scope>) {
        self.frames.push(StackFrame { stem, scope });
    }

    pub fn pop(&mut self) -> Option<(Option<MemberId>, Box<dyn Scope>)> {
        self.frames.pop().map(|frame| (frame.stem, frame.scope))
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Searches from innermost outward; returns the first frame whose
    /// scope yields any member for `name`.
    pub fn find(&self, name: Name, ctx: &mut LookupContext) -> StackFind {
        for frame in self.frames.iter().rev() {
            let mut members = MemberSmallVec::new();
            frame.scope.lookup_name(name, ctx, &mut members);
            if !members.is_empty() {
                return StackFind {
                    stem: frame.stem,
                    members,
                };
            }
        }
        StackFind {
            stem: None,
            members: MemberSmallVec::new(),
        }
    }

    /// Runs `f` over every name visible from every frame on the stack,
    /// innermost first, without deduplicating - used by `CloseMatchFinder`,
    /// which only tracks the best-scoring candidate anyway.
    pub fn for_all_names(&self, f: &mut dyn FnMut(Name)) {
        for frame in self.frames.iter().rev() {
            frame.scope.for_all_names(f);
        }
    }
}
