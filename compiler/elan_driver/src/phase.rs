//! `Phase`: runs an ordered list of `Pass`es over a set of modules.
//!
//! Grounded on `compiler/phase.cpp`'s `Phase::run()`: index-based (not
//! iterator-based) traversal over an `inputSize` snapshot taken at
//! entry, so a pass appending modules via transitive imports doesn't
//! perturb the current invocation - the new modules are only picked up
//! the next time `run` is called. The commented-out Python in the same
//! file spells out two behaviors the shipped C++ doesn't (yet): a
//! prerequisite check per pass per module, and "the first exception
//! gets annotated, subsequent ones don't, then re-raised" - both are
//! implemented here per `spec.md` §4.6/§7.

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use elan_diagnostic::{ErrorCode, Reporter};
use elan_semantic::MemberId;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::pass::{Pass, PassContext};

pub struct Phase {
    name: &'static str,
    passes: Vec<Box<dyn Pass>>,
    /// One slot per module the phase has ever seen, indexed the same
    /// way `modules` is indexed by the driver. Persists across `run`
    /// calls so a module already finished in a prior invocation is
    /// skipped in the next one.
    finished: Vec<bool>,
}

impl Phase {
    #[must_use]
    pub fn new(name: &'static str, passes: Vec<Box<dyn Pass>>) -> Self {
        Phase {
            name,
            passes,
            finished: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs every pass, against every not-yet-finished module, in
    /// `modules[..]`'s current prefix. `passes_run` is the driver-global
    /// "which passes has this module completed" ledger
    /// (`spec.md` §4.6: "Before running, the driver checks that every
    /// prerequisite has already run against the same module").
    /// `build_ctx` constructs a fresh `PassContext` per `(pass, module)`
    /// call, since the borrows it bundles can't outlive a single call -
    /// the driver is the only party that can see all of `Compiler`'s
    /// fields at once to build one.
    pub fn run<'p>(
        &mut self,
        modules: &[MemberId],
        passes_run: &mut FxHashMap<MemberId, FxHashSet<&'static str>>,
        reporter: &Reporter,
        mut build_ctx: impl FnMut() -> PassContext<'p>,
    ) {
        reporter.status(&format!("Running phase: {}", self.name));
        let input_size = modules.len();
        if self.finished.len() < input_size {
            self.finished.resize(input_size, false);
        }

        let unfinished = self.finished[..input_size].iter().any(|&done| !done);
        if !unfinished {
            return;
        }
        reporter.status(&format!("Unfinished modules: {}", self.name));

        let mut handling_exception = false;
        for pass in &mut self.passes {
            if reporter.has_errors() {
                return;
            }
            for i in 0..input_size {
                if self.finished[i] {
                    continue;
                }
                let module = modules[i];

                let missing_prereq = pass.prereqs().iter().find(|&&prereq| {
                    !passes_run.get(&module).is_some_and(|run| run.contains(prereq))
                });
                if let Some(prereq) = missing_prereq {
                    reporter
                        .error(ErrorCode::E6001)
                        .text("Cannot run compiler pass ")
                        .text(pass.name())
                        .text(" because it requires pass ")
                        .text(*prereq)
                        .text(" to run first.");
                    continue;
                }

                let mut ctx = build_ctx();
                let result = catch_unwind(AssertUnwindSafe(|| pass.run(module, &mut ctx)));
                if let Err(payload) = result {
                    if !handling_exception {
                        handling_exception = true;
                        let module_name = ctx.interner.resolve(ctx.arena.get(module).name).to_string();
                        reporter
                            .error(ErrorCode::E6002)
                            .text("Exception encountered while compiling module: ")
                            .text(module_name);
                    }
                    resume_unwind(payload);
                }

                passes_run.entry(module).or_default().insert(pass.name());
            }
        }

        for done in &mut self.finished[..input_size] {
            *done = true;
        }
    }
}
