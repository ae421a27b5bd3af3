//! The error reporter.
//!
//! `spec.md` §6 describes the `Reporter` capability as `status`, `info`,
//! `debug`, `error(loc?)`, `fatal(loc?)`, `indent`/`unindent`, with "each
//! method returns a stream-like sink for diagnostic composition" — a
//! direct description of `examples/original_source/cspark`'s
//! `reporter().error(loc) << "text" << name << "more text"` idiom. §9's
//! REDESIGN FLAG spells out the Rust-native version of that idiom: "a
//! scoped sink that flushes on drop; each call site constructs one sink
//! per message to guarantee atomic emission." [`Sink`] is exactly that:
//! `.text(...)` calls accumulate a message, and the diagnostic is
//! recorded when the sink is dropped, so a call site can never forget to
//! flush half a message.
//!
//! Single-threaded (`spec.md` §5): the reporter uses `RefCell`/`Cell`,
//! not `parking_lot`, matching the rest of this workspace's departure
//! from the teacher's multi-threaded primitives (see DESIGN.md).

use elan_ir::Location;
use std::cell::{Cell, RefCell};

use crate::{Diagnostic, ErrorCode, Severity, Suggestion};

pub struct Reporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
    error_count: Cell<u32>,
    indent: Cell<u32>,
}

impl Default for Reporter {
    fn default() -> Self {
        Reporter {
            diagnostics: RefCell::new(Vec::new()),
            error_count: Cell::new(0),
            indent: Cell::new(0),
        }
    }
}

impl Reporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count.get() > 0
    }

    #[must_use]
    pub fn error_count(&self) -> u32 {
        self.error_count.get()
    }

    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn indent(&self) {
        self.indent.set(self.indent.get() + 1);
    }

    pub fn unindent(&self) {
        self.indent.set(self.indent.get().saturating_sub(1));
    }

    fn indent_prefix(&self) -> String {
        "  ".repeat(self.indent.get() as usize)
    }

    /// Begin composing an error diagnostic. Increments the error counter
    /// when the returned [`Sink`] is dropped.
    pub fn error(&self, code: ErrorCode) -> Sink<'_> {
        Sink::new(self, Severity::Error, code)
    }

    pub fn warning(&self, code: ErrorCode) -> Sink<'_> {
        Sink::new(self, Severity::Warning, code)
    }

    /// `spec.md` §6: "`fatal` must terminate the operation." We keep the
    /// sentinel-not-exception propagation policy from §7, so "terminate
    /// the operation" here means the caller must check `has_errors()` and
    /// bail rather than this method unwinding — matching the original's
    /// own convention of calling `reporter().fatal(loc) << "..."` and
    /// then immediately `return`ing a sentinel.
    pub fn fatal(&self, code: ErrorCode) -> Sink<'_> {
        Sink::new(self, Severity::Error, code)
    }

    /// A top-level status line (e.g. "running pass NameResolution").
    pub fn status(&self, message: &str) {
        tracing::info!("{}{}", self.indent_prefix(), message);
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.indent_prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.indent_prefix(), message);
    }

    fn record(&self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Error {
            self.error_count.set(self.error_count.get() + 1);
        }
        match diagnostic.severity {
            Severity::Error => tracing::error!("{}", diagnostic),
            Severity::Warning => tracing::warn!("{}", diagnostic),
            Severity::Note | Severity::Debug => tracing::debug!("{}", diagnostic),
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// A scoped diagnostic builder. Accumulates message text, an optional
/// primary location, labels, and suggestions, then flushes exactly once
/// when dropped — so the diagnostic reaches the reporter's log even if a
/// call site returns early partway through composing it.
#[must_use = "a Sink must be used (call .text(..)) or it reports an empty message"]
pub struct Sink<'r> {
    reporter: &'r Reporter,
    diagnostic: Diagnostic,
}

impl<'r> Sink<'r> {
    fn new(reporter: &'r Reporter, severity: Severity, code: ErrorCode) -> Self {
        let diagnostic = match severity {
            Severity::Error => Diagnostic::error(code),
            Severity::Warning => Diagnostic::warning(code),
            Severity::Note | Severity::Debug => Diagnostic::note(code),
        };
        Sink {
            reporter,
            diagnostic,
        }
    }

    /// Append text to the message being composed. Mirrors `stream <<
    /// "text"`.
    #[must_use]
    pub fn text(mut self, text: impl std::fmt::Display) -> Self {
        use std::fmt::Write as _;
        let _ = write!(self.diagnostic.message, "{text}");
        self
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.diagnostic.primary = Some(location);
        self
    }

    #[must_use]
    pub fn label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.diagnostic = self.diagnostic.with_label(location, message);
        self
    }

    #[must_use]
    pub fn suggest(mut self, suggestion: Suggestion) -> Self {
        self.diagnostic = self.diagnostic.with_suggestion(suggestion);
        self
    }
}

impl Drop for Sink<'_> {
    fn drop(&mut self) {
        let diagnostic = std::mem::replace(&mut self.diagnostic, Diagnostic::note(ErrorCode::E2001));
        self.reporter.record(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_sink_increments_error_count_on_drop() {
        let reporter = Reporter::new();
        assert!(!reporter.has_errors());
        reporter.error(ErrorCode::E2001).text("Name lookup failed: ").text("foo");
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.diagnostics()[0].message, "Name lookup failed: foo");
    }

    #[test]
    fn warning_does_not_increment_error_count() {
        let reporter = Reporter::new();
        reporter.warning(ErrorCode::E2003).text("shadowed import");
        assert!(!reporter.has_errors());
        assert_eq!(reporter.diagnostics().len(), 1);
    }

    #[test]
    fn indent_unindent_are_saturating() {
        let reporter = Reporter::new();
        reporter.unindent();
        reporter.indent();
        reporter.indent();
        reporter.unindent();
        // no panic, no observable assertion beyond not crashing
    }
}
