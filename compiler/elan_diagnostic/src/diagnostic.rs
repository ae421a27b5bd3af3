//! Diagnostic construction, grounded on `ori_diagnostic::diagnostic`'s
//! builder style (`Diagnostic::error(code).with_message(..)
//! .with_label(..)`).

use elan_ir::Location;
use std::fmt;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Debug,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Debug => write!(f, "debug"),
        }
    }
}

/// A labeled location, attached to a diagnostic for context beyond the
/// primary message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub location: Location,
    pub message: String,
}

/// A text-only suggestion. Grounded on `ori_diagnostic`'s `Suggestion`,
/// trimmed to the text-only constructors since this front end never
/// produces machine-applicable source rewrites (no formatter, no `fix`
/// command).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    pub message: String,
}

impl Suggestion {
    #[must_use]
    pub fn did_you_mean(name: &str) -> Self {
        Suggestion {
            message: format!("did you mean `{name}`?"),
        }
    }

    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Suggestion {
            message: message.into(),
        }
    }
}

/// A rich diagnostic: a code, a severity, a primary message, any number
/// of secondary labels, and at most a few suggestions.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub primary: Option<Location>,
    pub labels: Vec<Label>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            primary: None,
            labels: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new(code, Severity::Warning)
    }

    pub fn note(code: ErrorCode) -> Self {
        Self::new(code, Severity::Note)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.primary = Some(location);
        self
    }

    #[must_use]
    pub fn with_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            location,
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(loc) = self.primary {
            write!(f, " at {loc:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elan_ir::Name;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_chain_produces_the_expected_diagnostic() {
        let loc = Location::on_line(Name::EMPTY, 3, 1, 5);
        let built = Diagnostic::error(ErrorCode::E2005)
            .with_message("Invalid alias in package.txt: nodot")
            .at(loc)
            .with_label(loc, "expected at least one dot")
            .with_suggestion(Suggestion::text("use `a.b` instead of `a`"));

        let expected = Diagnostic {
            code: ErrorCode::E2005,
            severity: Severity::Error,
            message: "Invalid alias in package.txt: nodot".to_string(),
            primary: Some(loc),
            labels: vec![Label {
                location: loc,
                message: "expected at least one dot".to_string(),
            }],
            suggestions: vec![Suggestion::text("use `a.b` instead of `a`")],
        };

        assert_eq!(built, expected);
    }
}
