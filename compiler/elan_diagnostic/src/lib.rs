//! Diagnostics and error reporting for the elan compiler.

mod diagnostic;
mod error_code;
mod reporter;

pub use diagnostic::{Diagnostic, Label, Severity, Suggestion};
pub use error_code::ErrorCode;
pub use reporter::{Reporter, Sink};
