//! `StubSourceParser`: the `SourceParser` this binary wires up.
//!
//! Lexing and parsing `.sp` source are explicitly out of scope for this
//! front end (`spec.md` §1: "the surrounding syntax tree, lexer, parser
//! ... are out of scope and are treated only as external collaborators
//! via their interfaces"). `elanc` still needs a concrete `SourceParser`
//! to hand `Compiler::new`, so this one reports a clean parse error for
//! every path instead of silently returning an empty `Module` - an
//! embedder wiring a real front end in is expected to supply their own
//! `SourceParser` in its place.

use elan_driver::{SourceParseError, SourceParser};
use elan_ir::{NameInterner, Path};
use elan_syntax::Module;

pub struct StubSourceParser;

impl SourceParser for StubSourceParser {
    fn parse_module(&mut self, path: &Path, _interner: &mut NameInterner) -> Result<Module, SourceParseError> {
        Err(SourceParseError::Parse {
            path: path.to_string_lossy(),
            message: "no lexer/parser is wired into elanc; supply a SourceParser for real .sp source".to_string(),
        })
    }
}
