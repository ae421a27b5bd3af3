//! Stable error codes, grouped by the pass that raises them.
//!
//! Mirrors `ori_diagnostic::error_code`'s `E<NNNN>` numbering scheme
//! (lexer errors E0xxx, parser errors E1xxx, ...); here the ranges track
//! this front end's own passes instead of a lexer/parser. Every variant's
//! doc comment is the exact message text used in
//! `examples/original_source/cspark`, kept verbatim so the diagnostics
//! this crate emits read the same as the ones it was grounded on.

/// A stable, searchable identifier for a kind of diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum ErrorCode {
    // Name resolution (E2xxx) - fillmemberset.cpp, memberlookup.cpp,
    // nameresolution.cpp
    /// Name lookup failed: `<name>`
    E2001,
    /// Imported name not found.
    E2002,
    /// Import name '`<name>`' conflicts with previous definition.
    E2003,
    /// Invalid lookup context.
    E2004,
    /// Invalid alias in package.txt: `<line>`
    E2005,
    /// `<name>` is not visible (message specialized per genus).
    E2006,
    /// Inconsistent member set: multiple incompatible genera found for the
    /// same name.
    E2007,
    /// Invalid member reference base: base must resolve to a namespace or
    /// type.
    E2008,
    /// `<name>` is used before it is assigned.
    E2009,

    // Generic requirements (E3xxx) - resolverequirements.cpp
    /// Requirement for 'new' should not declare a return type.
    E3001,
    /// Requirement 'new' must be of the form typename.new(argtypes...).
    E3002,
    /// Ambiguous type name '`<name>`'.
    E3003,
    /// Expected scope of 'new' to be a type parameter.
    E3004,
    /// Invalid 'where' condition (reference equality).
    E3005,
    /// Invalid lookup context for required function.
    E3006,

    // Build-graph / AST shape (E4xxx) - buildgraph.cpp, resolveexprs.cpp
    /// Invalid AST node kind: `<kind>`
    E4001,
    /// Invalid member node type: `<kind>`
    E4002,

    // Essentials / bootstrap (E5xxx) - essentials.cpp
    /// Essential symbol not found: `<path>`
    E5001,
    /// Essential symbol is not a type: `<path>`
    E5002,

    // Phase driver (E6xxx) - phase.cpp
    /// Cannot run compiler pass `<pass>` because it requires pass
    /// `<prereq>` to run first.
    E6001,
    /// Exception encountered while compiling module: `<module>`
    E6002,
    /// Failed to import module from source: `<error>`
    E6003,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
