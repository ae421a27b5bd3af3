//! Build-Graph and Name-Resolution: the two passes that turn a parsed
//! module into a fully name-resolved Member graph (`spec.md` §4.7/§4.8).
//!
//! - `buildgraph`: allocates one Member per syntax `Defn`, wiring up
//!   scopes and recording every type-position expression a Member still
//!   needs resolved.
//! - `nameresolution`: consumes that side table, resolving every
//!   supertype, interface, parameter/return/value type, generic
//!   constraint, and `where`-clause against the scope graph Build-Graph
//!   built.
//! - `pending`/`defn_table`: the two side tables shared between the
//!   passes.
//! - `subject`/`fillmemberset`/`memberlookup`/`resolveexprs`/
//!   `resolverequirements`: the name-resolution primitives both passes
//!   (and, eventually, type-checking) build on.

mod buildgraph;
mod defn_table;
mod fillmemberset;
mod memberlookup;
mod nameresolution;
mod pending;
mod resolveexprs;
mod resolverequirements;
mod subject;

pub use buildgraph::BuildGraphPass;
pub use defn_table::DefnTable;
pub use fillmemberset::FillMemberSet;
pub use memberlookup::MemberLookup;
pub use nameresolution::NameResolutionPass;
pub use pending::{PendingEntry, PendingTypes};
pub use resolveexprs::ResolveExprs;
pub use resolverequirements::ResolveRequirements;
pub use subject::{Genus, MemberSet, ResolvedExpr, Subject};
