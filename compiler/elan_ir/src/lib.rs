//! elan_ir - foundation types shared by every other elan crate.
//!
//! - `arena`: bump allocator for semantic-graph and type-store nodes.
//! - `name`: interned identifiers (`Name`).
//! - `location`: source locations and the path/file identity they refer to.
//! - `path`: filesystem path helpers used by the importer.
//!
//! Single-threaded, cooperative: nothing here uses locks. The teacher
//! workspace's `ori_ir` builds these same primitives for a multi-threaded,
//! incremental driver; this crate keeps the shapes but drops the
//! synchronization since the scope this repo targets never shares an
//! arena or interner across threads.

mod arena;
mod location;
mod name;
pub mod path;

pub use arena::{Arena, Id, IdRange};
pub use location::{Location, Span};
pub use name::{Name, NameInterner};
pub use path::Path;
