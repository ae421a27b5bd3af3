//! elan_driver - the compiler context and phase driver.
//!
//! - `context`: `Context`, the bag of compiler-wide state (`spec.md`
//!   §4.6) - Reporter, module-path scope, Type Store, semantic arena,
//!   name interner, Essentials table.
//! - `compiler`: `Compiler`, which owns the module registry and the
//!   pluggable `SourceParser`, and drives `Phase`s over it.
//! - `phase`/`pass`: the ordered-pass-group driver (`spec.md` §4.6) and
//!   the `Pass` trait `elan_check`'s passes implement.
//! - `essentials`/`module_path`: the Essentials table and the absolute
//!   dotted-path walk it resolves against (`spec.md` §4.5).

mod compiler;
mod context;
mod essentials;
mod module_path;
mod pass;
mod phase;

pub use compiler::{Compiler, SourceParseError, SourceParser};
pub use context::Context;
pub use essentials::{EssentialType, Essentials};
pub use module_path::ModulePathLookup;
pub use pass::{Pass, PassContext};
pub use phase::Phase;
