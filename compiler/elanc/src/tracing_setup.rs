//! `tracing-subscriber` init, adapted from `oric`'s `tracing_setup.rs`:
//! a single `fmt` layer over stderr, filtered by `ELAN_LOG` (falling
//! back to `RUST_LOG`, defaulting to `warn`). No `tracing-tree` layer -
//! this workspace doesn't carry that dependency, and a CLI this small
//! has no nested-span structure worth visualizing.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static INIT: OnceLock<()> = OnceLock::new();

pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env("ELAN_LOG")
            .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let layer = tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr).compact();

        tracing_subscriber::registry().with(layer).with(filter).init();
    });
}
