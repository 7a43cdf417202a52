//! Subscriber setup for hosts that want to see revid's diagnostics.
//!
//! The core emits `warn` events when a document or parent ID is rejected
//! and `debug` events for every minted ID and compaction decision.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact subscriber showing rejections (`warn`) by default.
///
/// `RUST_LOG` overrides the level, e.g. `RUST_LOG=revid_core=debug` to
/// trace each minted revision ID.
pub fn init() {
    init_with_filter("warn");
}

/// Install a compact subscriber with `default_filter` when `RUST_LOG` is unset.
///
/// A second call is a no-op, so tests and embedding hosts can both call it.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}
