//! Tracing bootstrap for binaries and tests.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global `fmt` subscriber honoring `RUST_LOG`.
///
/// Defaults to `error` overall with `statelens` at `warn` when the
/// environment sets nothing. Safe to call more than once; later calls are
/// no-ops, so tests may each call it.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("error,statelens=warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init();
}
