//! Public surface for the concierge backend.
//!
//! This crate re-exports the building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use concierge_config as config;
pub use concierge_core as core;
/// Re-export for convenience.
pub use concierge_server as server;

#[inline]
/// Initialize logging via env_logger, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops. Binaries are expected
/// to call this early in startup so log output is wired up.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}
