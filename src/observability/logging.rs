//! Structured logging setup.
//!
//! The plugin itself only emits `tracing` events; installing a subscriber
//! is the embedding process's call. This helper covers the common case.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Idempotent: if a global subscriber is already set, this is a no-op, so
/// tests and embedding hosts can both call it freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
