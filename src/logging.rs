//! Opt-in log output.
//!
//! The library only emits `tracing` events: `debug` for batch milestones,
//! `trace` for every lane and attempt step, `error` for swallowed task
//! failures. Nothing is printed unless the application installs a
//! subscriber, either its own or the one from [`init`].

use crate::error::{Error, Result};
use tracing::Level;

/// Installs a global `fmt` subscriber printing events up to `level` to stderr.
///
/// Fails if a global subscriber is already set.
pub fn init(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Internal(format!("cannot install the log subscriber: {}", e)))
}
