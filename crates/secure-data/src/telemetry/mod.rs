//! Tracing subscriber setup: structured JSON logs on stderr.
//!
//! stdout is reserved for command output, so logs never interleave with an
//! envelope or digest a caller is capturing.
//!
//! # Telemetry invariants
//!
//! - **No plaintext, envelope, or key material** may appear in any span
//!   attribute or log field. Error kinds, codes, and counts are fine.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   overrides it.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
