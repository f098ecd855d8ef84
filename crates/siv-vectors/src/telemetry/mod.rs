//! Telemetry initialisation for the vector tool.
//!
//! Structured JSON logs go to stderr; stdout is reserved for vector output.
//! Key material and plaintexts never appear in log fields.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber at the configured log level.
///
/// `RUST_LOG` takes precedence over `log_level` when set and non-empty.
///
/// # Errors
///
/// Returns an error if the active directives do not parse or the subscriber
/// has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter(rust_log.as_deref(), log_level)?;

    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise siv-vectors tracing subscriber: {e}"))
}

/// Pick the filter directives: a non-blank `RUST_LOG` wins over `SIV_LOG_LEVEL`.
/// Malformed directives are an error, not a fallback.
fn filter(rust_log: Option<&str>, log_level: &str) -> Result<EnvFilter> {
    match rust_log.filter(|d| !d.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid RUST_LOG directives {directives:?}")),
        None => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid SIV_LOG_LEVEL {log_level:?}")),
    }
}
