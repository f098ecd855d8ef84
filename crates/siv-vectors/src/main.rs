//! `siv-vectors`: AES-SIV conformance vector tool.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`](config::Config) from `SIV_*` environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Generate the case matrix, or verify an existing vector file.

mod config;
mod format;
mod generate;
mod telemetry;
mod verify;

use anyhow::Result;
use tracing::info;

use config::{Config, Mode};

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: siv-vectors configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = ?cfg.mode,
        format = ?cfg.format,
        "siv-vectors starting"
    );

    // -----------------------------------------------------------------------
    // 3. Run
    // -----------------------------------------------------------------------
    match cfg.mode {
        Mode::Generate => generate::run(&cfg),
        Mode::Verify => verify::run(&cfg),
    }
}
