//! Configuration loading and validation for the vector tool.

use anyhow::{Context, Result};
use serde::Deserialize;

/// What the tool does on this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Write the full case matrix.
    Generate,
    /// Check every vector in the input against this implementation.
    Verify,
}

/// Record encoding for output (generate) and input (verify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Semicolon-delimited hex lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Validated tool configuration, read from `SIV_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_mode")]
    pub mode: Mode,

    #[serde(default = "default_format")]
    pub format: Format,

    /// File to write generated vectors to. Stdout when unset.
    #[serde(default)]
    pub output_path: Option<String>,

    /// File to read vectors from in verify mode. Stdin when unset.
    #[serde(default)]
    pub input_path: Option<String>,

    /// RNG seed for reproducible output. OS entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Tracing log level, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_mode() -> Mode {
    Mode::Generate
}
fn default_format() -> Format {
    Format::Text
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SIV"))
            .build()
            .context("failed to build siv-vectors configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise siv-vectors configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        ensure_not_blank(self.output_path.as_deref(), "SIV_OUTPUT_PATH")?;
        ensure_not_blank(self.input_path.as_deref(), "SIV_INPUT_PATH")?;
        if self.mode == Mode::Verify && self.seed.is_some() {
            anyhow::bail!("SIV_SEED only applies to generate mode");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("SIV_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

fn ensure_not_blank(value: Option<&str>, name: &str) -> Result<()> {
    if matches!(value, Some(v) if v.trim().is_empty()) {
        anyhow::bail!("{name} must not be blank when set");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            mode: default_mode(),
            format: default_format(),
            output_path: None,
            input_path: None,
            seed: None,
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_mode(), Mode::Generate);
        assert_eq!(default_format(), Format::Text);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_paths() {
        let cfg = Config {
            output_path: Some("  ".into()),
            ..base()
        };
        assert!(cfg.validate().is_err());

        let cfg = Config {
            input_path: Some(String::new()),
            ..base()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_seed_in_verify_mode() {
        let cfg = Config {
            mode: Mode::Verify,
            seed: Some(7),
            ..base()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn deserialises_from_string_values() {
        let cfg = config::Config::builder()
            .set_override("mode", "verify")
            .unwrap()
            .set_override("format", "json")
            .unwrap()
            .set_override("input_path", "vectors.txt")
            .unwrap()
            .build()
            .unwrap();
        let c: Config = cfg.try_deserialize().unwrap();
        assert_eq!(c.mode, Mode::Verify);
        assert_eq!(c.format, Format::Json);
        assert_eq!(c.input_path.as_deref(), Some("vectors.txt"));
        assert_eq!(c.seed, None);
        assert_eq!(c.log_level, "info");
    }

    #[test]
    fn seed_parses_from_string() {
        let cfg = config::Config::builder()
            .set_override("seed", "42")
            .unwrap()
            .build()
            .unwrap();
        let c: Config = cfg.try_deserialize().unwrap();
        assert_eq!(c.seed, Some(42));
    }
}
