//! Benchmark Configuration Module
//!
//! Loads settings from an optional TOML file, then applies `EVENTQ_`
//! environment overrides (`EVENTQ_PIPELINE__ROUNDS=10`). Every field has a
//! default, so an empty source yields a runnable configuration.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "EVENTQ";

/// Main benchmark configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct BenchConfig {
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

/// What the caller drives through the pipeline
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Value sent to the Producer on every round trip
    pub initial_value: i64,
    /// Number of round trips per run
    pub rounds: u64,
    /// How long the caller waits for the Producer's reply
    pub round_trip_timeout_ms: u64,
}

/// Log output settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            initial_value: 1000,
            rounds: 1,
            round_trip_timeout_ms: 5000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PipelineSettings {
    pub fn round_trip_timeout(&self) -> Duration {
        Duration::from_millis(self.round_trip_timeout_ms)
    }
}

impl BenchConfig {
    /// Load configuration from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading benchmark config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        // Override with environment variables (EVENTQ_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: BenchConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(?config, "Benchmark configuration loaded");
        Ok(config)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BenchConfig =
            toml::from_str(content).context("Failed to parse benchmark configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.rounds == 0 {
            bail!("pipeline.rounds must be at least 1");
        }
        if self.pipeline.round_trip_timeout_ms == 0 {
            bail!("pipeline.round_trip_timeout_ms must be greater than zero");
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            bail!(
                "logging.level '{}' is not a valid filter directive: {}",
                self.logging.level,
                e
            );
        }
        Ok(())
    }
}
