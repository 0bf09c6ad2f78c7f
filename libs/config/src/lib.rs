//! # eventq Configuration
//!
//! Settings for a benchmark run: how many round trips to drive through the
//! Producer / EventQueue / Consumer pipeline, with which value, how long the
//! caller waits for each reply, and how logging is set up.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bench_config::BenchConfig;
//! use std::path::Path;
//!
//! let config = BenchConfig::load(Some(Path::new("config/eventq.toml")))?;
//! println!("{} rounds of {}", config.pipeline.rounds, config.pipeline.initial_value);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod bench_config;

pub use bench_config::{BenchConfig, LoggingSettings, PipelineSettings, ENV_PREFIX};
