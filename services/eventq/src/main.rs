//! eventq round-trip benchmark
//!
//! Usage: eventq --config config/eventq.toml --rounds 10000

use actors::ActorSystem;
use anyhow::{Context, Result};
use bench_config::{BenchConfig, LoggingSettings};
use clap::Parser;
use eventq::Pipeline;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "eventq", version, about = "Producer / EventQueue / Consumer round trips")]
struct Args {
    /// TOML configuration file; EVENTQ_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of round trips to run
    #[arg(short, long)]
    rounds: Option<u64>,

    /// Value injected into the producer each round
    #[arg(short = 'v', long, allow_negative_numbers = true)]
    value: Option<i64>,

    /// Log level or filter directives, e.g. "debug" or "eventq=debug,actors=warn"; RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log level {:?}", settings.level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if settings.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = BenchConfig::load(args.config.as_deref())?;
    if let Some(rounds) = args.rounds {
        config.pipeline.rounds = rounds;
    }
    if let Some(value) = args.value {
        config.pipeline.initial_value = value;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if args.json_logs {
        config.logging.json = true;
    }
    config.validate()?;

    init_logging(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting eventq");

    let system = ActorSystem::new();
    let mut pipeline = Pipeline::launch(&system, config.pipeline.clone())
        .context("Failed to launch pipeline")?;

    let started = Instant::now();
    let summary = pipeline.run().await.context("Pipeline run failed")?;
    let elapsed = started.elapsed();

    let avg_round_trip_ns = elapsed
        .as_nanos()
        .checked_div(u128::from(summary.rounds))
        .unwrap_or(0) as u64;
    let stats = system.metrics().get_stats();
    info!(
        rounds = summary.rounds,
        acks = summary.acks,
        faults = summary.faults,
        last_reply = ?summary.last_reply,
        elapsed_ms = elapsed.as_millis() as u64,
        avg_round_trip_ns,
        messages_processed = stats.messages_processed,
        unexpected_messages = stats.unexpected_messages,
        "Benchmark complete"
    );

    pipeline.shutdown().await?;
    system.shutdown().await?;
    Ok(())
}
