//! conviction: Offline harness for the conviction scoring engine.
//!
//! Reads signal snapshots as JSON, scores them and writes results as JSON to
//! stdout. Logs go to stderr.

mod batch;
mod settings;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use conviction_core::traits::ConvictionScorer;
use conviction_core::types::SignalSnapshot;
use conviction_engine::ConvictionEngine;
use tracing::info;

/// Score token candidates from signal snapshots.
#[derive(Parser)]
#[command(name = "conviction")]
#[command(version, about = "Deterministic interaction-aware conviction scoring.")]
struct Cli {
    /// Path to a TOML scoring configuration
    /// (default: <config_dir>/conviction/config.toml, if present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Log format: text or json.
    #[arg(long, default_value = "text", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single snapshot.
    Score(ScoreArgs),
    /// Score JSON lines of `{"candidate": .., "snapshot": ..}` in parallel.
    Batch(BatchArgs),
    /// Configuration subcommands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
}

#[derive(Args)]
struct ScoreArgs {
    /// Snapshot JSON file. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Pretty-print the result.
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// JSON-lines file. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let scoring = settings::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Score(args) => score(ConvictionEngine::with_config(scoring)?, args),
        Commands::Batch(args) => score_batch(ConvictionEngine::with_config(scoring)?, args),
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            print!("{}", settings::to_toml(&scoring)?);
            Ok(())
        }
    }
}

fn score(engine: ConvictionEngine, args: ScoreArgs) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let snapshot = SignalSnapshot::from_json(&input).context("Failed to decode snapshot")?;
    let result = engine.score(&snapshot);
    info!(
        final_score = result.final_score,
        recommendation = %result.recommendation,
        "scored snapshot"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("Failed to encode result")?;
    println!("{json}");
    Ok(())
}

fn score_batch(engine: ConvictionEngine, args: BatchArgs) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let entries = batch::parse_entries(&input)?;
    let count = entries.len();

    let records = batch::score_entries(&engine, entries, chrono::Utc::now());
    for record in &records {
        let line = serde_json::to_string(record).context("Failed to encode record")?;
        println!("{line}");
    }
    info!(count, "scored batch");
    Ok(())
}

/// Read a file, or stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Initialise the tracing subscriber on stderr.
///
/// `RUST_LOG` overrides `level_str` when set.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .init();
    }
}
