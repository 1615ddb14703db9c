//! # Trigram CLI
//!
//! Command-line driver for the trigram index. Keys (one per line) are read
//! from a file, or from stdin when the path is `-`, indexed in memory, and then
//! queried.
//!
//! ## Commands
//!
//! - `trigram query <pattern> --names <path>` - Search keys by substring or glob
//! - `trigram stats --names <path>` - Show index statistics
//!
//! ## Example Usage
//!
//! ```bash
//! # Glob search over a metric name dump
//! trigram query 'general.tuning.*.glob-1.*' --names metrics.txt
//!
//! # Candidate count only, after pruning lists longer than 5000
//! trigram query '*.cpu' --names metrics.txt --prune 5000 --candidates
//! ```

mod app;
mod commands;

use clap::{Parser, Subcommand};
use commands::{query::QueryArgs, stats::StatsArgs};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Trigram - substring and glob lookup over metric names
#[derive(Parser)]
#[command(name = "trigram")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search keys matching a pattern
    Query(QueryArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => trigram_core::Config::load_from(path)?,
        None => trigram_core::Config::load()?,
    };

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.general.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Execute command
    match cli.command {
        Commands::Query(args) => commands::query::run(config, args),
        Commands::Stats(args) => commands::stats::run(config, args),
    }
}
