//! Subcommand implementations.

pub mod query;
pub mod stats;

use clap::Args;
use std::path::PathBuf;

/// Where the keys come from and how the index is shaped.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// File with one key per line (`-` reads stdin)
    #[arg(short, long)]
    pub names: PathBuf,

    /// Prune posting lists longer than this after loading
    #[arg(long)]
    pub prune: Option<usize>,
}
