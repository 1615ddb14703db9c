//! Stats command - show index statistics.

use super::SourceArgs;
use crate::app::App;
use crate::OutputFormat;
use clap::Args;
use trigram_core::Config;

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

/// Run the stats command.
pub fn run(config: Config, args: StatsArgs) -> anyhow::Result<()> {
    let app = App::load(config, &args.source)?;
    let stats = app.catalog.stats();

    if let OutputFormat::Json = args.output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Trigram Index Status");
    println!("====================");
    println!();

    if app.catalog.is_empty() {
        println!("No keys loaded from {}.", args.source.names.display());
        return Ok(());
    }

    println!("Summary:");
    println!("  Live keys:          {}", stats.live_documents);
    println!("  Deleted keys:       {}", stats.deleted_documents());
    println!("  Trigrams:           {}", stats.trigrams);
    println!("  Universal trigrams: {}", stats.universal_trigrams);
    println!("  Posting entries:    {}", stats.postings);

    if stats.trigrams > 0 {
        println!(
            "  Avg list length:    {:.1}",
            stats.postings as f64 / stats.tracked_trigrams().max(1) as f64
        );
    }

    if let Some(pruned) = stats.last_pruned {
        println!(
            "  Last pruned:        {}",
            pruned.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}
