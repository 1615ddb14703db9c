//! Query command - search keys by substring or glob.

use super::SourceArgs;
use crate::app::App;
use crate::OutputFormat;
use clap::Args;
use serde::Serialize;
use std::time::Instant;
use trigram_core::{parse_query, Config, QueryKind, SearchResult};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Search pattern (`*`, `?` and `[...]` make it a glob; `exact:` prefix for exact keys)
    pub pattern: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum number of results to show (defaults to `search.max_results`)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Report trigram candidates without verifying them
    #[arg(long)]
    pub candidates: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Serialize)]
struct QueryReport<'a> {
    pattern: &'a str,
    kind: QueryKind,
    trigrams: usize,
    candidates: usize,
    results: &'a [SearchResult],
    elapsed_ms: f64,
}

/// Run the query command.
pub fn run(config: Config, args: QueryArgs) -> anyhow::Result<()> {
    let app = App::load(config, &args.source)?;

    if app.catalog.is_empty() {
        eprintln!("No keys loaded from {}.", args.source.names.display());
        return Ok(());
    }

    let query = parse_query(&args.pattern)?;
    let limit = args.limit.unwrap_or(app.config.search.max_results);

    let start = Instant::now();
    let candidates = app.catalog.candidates(&query);
    let results: Vec<SearchResult> = if args.candidates {
        candidates
            .iter()
            .take(limit)
            .filter_map(|&id| app.catalog.get(id).map(|name| SearchResult::new(id, name)))
            .collect()
    } else {
        app.catalog.search_limited(&query, limit)
    };
    let elapsed = start.elapsed();

    match args.output {
        OutputFormat::Text => {
            for result in &results {
                println!("{}\t{}", result.id, result.name);
            }

            eprintln!();
            eprintln!(
                "{} results from {} candidates in {:.3}ms",
                results.len(),
                candidates.len(),
                elapsed.as_secs_f64() * 1000.0
            );
        }
        OutputFormat::Json => {
            let report = QueryReport {
                pattern: query.pattern(),
                kind: query.kind(),
                trigrams: query.trigrams().len(),
                candidates: candidates.len(),
                results: &results,
                elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
