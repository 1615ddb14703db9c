//! Application state management.

use crate::commands::SourceArgs;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::info;
use trigram_core::{Config, NameCatalog};

/// Loaded keys and the catalog built over them.
pub struct App {
    /// Configuration
    pub config: Config,

    /// The indexed keys
    pub catalog: NameCatalog,
}

impl App {
    /// Read the key source and build the catalog.
    ///
    /// A `--prune` flag overrides `index.prune_limit` from the config.
    pub fn load(mut config: Config, source: &SourceArgs) -> anyhow::Result<Self> {
        if source.prune.is_some() {
            config.index.prune_limit = source.prune;
        }

        let names = read_names_from(&source.names)
            .with_context(|| format!("reading keys from {}", source.names.display()))?;

        let catalog = NameCatalog::from_names(names, &config);

        info!(
            source = %source.names.display(),
            keys = catalog.len(),
            "Application initialized"
        );

        Ok(App { config, catalog })
    }
}

/// Read keys from `path`, or from stdin when `path` is `-`.
pub fn read_names_from(path: &Path) -> io::Result<Vec<String>> {
    if path == Path::new("-") {
        read_names(io::stdin().lock())
    } else {
        read_names(BufReader::new(File::open(path)?))
    }
}

/// One key per line; surrounding whitespace is trimmed, blank lines and
/// `#` comments are skipped.
pub fn read_names(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if name.is_empty() || name.starts_with('#') {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}
