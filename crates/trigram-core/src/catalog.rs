//! Name catalog: the index plus the names it was built from.
//!
//! [`Index`] keeps no document bodies, so deleting needs the caller to hand
//! back the original content and glob candidates cannot be verified. The
//! catalog stores each name by its [`DocId`], which makes removal
//! self-sufficient and lets searches drop the false positives the trigram
//! layer lets through.

use crate::config::Config;
use crate::index::Index;
use crate::search::{SearchQuery, SearchResult};
use crate::types::{DocId, IndexStats};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// An [`Index`] that owns the names it indexes.
///
/// ## Example
///
/// ```rust
/// use trigram_core::{NameCatalog, SearchQuery};
///
/// let mut catalog = NameCatalog::new();
/// catalog.insert("general.tuning.cpu");
/// let id = catalog.insert("general.tuning.mem");
///
/// let query = SearchQuery::glob("general.*.mem").unwrap();
/// let results = catalog.search(&query);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].id, id);
/// ```
#[derive(Debug, Clone)]
pub struct NameCatalog {
    index: Index,

    /// Name of every ID ever assigned; `None` once removed
    names: Vec<Option<String>>,

    /// Candidate count above which verification runs on the rayon pool
    parallel_threshold: usize,

    /// Re-check candidates against the full pattern
    verify: bool,
}

impl Default for NameCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl NameCatalog {
    /// Create an empty catalog with default settings.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create an empty catalog using the index and search settings of `config`.
    pub fn with_config(config: &Config) -> Self {
        NameCatalog {
            index: Index::new(),
            names: Vec::with_capacity(config.index.initial_capacity),
            parallel_threshold: config.search.parallel_threshold,
            verify: config.search.verify,
        }
    }

    /// Build a catalog from `names`, then apply `index.prune_limit` if set.
    #[instrument(skip_all)]
    pub fn from_names<I, S>(names: I, config: &Config) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::with_config(config);
        for name in names {
            catalog.insert(name);
        }

        if let Some(limit) = config.index.prune_limit {
            let pruned = catalog.prune(limit);
            debug!(limit, pruned, "Applied configured prune limit");
        }

        info!(names = catalog.len(), "Catalog built");
        catalog
    }

    /// Number of live names.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the catalog holds no live names.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The underlying index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the name stored under `id`, if it is still live.
    pub fn get(&self, id: DocId) -> Option<&str> {
        self.names.get(id.as_usize()).and_then(|n| n.as_deref())
    }

    /// Add a name and return its ID.
    pub fn insert(&mut self, name: impl Into<String>) -> DocId {
        let name = name.into();
        let id = self.index.add(&name);
        debug_assert_eq!(id.as_usize(), self.names.len());
        self.names.push(Some(name));
        id
    }

    /// Remove the name stored under `id` and return it.
    ///
    /// Unknown or already-removed IDs return `None` and change nothing.
    pub fn remove(&mut self, id: DocId) -> Option<String> {
        let name = self.names.get_mut(id.as_usize())?.take()?;
        self.index.delete(&name, id);
        Some(name)
    }

    /// Mark trigrams with more than `limit` postings as universal.
    pub fn prune(&mut self, limit: usize) -> usize {
        self.index.prune(limit)
    }

    /// Get current index statistics.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// IDs the trigram layer cannot rule out for `query`, ascending.
    pub fn candidates(&self, query: &SearchQuery) -> Vec<DocId> {
        self.index.query_trigrams(query.trigrams())
    }

    /// All names matching `query`, in ascending ID order.
    ///
    /// Large candidate sets are verified in parallel.
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchResult> {
        let candidates = self.candidates(query);

        if candidates.len() > self.parallel_threshold {
            candidates
                .par_iter()
                .filter_map(|&id| self.resolve(id, query))
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|&id| self.resolve(id, query))
                .collect()
        }
    }

    /// Search with a limit on results.
    ///
    /// Returns the `limit` lowest-ID matches and stops verifying once found.
    pub fn search_limited(&self, query: &SearchQuery, limit: usize) -> Vec<SearchResult> {
        let mut results = Vec::with_capacity(limit.min(1024));

        for id in self.candidates(query) {
            if results.len() >= limit {
                break;
            }
            if let Some(result) = self.resolve(id, query) {
                results.push(result);
            }
        }

        results
    }

    /// Look up `id` and keep it if it passes verification.
    fn resolve(&self, id: DocId, query: &SearchQuery) -> Option<SearchResult> {
        let name = self.get(id)?;
        if self.verify && !query.matches(name) {
            return None;
        }
        Some(SearchResult::new(id, name))
    }
}
