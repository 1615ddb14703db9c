//! Thread-safe catalog handle.
//!
//! [`NameCatalog`] and [`crate::Index`] have no internal locking. This wrapper
//! puts the catalog behind a single-writer / multi-reader lock so a service can
//! search from many threads while one thread applies updates. A generation
//! counter moves on every mutation, letting readers tell whether anything
//! changed between two calls.

use crate::catalog::NameCatalog;
use crate::search::{SearchQuery, SearchResult};
use crate::types::{DocId, IndexStats};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// A [`NameCatalog`] shared between threads.
///
/// Cloning the surrounding `Arc` is the intended way to hand it out.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    catalog: RwLock<NameCatalog>,

    /// Bumped after every mutation
    generation: AtomicU64,
}

impl SharedCatalog {
    /// Wrap an existing catalog.
    pub fn new(catalog: NameCatalog) -> Self {
        SharedCatalog {
            catalog: RwLock::new(catalog),
            generation: AtomicU64::new(0),
        }
    }

    /// Get the current generation (modification counter).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Take a read lock for several calls against one consistent state.
    pub fn read(&self) -> RwLockReadGuard<'_, NameCatalog> {
        self.catalog.read()
    }

    pub fn len(&self) -> usize {
        self.catalog.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.read().is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.catalog.read().stats()
    }

    pub fn search(&self, query: &SearchQuery) -> Vec<SearchResult> {
        self.catalog.read().search(query)
    }

    pub fn search_limited(&self, query: &SearchQuery, limit: usize) -> Vec<SearchResult> {
        self.catalog.read().search_limited(query, limit)
    }

    /// Add a name and return its ID.
    pub fn insert(&self, name: impl Into<String>) -> DocId {
        let id = self.catalog.write().insert(name);
        self.bump();
        id
    }

    /// Remove a name by ID. The generation only moves if something was removed.
    pub fn remove(&self, id: DocId) -> Option<String> {
        let removed = self.catalog.write().remove(id);
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    /// Prune the shared index.
    pub fn prune(&self, limit: usize) -> usize {
        let pruned = self.catalog.write().prune(limit);
        if pruned > 0 {
            self.bump();
        }
        pruned
    }

    /// Swap in a freshly built catalog, e.g. after a bulk rebuild.
    pub fn replace(&self, catalog: NameCatalog) -> NameCatalog {
        let old = std::mem::replace(&mut *self.catalog.write(), catalog);
        self.bump();
        debug!(generation = self.generation(), "Catalog replaced");
        old
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}
