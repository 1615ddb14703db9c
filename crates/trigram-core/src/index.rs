//! In-memory trigram index over short keys.
//!
//! The `Index` assigns every added document a permanent [`DocId`], records the
//! document's trigrams in a [`PostingStore`] and answers AND-queries over
//! trigram sets by intersecting sorted posting lists. It supports:
//!
//! - Bulk construction from an initial document set
//! - Incremental add and delete without rebuilding
//! - Plain substring and glob candidate lookup
//! - Pruning of non-discriminating trigrams to bound memory
//!
//! ## Architecture
//!
//! - A `PostingStore` maps each trigram to an ascending `Vec<DocId>`
//! - A `BTreeSet<DocId>` holds the live set, which answers every query that
//!   carries no constraint
//! - A counter hands out IDs; it only ever moves forward
//!
//! The index keeps no copy of document bodies. [`Index::delete`] therefore
//! needs the caller to pass the same content that was added; see
//! [`crate::catalog::NameCatalog`] for a wrapper that remembers it.
//!
//! Results are candidates: a glob query may return keys that contain all of
//! its literal runs without matching the glob itself.

use crate::glob;
use crate::postings::{Lookup, PostingStore};
use crate::trigram::{extract, Trigram};
use crate::types::{DocId, IndexStats};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::iter::Peekable;
use tracing::{debug, info, instrument, trace};

/// Trigram inverted index with a live-document set.
///
/// All operations are synchronous and CPU-bound. The index has no internal
/// locking; wrap it (see [`crate::shared::SharedCatalog`]) to share it between
/// threads.
///
/// ## Example
///
/// ```rust
/// use trigram_core::{DocId, Index};
///
/// let mut index = Index::from_documents(["foo", "foobar", "zotzot"]);
/// assert_eq!(index.query("foo"), vec![DocId(0), DocId(1)]);
///
/// let id = index.add("zlot");
/// assert_eq!(index.query("lot"), vec![id]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Index {
    /// Trigram to posting list
    postings: PostingStore,

    /// IDs added and not yet deleted
    live: BTreeSet<DocId>,

    /// ID handed to the next added document
    next_id: u64,

    /// When prune last ran
    last_pruned: Option<DateTime<Utc>>,
}

impl Index {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index by adding each document in order.
    ///
    /// Documents receive IDs `0..n` in input order.
    #[instrument(skip_all)]
    pub fn from_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut index = Index::new();
        for doc in documents {
            index.add(doc);
        }

        info!(
            documents = index.len(),
            trigrams = index.postings.len(),
            "Index built"
        );
        index
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Check if the index holds no live documents.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Check if `id` is live.
    pub fn contains(&self, id: DocId) -> bool {
        self.live.contains(&id)
    }

    /// The ID the next added document will receive.
    pub fn next_id(&self) -> DocId {
        DocId(self.next_id)
    }

    /// All live IDs in ascending order.
    pub fn live_ids(&self) -> Vec<DocId> {
        self.live.iter().copied().collect()
    }

    /// Read access to the underlying posting store.
    pub fn postings(&self) -> &PostingStore {
        &self.postings
    }

    /// Add a document and return its ID.
    ///
    /// Always succeeds. Content shorter than three bytes joins the live set
    /// without entering any posting list.
    pub fn add(&mut self, content: impl AsRef<[u8]>) -> DocId {
        let id = DocId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);

        for trigram in extract(content) {
            self.postings.insert(trigram, id);
        }

        trace!(id = %id, "Document added");
        id
    }

    /// Delete document `id`, whose content was `content` when it was added.
    ///
    /// The trigrams to clear are re-derived from `content`; passing anything
    /// other than the original content leaves stale postings behind. Unknown or
    /// already-deleted IDs are a no-op. Returns whether `id` was live.
    pub fn delete(&mut self, content: impl AsRef<[u8]>, id: DocId) -> bool {
        for trigram in extract(content) {
            self.postings.remove(trigram, id);
        }

        let was_live = self.live.remove(&id);
        trace!(id = %id, was_live, "Document deleted");
        was_live
    }

    /// Live documents containing `pattern` as a literal substring.
    ///
    /// Patterns shorter than three bytes constrain nothing and return the
    /// whole live set.
    pub fn query(&self, pattern: impl AsRef<[u8]>) -> Vec<DocId> {
        self.query_trigrams(&extract(pattern))
    }

    /// Candidate documents for a glob pattern (`*`, `?`, `[...]`).
    pub fn query_glob(&self, pattern: impl AsRef<[u8]>) -> Vec<DocId> {
        self.query_trigrams(&glob::segment(pattern))
    }

    /// Live documents containing every trigram in `trigrams`, ascending.
    ///
    /// - empty input, or only universal trigrams: the whole live set
    /// - any trigram with no posting list: empty
    /// - otherwise: intersection of the posting lists
    pub fn query_trigrams(&self, trigrams: &[Trigram]) -> Vec<DocId> {
        let mut lists: Vec<&[DocId]> = Vec::with_capacity(trigrams.len());

        for &trigram in trigrams {
            match self.postings.lookup(trigram) {
                Lookup::Absent => return Vec::new(),
                Lookup::Universal => continue,
                Lookup::List(ids) => lists.push(ids),
            }
        }

        if lists.is_empty() {
            return self.live_ids();
        }

        intersect_sorted(&lists)
    }

    /// Mark every trigram whose posting list is longer than `limit` universal.
    ///
    /// `limit = 0` prunes every list, after which every query returns the
    /// whole live set. Returns the number of trigrams newly marked.
    #[instrument(skip(self))]
    pub fn prune(&mut self, limit: usize) -> usize {
        let over = self.postings.over_limit(limit);
        for &trigram in &over {
            self.postings.mark_universal(trigram);
        }
        self.last_pruned = Some(Utc::now());

        debug!(
            pruned = over.len(),
            remaining = self.postings.len() - self.postings.universal_count(),
            "Prune complete"
        );
        over.len()
    }

    /// Get current index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            live_documents: self.live.len() as u64,
            next_id: self.next_id,
            trigrams: self.postings.len() as u64,
            universal_trigrams: self.postings.universal_count() as u64,
            postings: self.postings.posting_count() as u64,
            last_pruned: self.last_pruned,
        }
    }
}

impl<S: AsRef<[u8]>> FromIterator<S> for Index {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Index::from_documents(iter)
    }
}

impl<S: AsRef<[u8]>> Extend<S> for Index {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for doc in iter {
            self.add(doc);
        }
    }
}

/// K-way merge intersection of ascending, duplicate-free lists.
///
/// Each step looks at the head of every cursor. If all heads agree the ID is
/// emitted and every cursor advances; otherwise the cursors holding the
/// smallest head advance. Stops as soon as any cursor runs dry.
fn intersect_sorted(lists: &[&[DocId]]) -> Vec<DocId> {
    match lists {
        [] => return Vec::new(),
        [only] => return only.to_vec(),
        _ => {}
    }

    let capacity = lists.iter().map(|l| l.len()).min().unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    let mut cursors: Vec<Peekable<_>> = lists
        .iter()
        .map(|l| l.iter().copied().peekable())
        .collect();

    loop {
        let mut lo = DocId(u64::MAX);
        let mut hi = DocId(0);
        for cursor in cursors.iter_mut() {
            let Some(&id) = cursor.peek() else {
                return out;
            };
            lo = lo.min(id);
            hi = hi.max(id);
        }

        if lo == hi {
            out.push(lo);
            for cursor in cursors.iter_mut() {
                cursor.next();
            }
        } else {
            for cursor in cursors.iter_mut() {
                if cursor.peek() == Some(&lo) {
                    cursor.next();
                }
            }
        }
    }
}
