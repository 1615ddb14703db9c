//! Core data types shared by the index and the layers above it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Permanent identity of an indexed document.
///
/// Assigned in strict insertion order starting at 0 and never reused, even
/// after the document is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u64);

impl DocId {
    /// Position of this ID in a dense, ID-indexed table.
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DocId {
    fn from(id: u64) -> Self {
        DocId(id)
    }
}

/// Statistics about the index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Documents added and not yet deleted
    pub live_documents: u64,

    /// The ID the next added document will receive
    pub next_id: u64,

    /// Distinct trigrams tracked, universal ones included
    pub trigrams: u64,

    /// Trigrams that have been pruned to universal
    pub universal_trigrams: u64,

    /// Total DocID entries across all posting lists
    pub postings: u64,

    /// When the index was last pruned
    pub last_pruned: Option<DateTime<Utc>>,
}

impl IndexStats {
    /// Number of documents ever deleted.
    pub fn deleted_documents(&self) -> u64 {
        self.next_id - self.live_documents
    }

    /// Trigrams that still discriminate between documents.
    pub fn tracked_trigrams(&self) -> u64 {
        self.trigrams - self.universal_trigrams
    }
}
