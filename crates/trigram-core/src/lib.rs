//! # Trigram Core Library
//!
//! A trigram inverted index over a growing and shrinking set of short keys,
//! such as dotted metric names. It answers substring and glob lookups by
//! intersecting posting lists instead of scanning every key.
//!
//! ## Architecture
//!
//! - **Trigram** (`trigram`): 3-byte codec and overlapping extraction
//! - **Glob** (`glob`): splits wildcard patterns into literal runs
//! - **Postings** (`postings`): trigram to sorted DocID list, universal flag
//! - **Index** (`index`): add, delete, query and prune
//! - **Search** (`search`): compiled queries with an exact verifier
//! - **Catalog** (`catalog`): the index plus the names it was built from
//! - **Shared** (`shared`): lock-wrapped catalog for multi-threaded callers
//! - **Config** (`config`): configuration management
//!
//! ## Example
//!
//! ```rust
//! use trigram_core::{glob, DocId, Index};
//!
//! let mut index = Index::from_documents(["foo", "foobar", "foobfoo", "zotzot"]);
//! assert_eq!(index.query("foob"), vec![DocId(1), DocId(2)]);
//!
//! // wildcard callers segment first, then intersect
//! let trigrams = glob::segment("*foo?ar");
//! assert_eq!(index.query_trigrams(&trigrams), vec![DocId(0), DocId(1), DocId(2)]);
//!
//! index.prune(0);
//! assert_eq!(index.query("zot").len(), 4);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod glob;
pub mod index;
pub mod postings;
pub mod search;
pub mod shared;
pub mod trigram;
pub mod types;

// Re-export commonly used types
pub use crate::catalog::NameCatalog;
pub use crate::config::Config;
pub use crate::error::{Result, TrigramError};
pub use crate::index::Index;
pub use crate::postings::{Lookup, PostingStore};
pub use crate::search::{parse_query, QueryKind, SearchQuery, SearchResult};
pub use crate::shared::SharedCatalog;
pub use crate::trigram::{extract, extract_into, Trigram};
pub use crate::types::{DocId, IndexStats};
