//! Compiled search queries.
//!
//! A [`SearchQuery`] carries two things:
//! - a trigram plan, handed to [`crate::Index::query_trigrams`] to narrow the
//!   key set down to candidates
//! - a matcher that re-checks each candidate against the full pattern
//!
//! The index alone over-approximates glob patterns (keys holding every literal
//! run in the wrong arrangement still come back). The matcher removes those.
//! Matching is byte-exact and case-sensitive, like the index.

use crate::error::{Result, TrigramError};
use crate::glob;
use crate::trigram::{extract, Trigram};
use crate::types::DocId;
use serde::Serialize;
use std::sync::Arc;

/// The kind of pattern a query was compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Substring,
    Glob,
    Exact,
}

/// A compiled search query ready for matching.
///
/// Queries are compiled once and can be reused for multiple searches.
#[derive(Clone)]
pub struct SearchQuery {
    /// Pattern as given by the caller
    pattern: String,

    kind: QueryKind,

    /// Trigrams every match must contain
    trigrams: Vec<Trigram>,

    /// The matcher implementation
    matcher: Arc<dyn Matcher>,
}

impl std::fmt::Debug for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchQuery")
            .field("pattern", &self.pattern)
            .field("kind", &self.kind)
            .field("trigrams", &self.trigrams.len())
            .finish()
    }
}

impl SearchQuery {
    /// Create a substring search query.
    ///
    /// # Example
    /// ```
    /// use trigram_core::SearchQuery;
    /// let query = SearchQuery::substring("tuning");
    /// assert!(query.matches("general.tuning.cpu"));
    /// ```
    pub fn substring(pattern: &str) -> Self {
        SearchQuery {
            pattern: pattern.to_string(),
            kind: QueryKind::Substring,
            trigrams: extract(pattern),
            matcher: Arc::new(SubstringMatcher {
                needle: pattern.to_string(),
            }),
        }
    }

    /// Create a glob pattern query.
    ///
    /// Supports `*`, `?` and bracket classes such as `[abc]` or `[!0-9]`.
    ///
    /// # Example
    /// ```
    /// use trigram_core::SearchQuery;
    /// let query = SearchQuery::glob("general.*.cpu").unwrap();
    /// assert!(query.matches("general.tuning.cpu"));
    /// ```
    pub fn glob(pattern: &str) -> Result<Self> {
        let compiled = ::glob::Pattern::new(pattern)
            .map_err(|e| TrigramError::invalid_pattern(pattern, e.msg))?;

        Ok(SearchQuery {
            pattern: pattern.to_string(),
            kind: QueryKind::Glob,
            trigrams: glob::segment(pattern),
            matcher: Arc::new(GlobMatcher { pattern: compiled }),
        })
    }

    /// Create an exact key query.
    pub fn exact(key: &str) -> Self {
        SearchQuery {
            pattern: key.to_string(),
            kind: QueryKind::Exact,
            trigrams: extract(key),
            matcher: Arc::new(ExactMatcher {
                key: key.to_string(),
            }),
        }
    }

    /// The pattern this query was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Trigrams every match must contain; empty means no constraint.
    pub fn trigrams(&self) -> &[Trigram] {
        &self.trigrams
    }

    /// Check if a key matches this query.
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }

    /// Check if this query would match everything.
    pub fn matches_all(&self) -> bool {
        self.matcher.matches_all()
    }
}

/// A verified match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: DocId,
    pub name: String,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(id: DocId, name: impl Into<String>) -> Self {
        SearchResult {
            id,
            name: name.into(),
        }
    }
}

// === Matcher Implementations ===

/// Trait for pattern matching implementations.
trait Matcher: Send + Sync {
    /// Check if the given key matches this pattern.
    fn matches(&self, key: &str) -> bool;

    /// Returns true if this matcher matches everything
    fn matches_all(&self) -> bool {
        false
    }
}

struct SubstringMatcher {
    needle: String,
}

impl Matcher for SubstringMatcher {
    fn matches(&self, key: &str) -> bool {
        key.contains(self.needle.as_str())
    }

    fn matches_all(&self) -> bool {
        self.needle.is_empty()
    }
}

struct ExactMatcher {
    key: String,
}

impl Matcher for ExactMatcher {
    fn matches(&self, key: &str) -> bool {
        key == self.key
    }
}

/// Whole-key glob matcher backed by the `glob` crate.
struct GlobMatcher {
    pattern: ::glob::Pattern,
}

impl Matcher for GlobMatcher {
    fn matches(&self, key: &str) -> bool {
        self.pattern.matches(key)
    }

    fn matches_all(&self) -> bool {
        let raw = self.pattern.as_str();
        !raw.is_empty() && raw.bytes().all(|b| b == b'*')
    }
}

// === Query Parsing ===

/// Parse a query string into a SearchQuery.
///
/// # Query Syntax
///
/// - `exact:<key>` - the key itself and nothing else
/// - `general.*.cpu` - glob pattern, chosen whenever `*`, `?` or `[` appears
/// - `tuning` - keys containing "tuning"
///
/// Surrounding whitespace is trimmed; an empty input matches every key.
pub fn parse_query(input: &str) -> Result<SearchQuery> {
    let input = input.trim();

    if let Some(key) = input.strip_prefix("exact:") {
        return Ok(SearchQuery::exact(key));
    }

    if glob::is_glob(input) {
        SearchQuery::glob(input)
    } else {
        Ok(SearchQuery::substring(input))
    }
}
