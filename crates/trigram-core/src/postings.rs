//! Posting store: trigram to sorted DocID list, plus the universal flag.
//!
//! Every list is kept ascending and duplicate-free. New IDs only ever grow, so
//! insertion is an append; removal is a binary search and a splice. A list that
//! empties out is dropped, which keeps "absent" equivalent to "no live document
//! contains this trigram".
//!
//! Pruning replaces a list by [`Posting::Universal`]. That state is terminal:
//! universal trigrams ignore inserts and removes and never get a list back.

use crate::trigram::Trigram;
use crate::types::DocId;
use std::collections::HashMap;

/// Stored state for one trigram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Posting {
    /// Ascending, duplicate-free IDs of live documents containing the trigram
    List(Vec<DocId>),

    /// Pruned: treated as matching every live document
    Universal,
}

/// Result of looking a trigram up in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// No live document contains the trigram
    Absent,

    /// The trigram was pruned and constrains nothing
    Universal,

    /// The trigram's posting list
    List(&'a [DocId]),
}

impl<'a> Lookup<'a> {
    /// Returns true if the trigram has been pruned.
    pub fn is_universal(&self) -> bool {
        matches!(self, Lookup::Universal)
    }
}

/// Mapping from trigram to posting state.
#[derive(Debug, Clone, Default)]
pub struct PostingStore {
    entries: HashMap<Trigram, Posting>,
}

impl PostingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trigrams tracked, universal ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store tracks no trigrams.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, trigram: Trigram) -> Lookup<'_> {
        match self.entries.get(&trigram) {
            None => Lookup::Absent,
            Some(Posting::Universal) => Lookup::Universal,
            Some(Posting::List(ids)) => Lookup::List(ids),
        }
    }

    /// Record that document `id` contains `trigram`.
    ///
    /// IDs are expected in non-decreasing order per trigram. An ID equal to the
    /// current tail is ignored; an out-of-order ID is placed by binary search.
    pub fn insert(&mut self, trigram: Trigram, id: DocId) {
        let posting = self
            .entries
            .entry(trigram)
            .or_insert_with(|| Posting::List(Vec::new()));

        let Posting::List(ids) = posting else {
            return;
        };

        match ids.last() {
            Some(&last) if last == id => {}
            Some(&last) if last > id => {
                if let Err(pos) = ids.binary_search(&id) {
                    ids.insert(pos, id);
                }
            }
            _ => ids.push(id),
        }
    }

    /// Remove document `id` from the list of `trigram`, if present.
    pub fn remove(&mut self, trigram: Trigram, id: DocId) {
        let Some(Posting::List(ids)) = self.entries.get_mut(&trigram) else {
            return;
        };

        if let Ok(pos) = ids.binary_search(&id) {
            ids.remove(pos);
        }

        if ids.is_empty() {
            self.entries.remove(&trigram);
        }
    }

    /// Discard the list of `trigram` and flag it universal. Idempotent.
    pub fn mark_universal(&mut self, trigram: Trigram) {
        self.entries.insert(trigram, Posting::Universal);
    }

    /// Trigrams whose list is strictly longer than `limit`.
    pub fn over_limit(&self, limit: usize) -> Vec<Trigram> {
        self.entries
            .iter()
            .filter_map(|(t, p)| match p {
                Posting::List(ids) if ids.len() > limit => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// Number of universal trigrams.
    pub fn universal_count(&self) -> usize {
        self.entries
            .values()
            .filter(|p| matches!(p, Posting::Universal))
            .count()
    }

    /// Total DocID entries across all lists.
    pub fn posting_count(&self) -> usize {
        self.entries
            .values()
            .map(|p| match p {
                Posting::List(ids) => ids.len(),
                Posting::Universal => 0,
            })
            .sum()
    }

    /// Iterate over every tracked trigram, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Trigram, Lookup<'_>)> + '_ {
        self.entries.iter().map(|(t, p)| {
            let lookup = match p {
                Posting::List(ids) => Lookup::List(ids),
                Posting::Universal => Lookup::Universal,
            };
            (*t, lookup)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Trigram {
        let b = s.as_bytes();
        Trigram::new(b[0], b[1], b[2])
    }

    fn ids(raw: &[u64]) -> Vec<DocId> {
        raw.iter().copied().map(DocId).collect()
    }

    fn list(store: &PostingStore, trigram: Trigram) -> Vec<DocId> {
        match store.lookup(trigram) {
            Lookup::List(l) => l.to_vec(),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_absent() {
        let store = PostingStore::new();
        assert_eq!(store.lookup(t("foo")), Lookup::Absent);
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_appends_in_order() {
        let mut store = PostingStore::new();
        store.insert(t("foo"), DocId(0));
        store.insert(t("foo"), DocId(2));
        store.insert(t("foo"), DocId(2));
        store.insert(t("foo"), DocId(5));

        assert_eq!(list(&store, t("foo")), ids(&[0, 2, 5]));
        assert_eq!(store.posting_count(), 3);
    }

    #[test]
    fn test_insert_out_of_order_keeps_sorted() {
        let mut store = PostingStore::new();
        store.insert(t("foo"), DocId(4));
        store.insert(t("foo"), DocId(1));
        store.insert(t("foo"), DocId(1));
        store.insert(t("foo"), DocId(3));

        assert_eq!(list(&store, t("foo")), ids(&[1, 3, 4]));
    }

    #[test]
    fn test_remove() {
        let mut store = PostingStore::new();
        for id in [0, 1, 2] {
            store.insert(t("foo"), DocId(id));
        }

        store.remove(t("foo"), DocId(1));
        assert_eq!(list(&store, t("foo")), ids(&[0, 2]));

        // absent id and absent trigram are no-ops
        store.remove(t("foo"), DocId(9));
        store.remove(t("bar"), DocId(0));
        assert_eq!(list(&store, t("foo")), ids(&[0, 2]));
    }

    #[test]
    fn test_remove_last_drops_entry() {
        let mut store = PostingStore::new();
        store.insert(t("foo"), DocId(7));
        store.remove(t("foo"), DocId(7));

        assert_eq!(store.lookup(t("foo")), Lookup::Absent);
        assert!(store.is_empty());
    }

    #[test]
    fn test_mark_universal_is_terminal() {
        let mut store = PostingStore::new();
        store.insert(t("foo"), DocId(0));
        store.mark_universal(t("foo"));
        store.mark_universal(t("foo"));

        assert!(store.lookup(t("foo")).is_universal());

        store.insert(t("foo"), DocId(1));
        store.remove(t("foo"), DocId(0));
        assert!(store.lookup(t("foo")).is_universal());
        assert_eq!(store.universal_count(), 1);
        assert_eq!(store.posting_count(), 0);
    }

    #[test]
    fn test_mark_universal_unseen_trigram() {
        let mut store = PostingStore::new();
        store.mark_universal(t("zzz"));
        store.insert(t("zzz"), DocId(3));
        assert_eq!(store.lookup(t("zzz")), Lookup::Universal);
    }

    #[test]
    fn test_over_limit() {
        let mut store = PostingStore::new();
        for id in 0..3 {
            store.insert(t("foo"), DocId(id));
        }
        store.insert(t("bar"), DocId(0));
        store.mark_universal(t("baz"));

        assert_eq!(store.over_limit(2), vec![t("foo")]);
        assert!(store.over_limit(3).is_empty());

        let mut all = store.over_limit(0);
        all.sort();
        assert_eq!(all, vec![t("bar"), t("foo")]);
    }
}
