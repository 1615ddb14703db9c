//! Property tests checking the index against brute force.
//!
//! Glob candidates must never miss a real match, verified search must equal a
//! full scan, and posting invariants must hold across arbitrary sequences of
//! adds, deletes and prunes. Random inputs use a small alphabet so keys share
//! plenty of trigrams.

mod common;

use common::metric_names;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashSet};
use trigram_core::{
    extract, glob, Config, DocId, Index, Lookup, NameCatalog, SearchQuery, Trigram,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn brute_force(names: &[String], pattern: &str) -> Vec<DocId> {
    let compiled = ::glob::Pattern::new(pattern).unwrap();
    names
        .iter()
        .enumerate()
        .filter(|(_, n)| compiled.matches(n))
        .map(|(i, _)| DocId(i as u64))
        .collect()
}

// === Strategies ===

/// Short dotted key such as `ab.c1-.b`.
fn name() -> impl Strategy<Value = String> {
    "[a-c]{1,3}(\\.[a-c0-9-]{1,4}){0,3}"
}

fn glob_token() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-c0-9.-]{1,4}",
        2 => Just("*".to_string()),
        1 => Just("?".to_string()),
        1 => "\\[!?[a-c0-9]{1,3}\\]",
    ]
}

/// Glob over the same alphabet as [`name`]. Adjacent stars are folded, since
/// `**` inside a component is not a valid pattern.
fn glob_pattern() -> impl Strategy<Value = String> {
    prop::collection::vec(glob_token(), 1..6).prop_map(|tokens| {
        let mut pattern = tokens.concat();
        while pattern.contains("**") {
            pattern = pattern.replace("**", "*");
        }
        pattern
    })
}

fn key_set() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name(), 0..40)
}

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    /// Delete a document picked from everything added so far, live or not
    Delete(prop::sample::Index),
    Prune(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => name().prop_map(Op::Add),
        3 => any::<prop::sample::Index>().prop_map(Op::Delete),
        1 => (0usize..6).prop_map(Op::Prune),
    ]
}

// === Model ===

/// Live documents as the test sees them, alongside the index under test.
#[derive(Default)]
struct Model {
    /// Trigram set of every document ever added, by ID
    trigrams: Vec<HashSet<Trigram>>,
    bodies: Vec<String>,
    live: BTreeSet<DocId>,
}

/// Check every posting invariant against the model.
fn check_invariants(index: &Index, model: &Model) -> Result<(), TestCaseError> {
    prop_assert_eq!(index.len(), model.live.len());
    prop_assert_eq!(index.next_id(), DocId(model.bodies.len() as u64));
    prop_assert_eq!(
        index.live_ids(),
        model.live.iter().copied().collect::<Vec<_>>()
    );

    for (trigram, lookup) in index.postings().iter() {
        let Lookup::List(ids) = lookup else { continue };
        prop_assert!(!ids.is_empty());
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]), "{} not ascending", trigram);
        for id in ids {
            prop_assert!(model.live.contains(id), "{} lists dead doc {}", trigram, id);
            prop_assert!(model.trigrams[id.as_usize()].contains(&trigram));
        }
    }

    for id in &model.live {
        for trigram in &model.trigrams[id.as_usize()] {
            match index.postings().lookup(*trigram) {
                Lookup::Universal => {}
                Lookup::List(ids) => prop_assert!(ids.binary_search(id).is_ok()),
                Lookup::Absent => {
                    prop_assert!(false, "{} missing for live doc {}", trigram, id)
                }
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn glob_candidates_have_no_false_negatives(
        names in key_set(),
        pattern in glob_pattern(),
        limit in prop::option::of(0usize..8),
    ) {
        let mut index = Index::from_documents(&names);
        if let Some(limit) = limit {
            index.prune(limit);
        }

        let candidates: HashSet<DocId> = index.query_glob(&pattern).into_iter().collect();
        for id in brute_force(&names, &pattern) {
            prop_assert!(
                candidates.contains(&id),
                "{:?} missed {} ({})",
                pattern,
                id,
                names[id.as_usize()]
            );
        }
    }

    #[test]
    fn verified_glob_search_equals_scan(names in key_set(), pattern in glob_pattern()) {
        let catalog = NameCatalog::from_names(names.clone(), &Config::default());
        let query = SearchQuery::glob(&pattern).unwrap();

        let found: Vec<DocId> = catalog.search(&query).into_iter().map(|r| r.id).collect();
        prop_assert_eq!(found, brute_force(&names, &pattern));
    }

    #[test]
    fn substring_candidates_cover_matches(names in key_set(), needle in "[a-c0-9.-]{0,5}") {
        let index = Index::from_documents(&names);
        let got = index.query(&needle);

        for (i, name) in names.iter().enumerate() {
            if name.contains(needle.as_str()) {
                prop_assert!(got.contains(&DocId(i as u64)), "{:?} missed {:?}", needle, name);
            }
        }
    }

    #[test]
    fn prune_twice_is_prune_once(
        names in key_set(),
        limit in 0usize..8,
        patterns in prop::collection::vec(glob_pattern(), 1..6),
    ) {
        let mut once = Index::from_documents(&names);
        once.prune(limit);
        let mut twice = once.clone();
        prop_assert_eq!(twice.prune(limit), 0);

        let (a, b) = (once.stats(), twice.stats());
        prop_assert_eq!(a.postings, b.postings);
        prop_assert_eq!(a.universal_trigrams, b.universal_trigrams);
        for pattern in &patterns {
            prop_assert_eq!(once.query_glob(pattern), twice.query_glob(pattern));
        }
    }

    #[test]
    fn segment_never_crosses_wildcards(pattern in glob_pattern()) {
        let literal: HashSet<Trigram> = glob::literal_runs(pattern.as_bytes())
            .into_iter()
            .flat_map(extract)
            .collect();
        for trigram in glob::segment(&pattern) {
            prop_assert!(literal.contains(&trigram), "{:?} produced {}", pattern, trigram);
            prop_assert!(!trigram.bytes().iter().any(|b| matches!(b, b'*' | b'?' | b'[' | b']')));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_under_mixed_operations(ops in prop::collection::vec(op(), 0..120)) {
        let mut index = Index::new();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Add(body) => {
                    let id = index.add(&body);
                    prop_assert_eq!(id.as_usize(), model.bodies.len());
                    model.trigrams.push(extract(&body).into_iter().collect());
                    model.bodies.push(body);
                    model.live.insert(id);
                }
                Op::Delete(pick) => {
                    if model.bodies.is_empty() {
                        continue;
                    }
                    let id = DocId(pick.index(model.bodies.len()) as u64);
                    let was_live = index.delete(&model.bodies[id.as_usize()], id);
                    prop_assert_eq!(was_live, model.live.remove(&id));
                }
                Op::Prune(limit) => {
                    index.prune(limit);
                }
            }
            check_invariants(&index, &model)?;
        }
    }
}

// === Fixed corpus ===

const PATTERNS: &[&str] = &[
    "general.tuning.*.glob-1.dir-2.app-3.*",
    "general.tuning.*.glob-1.*.app-3.*",
    "*.dir-[02].app-?.cpu",
    "*glob-3.dir-3*",
    "general.tuning.????????.glob-0.dir-0.app-0.mem",
    "*.[!c]??",
    "*",
    "no.such.metric.*",
];

#[test]
fn test_verified_search_equals_scan_on_metric_names() {
    init_tracing();
    let names = metric_names(4);
    let catalog = NameCatalog::from_names(names.clone(), &Config::default());

    for pattern in PATTERNS {
        let query = SearchQuery::glob(pattern).unwrap();
        let found: Vec<DocId> = catalog.search(&query).into_iter().map(|r| r.id).collect();
        assert_eq!(found, brute_force(&names, pattern), "pattern {:?}", pattern);
    }
}

#[test]
fn test_prune_bounds_postings_and_keeps_recall() {
    let names = metric_names(4);
    let mut index = Index::from_documents(&names);
    let before = index.stats();

    let pruned = index.prune(64);
    let after = index.stats();

    assert!(pruned > 0);
    assert!(after.postings < before.postings);
    assert_eq!(after.universal_trigrams as usize, pruned);
    for (_, lookup) in index.postings().iter() {
        if let Lookup::List(ids) = lookup {
            assert!(ids.len() <= 64);
        }
    }

    // recall survives pruning
    for pattern in PATTERNS {
        let candidates: HashSet<DocId> = index.query_glob(pattern).into_iter().collect();
        assert!(brute_force(&names, pattern)
            .iter()
            .all(|id| candidates.contains(id)));
    }
}
