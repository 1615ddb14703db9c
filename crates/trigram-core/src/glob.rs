//! Glob segmentation.
//!
//! Splits a wildcard pattern into the literal runs between `*`, `?` and
//! bracket classes and extracts trigrams from each run separately. No trigram
//! ever straddles a wildcard, so the resulting sequence is safe to use as an
//! AND-query: every key the glob matches contains all of its trigrams.
//!
//! The sequence over-approximates the glob. Keys that contain every literal
//! run but not in the right arrangement still come back as candidates; the
//! verifier in [`crate::search`] is what rejects them.

use crate::trigram::{extract_into, Trigram};

/// Returns true if the pattern contains any glob metacharacter.
pub fn is_glob(pattern: impl AsRef<[u8]>) -> bool {
    pattern
        .as_ref()
        .iter()
        .any(|b| matches!(b, b'*' | b'?' | b'['))
}

/// Literal runs of `pattern`, in order, with wildcards and classes removed.
///
/// Empty runs (adjacent wildcards, a leading `*`) are omitted.
pub fn literal_runs(pattern: &[u8]) -> Vec<&[u8]> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < pattern.len() {
        match pattern[i] {
            b'*' | b'?' => {
                push_run(&mut runs, &pattern[start..i]);
                start = i + 1;
            }
            b'[' => {
                push_run(&mut runs, &pattern[start..i]);
                i = class_end(pattern, i);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < pattern.len() {
        push_run(&mut runs, &pattern[start..]);
    }
    runs
}

/// Trigrams that every match of `pattern` must contain.
///
/// An empty result means "no constraint", not "no match": it comes back for
/// patterns shorter than three bytes and for patterns with no literal run of
/// at least three bytes.
pub fn segment(pattern: impl AsRef<[u8]>) -> Vec<Trigram> {
    let pattern = pattern.as_ref();
    let mut trigrams = Vec::new();
    if pattern.len() < 3 {
        return trigrams;
    }
    for run in literal_runs(pattern) {
        extract_into(run, &mut trigrams);
    }
    trigrams
}

fn push_run<'a>(runs: &mut Vec<&'a [u8]>, run: &'a [u8]) {
    if !run.is_empty() {
        runs.push(run);
    }
}

/// Index of the `]` closing the class opened at `open`, or `pattern.len()` if
/// the class is never closed.
///
/// A `]` directly after `[` or `[!` is a class member, not the terminator, as
/// in the `glob` crate. A scanner that closed the class at the first `]` would
/// read `x[]abc` as `x`, `[]`, `abc`; here the class runs to the end.
fn class_end(pattern: &[u8], open: usize) -> usize {
    let mut j = open + 1;
    if pattern.get(j) == Some(&b'!') {
        j += 1;
    }
    if pattern.get(j) == Some(&b']') {
        j += 1;
    }
    while j < pattern.len() && pattern[j] != b']' {
        j += 1;
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigram::extract;

    fn runs(pattern: &str) -> Vec<&str> {
        literal_runs(pattern.as_bytes())
            .into_iter()
            .map(|r| std::str::from_utf8(r).unwrap())
            .collect()
    }

    fn joined(parts: &[&str]) -> Vec<Trigram> {
        let mut acc = Vec::new();
        for p in parts {
            extract_into(p, &mut acc);
        }
        acc
    }

    #[test]
    fn test_plain_pattern_matches_extract() {
        assert_eq!(segment("general.tuning"), extract("general.tuning"));
        assert!(!is_glob("general.tuning"));
    }

    #[test]
    fn test_star_and_question_split() {
        assert_eq!(runs("*.glob-1.dir-2.*"), vec![".glob-1.dir-2."]);
        assert_eq!(runs("foo?bar*baz"), vec!["foo", "bar", "baz"]);
        assert_eq!(segment("foo?bar*baz"), joined(&["foo", "bar", "baz"]));
        assert!(is_glob("foo?bar"));
    }

    #[test]
    fn test_no_trigram_crosses_wildcard() {
        let got = segment("ab*cd");
        assert!(got.is_empty());

        let got = segment("abc*def");
        assert_eq!(got, joined(&["abc", "def"]));
        assert!(!got.contains(&Trigram::from(*b"bc*")));
        assert!(!got.contains(&Trigram::from(*b"cde")));
    }

    #[test]
    fn test_bracket_class_is_skipped() {
        assert_eq!(runs("foo[ab]bar"), vec!["foo", "bar"]);
        assert_eq!(segment("foo[ab]bar"), joined(&["foo", "bar"]));
        assert!(segment("[abc]").is_empty());
        assert!(segment("fo[o]ba").is_empty());
    }

    #[test]
    fn test_leading_bracket_member() {
        assert_eq!(runs("[]]abc"), vec!["abc"]);
        assert_eq!(runs("[!]x]abc"), vec!["abc"]);
        assert_eq!(runs("x[!a]yz"), vec!["x", "yz"]);

        // the class only closes at a later `]`
        assert!(segment("x[]abc").is_empty());
        assert_eq!(runs("foo[]]bar"), vec!["foo", "bar"]);
        assert_eq!(segment("foo[]]bar"), joined(&["foo", "bar"]));
        assert!(!segment("foo[]]bar").contains(&Trigram::from(*b"]ba")));
    }

    #[test]
    fn test_unclosed_bracket_swallows_rest() {
        assert_eq!(runs("foo[bar"), vec!["foo"]);
        assert_eq!(segment("foo[bar"), joined(&["foo"]));
    }

    #[test]
    fn test_short_and_wildcard_only_patterns() {
        assert!(segment("").is_empty());
        assert!(segment("ab").is_empty());
        assert!(segment("***").is_empty());
        assert!(segment("?*?").is_empty());
        assert!(runs("**").is_empty());
    }

    #[test]
    fn test_trailing_run() {
        assert_eq!(runs("*foo"), vec!["foo"]);
        assert_eq!(runs("foo*"), vec!["foo"]);
        assert_eq!(runs("a*bc*def"), vec!["a", "bc", "def"]);
        assert_eq!(segment("a*bc*def"), joined(&["def"]));
    }
}
