//! Deterministic metric-name corpus for integration tests.
//!
//! Names follow `general.tuning.<pod>.glob-<i>.dir-<j>.app-<k>.<metric>`. Pod
//! names are derived from their position, so every run sees the same corpus.

#![allow(dead_code)]

pub const FORMAT_PREFIX: &str = "general.tuning";

const POD_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Eight-character pod name scrambled from `i`.
pub fn pod_name(i: usize) -> String {
    let mut h = (i as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    (0..8)
        .map(|_| {
            let c = POD_ALPHABET[(h % POD_ALPHABET.len() as u64) as usize] as char;
            h /= POD_ALPHABET.len() as u64;
            c
        })
        .collect()
}

/// `n^4` names over `n` pods, globs, dirs and apps, with two metrics each.
pub fn metric_names(n: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(n * n * n * n * 2);

    for pod in (0..n).map(pod_name) {
        for glob in 0..n {
            for dir in 0..n {
                for app in 0..n {
                    for metric in ["cpu", "mem"] {
                        names.push(format!(
                            "{}.{}.glob-{}.dir-{}.app-{}.{}",
                            FORMAT_PREFIX, pod, glob, dir, app, metric
                        ));
                    }
                }
            }
        }
    }
    names
}
