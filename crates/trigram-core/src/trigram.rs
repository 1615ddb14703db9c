//! Trigram codec and extraction.
//!
//! A trigram is three consecutive bytes packed into the low 24 bits of a
//! `u32`, first byte most significant. Extraction is byte-wise: multi-byte
//! UTF-8 sequences are treated as independent bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three consecutive bytes packed into a comparable integer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Trigram(u32);

impl Trigram {
    /// Pack three bytes into a trigram.
    #[inline]
    pub const fn new(b0: u8, b1: u8, b2: u8) -> Self {
        Trigram((b0 as u32) << 16 | (b1 as u32) << 8 | b2 as u32)
    }

    /// The packed 24-bit code.
    pub const fn code(&self) -> u32 {
        self.0
    }

    /// Unpack the original three bytes.
    pub const fn bytes(&self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }
}

impl From<[u8; 3]> for Trigram {
    fn from(b: [u8; 3]) -> Self {
        Trigram::new(b[0], b[1], b[2])
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bytes() {
            write!(f, "{}", b.escape_ascii())?;
        }
        Ok(())
    }
}

/// Append the distinct trigrams of `text` to `acc`, sliding a 3-byte window
/// left to right.
///
/// A trigram already present in `acc` is not appended again, so the result
/// keeps first-occurrence order. Texts shorter than three bytes leave `acc`
/// unchanged. Lets callers build one combined sequence across several disjoint
/// substrings in a single buffer.
pub fn extract_into(text: impl AsRef<[u8]>, acc: &mut Vec<Trigram>) {
    let text = text.as_ref();
    if text.len() < 3 {
        return;
    }
    for w in text.windows(3) {
        let t = Trigram::new(w[0], w[1], w[2]);
        // keys are short enough for a linear scan
        if !acc.contains(&t) {
            acc.push(t);
        }
    }
}

/// Distinct trigrams of `text` in first-occurrence order.
pub fn extract(text: impl AsRef<[u8]>) -> Vec<Trigram> {
    let mut acc = Vec::new();
    extract_into(text, &mut acc);
    acc
}
