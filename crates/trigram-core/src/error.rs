//! Error types for trigram core operations.
//!
//! The index itself is total and never fails. Errors only arise in the layers
//! around it: compiling a verification pattern, reading configuration, or
//! loading key files. Library code returns [`TrigramError`]; binaries can wrap
//! it with `anyhow`.

use thiserror::Error;

/// Result type alias using TrigramError
pub type Result<T> = std::result::Result<T, TrigramError>;

/// Core error types for trigram operations.
#[derive(Error, Debug)]
pub enum TrigramError {
    // === Search Errors ===
    /// Pattern the verifier cannot compile (e.g. malformed bracket class)
    #[error("invalid search pattern: {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing or serialization failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrigramError {
    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        TrigramError::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        TrigramError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TrigramError::invalid_pattern("a[b", "unclosed bracket");
        assert_eq!(
            err.to_string(),
            "invalid search pattern: a[b: unclosed bracket"
        );
    }
}
