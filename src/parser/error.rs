//! Error types for identifier list parsing.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading the identifier list.
#[derive(Debug, Error)]
pub enum InputError {
    /// Identifier line is blank after trimming
    #[error("empty identifier from line '{raw}'\n  Suggestion: {suggestion}")]
    EmptyIdentifier {
        /// The raw line that produced the empty identifier
        raw: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// Identifier list file could not be read
    #[error("cannot read identifier list '{}': {source}\n  Suggestion: {suggestion}", path.display())]
    Unreadable {
        /// Path of the identifier list
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// How to fix the issue
        suggestion: String,
    },
}

impl InputError {
    /// Creates an `EmptyIdentifier` error.
    #[must_use]
    pub fn empty(raw: &str) -> Self {
        Self::EmptyIdentifier {
            raw: raw.to_string(),
            suggestion: "Put one DOI per line, e.g. 10.1021/acs.jpca.0c01234".to_string(),
        }
    }

    /// Creates an `Unreadable` error for the given path.
    #[must_use]
    pub fn unreadable(path: &Path, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            source,
            suggestion: "Check the path passed with --input and its permissions".to_string(),
        }
    }
}
