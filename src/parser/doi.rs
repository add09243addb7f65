//! DOI identifiers as read from the input list.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::error::InputError;

/// An opaque, non-empty DOI string.
///
/// Ordering is plain lexicographic ordering of the string, which is what
/// range selection sorts by. Prefix checks on an identifier are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Builds an identifier from one input line.
    ///
    /// Only surrounding whitespace is removed; the rest of the line is kept
    /// verbatim, so sorting and routing see exactly what the list contains.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyIdentifier`] if the line is blank.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(InputError::empty(raw));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier starts with `prefix` (case-sensitive).
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parses a newline-delimited identifier list.
///
/// Blank lines are skipped. Input order is preserved; sorting happens at
/// range selection.
#[must_use]
pub fn parse_identifier_list(text: &str) -> Vec<Identifier> {
    text.lines()
        .filter_map(|line| match Identifier::parse(line) {
            Ok(id) => Some(id),
            Err(error) => {
                trace!(error = %error, "skipping blank identifier line");
                None
            }
        })
        .collect()
}
