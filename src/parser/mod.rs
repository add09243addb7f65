//! Input parsing for the identifier list.
//!
//! The input is a newline-delimited file of DOIs. Each non-blank line becomes
//! one [`Identifier`].
//!
//! # Example
//!
//! ```
//! use suppinfo_core::parser::parse_identifier_list;
//!
//! let ids = parse_identifier_list("10.1021/a\n\n  10.1016/b \n");
//! assert_eq!(ids.len(), 2);
//! assert_eq!(ids[1].as_str(), "10.1016/b");
//! ```

mod doi;
mod error;

pub use doi::{Identifier, parse_identifier_list};
pub use error::InputError;

use std::fs;
use std::path::Path;

use tracing::{debug, info};

/// Reads and parses the identifier list at `path`.
///
/// # Errors
///
/// Returns [`InputError::Unreadable`] if the file cannot be read.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn read_identifier_file(path: &Path) -> Result<Vec<Identifier>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::unreadable(path, source))?;
    debug!(bytes = text.len(), "identifier list read");

    let ids = parse_identifier_list(&text);
    info!(count = ids.len(), "Parsed identifier list");
    Ok(ids)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_identifier_file_reads_all_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10.1/c").unwrap();
        writeln!(file, "10.1/a").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "10.1/b").unwrap();

        let ids = read_identifier_file(file.path()).unwrap();
        let values: Vec<&str> = ids.iter().map(Identifier::as_str).collect();
        assert_eq!(values, ["10.1/c", "10.1/a", "10.1/b"]);
    }

    #[test]
    fn test_read_identifier_file_missing_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_identifier_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(InputError::Unreadable { .. })));
    }
}
