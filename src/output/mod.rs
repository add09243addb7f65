//! Persistence of the identifier to links mapping as YAML.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::gather::ResultMapping;

/// File extension of the output artifact.
pub const OUTPUT_EXTENSION: &str = "yaml";

/// Errors that can occur while writing the output artifact.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The mapping could not be serialized
    #[error("cannot serialize link mapping: {source}")]
    Serialize {
        /// Underlying serializer error
        #[source]
        source: serde_yaml::Error,
    },

    /// The output file or its directory could not be written
    #[error("cannot write '{}': {source}\n  Suggestion: {suggestion}", path.display())]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// How to fix the issue
        suggestion: String,
    },
}

impl OutputError {
    /// Creates an `Io` error for `path`.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
            suggestion: "Check that --output-dir points to a writable directory".to_string(),
        }
    }
}

/// Returns the artifact path for `name` inside `dir`.
#[must_use]
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{OUTPUT_EXTENSION}"))
}

/// Writes `mapping` to `{dir}/{name}.yaml`, replacing any existing file.
///
/// Keys are written in insertion order. `dir` is created if missing.
///
/// # Errors
///
/// Returns [`OutputError`] if serialization fails or the file cannot be written.
#[tracing::instrument(skip(mapping, dir), fields(dir = %dir.display(), entries = mapping.len()))]
pub fn write_link_mapping(
    mapping: &ResultMapping,
    dir: &Path,
    name: &str,
) -> Result<PathBuf, OutputError> {
    let yaml = serde_yaml::to_string(mapping).map_err(|source| OutputError::Serialize { source })?;

    fs::create_dir_all(dir).map_err(|source| OutputError::io(dir, source))?;
    let path = output_path(dir, name);
    fs::write(&path, yaml).map_err(|source| OutputError::io(&path, source))?;

    info!(path = %path.display(), "Link mapping written");
    Ok(path)
}
