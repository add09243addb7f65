//! Run configuration for the link gatherer.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::resolver::{BrowserOptions, Endpoints};

/// Default identifier list file.
pub const DEFAULT_INPUT_FILE: &str = "all_reference_dois.txt";

/// Errors found while validating a [`GatherConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A base URL is not an absolute http(s) URL
    #[error("invalid {field} '{value}': {reason}\n  Suggestion: {suggestion}")]
    InvalidBaseUrl {
        /// Which setting is wrong
        field: &'static str,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// A required path is empty
    #[error("{field} must not be empty\n  Suggestion: {suggestion}")]
    EmptyPath {
        /// Which setting is empty
        field: &'static str,
        /// How to fix the issue
        suggestion: String,
    },
}

impl ConfigError {
    fn invalid_base_url(field: &'static str, value: &str, reason: &str) -> Self {
        Self::InvalidBaseUrl {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
            suggestion: "Use an absolute URL such as https://doi.org".to_string(),
        }
    }
}

/// Settings for one gathering run.
#[derive(Debug, Clone)]
pub struct GatherConfig {
    /// Newline-delimited identifier list
    pub input_path: PathBuf,
    /// Directory receiving the YAML mapping
    pub output_dir: PathBuf,
    /// DOI and publisher base URLs
    pub endpoints: Endpoints,
    /// Browser executable and window mode
    pub browser: BrowserOptions,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            endpoints: Endpoints::default(),
            browser: BrowserOptions::default(),
        }
    }
}

impl GatherConfig {
    /// Checks paths and base URLs.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath {
                field: "input path",
                suggestion: "Pass an identifier list with --input".to_string(),
            });
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath {
                field: "output directory",
                suggestion: "Pass a directory with --output-dir".to_string(),
            });
        }
        validate_base_url("DOI base URL", &self.endpoints.doi_base_url)?;
        validate_base_url("publisher base URL", &self.endpoints.publisher_base_url)?;
        Ok(())
    }
}

fn validate_base_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|error| ConfigError::invalid_base_url(field, value, &error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_base_url(
            field,
            value,
            "scheme must be http or https",
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::invalid_base_url(field, value, "missing host"));
    }
    Ok(())
}
