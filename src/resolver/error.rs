//! Error types for resolving identifiers into rendered pages.
//!
//! Messages follow the What/Why/Fix pattern used across the project.

use thiserror::Error;

/// Errors that can occur while rendering a landing page or capturing from it.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The headless browser could not be configured or started
    #[error("browser launch failed: {reason}\n  Suggestion: {suggestion}")]
    BrowserLaunch {
        /// Why the launch failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// Opening a tab or navigating it to the landing URL failed
    #[error("navigation to '{url}' failed: {reason}\n  Suggestion: {suggestion}")]
    NavigationFailed {
        /// The landing URL being opened
        url: String,
        /// Why navigation failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// Reading content, URL or DOM state from a rendered page failed
    #[error("capture from '{url}' failed: {reason}\n  Suggestion: {suggestion}")]
    CaptureFailed {
        /// The page the capture was attempted on
        url: String,
        /// Why capture failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The renderer reported a final URL that is not an absolute URL
    #[error(
        "rendered page reported an unusable final URL '{url}': {reason}\n  Suggestion: Check whether the landing page redirects to a non-web scheme"
    )]
    InvalidFinalUrl {
        /// The URL reported by the renderer
        url: String,
        /// Why it could not be used as a base URL
        reason: String,
    },
}

impl ResolveError {
    /// Creates a `BrowserLaunch` error.
    #[must_use]
    pub fn browser_launch(reason: &str) -> Self {
        Self::BrowserLaunch {
            reason: reason.to_string(),
            suggestion: "Install Chromium/Chrome or pass its path with --browser".to_string(),
        }
    }

    /// Creates a `NavigationFailed` error.
    #[must_use]
    pub fn navigation_failed(url: &str, reason: &str) -> Self {
        Self::NavigationFailed {
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "Check network access and whether the DOI resolves in a browser"
                .to_string(),
        }
    }

    /// Creates a `CaptureFailed` error.
    #[must_use]
    pub fn capture_failed(url: &str, reason: &str) -> Self {
        Self::CaptureFailed {
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "The page may have closed or crashed; rerun this identifier".to_string(),
        }
    }

    /// Creates an `InvalidFinalUrl` error.
    #[must_use]
    pub fn invalid_final_url(url: &str, reason: &str) -> Self {
        Self::InvalidFinalUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
