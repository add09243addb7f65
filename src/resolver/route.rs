//! Identifier routing: which landing URL to open and how to wait for it.

use std::fmt;

use crate::parser::Identifier;

use super::utils::join_url;
use super::WaitPolicy;

/// Default DOI redirect service.
pub const DEFAULT_DOI_BASE_URL: &str = "https://doi.org";
/// Default host for the `10.31635` (CCS Chemistry) supplementary-materials pages.
pub const DEFAULT_PUBLISHER_BASE_URL: &str = "https://www.chinesechemsoc.org";

/// Elsevier prefix; landing pages build their link lists client-side.
pub const SETTLED_DOI_PREFIX: &str = "10.1016";
/// CCS Chemistry prefix; supplementary files live on a dedicated page.
pub const PUBLISHER_SUPPLEMENT_PREFIX: &str = "10.31635";

/// Base URLs used to build landing URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// DOI redirect service base (`https://doi.org`)
    pub doi_base_url: String,
    /// Publisher host base for supplementary-materials pages
    pub publisher_base_url: String,
}

impl Endpoints {
    /// Creates endpoints from explicit base URLs (used by tests and config overrides).
    #[must_use]
    pub fn new(doi_base_url: impl Into<String>, publisher_base_url: impl Into<String>) -> Self {
        Self {
            doi_base_url: doi_base_url.into(),
            publisher_base_url: publisher_base_url.into(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_DOI_BASE_URL, DEFAULT_PUBLISHER_BASE_URL)
    }
}

/// Per-identifier variant, decided once and shared by resolution and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Plain DOI redirect, captured as soon as the page has loaded
    Doi,
    /// DOI redirect whose page is captured after network activity settles;
    /// links are read from the live DOM
    SettledDoi,
    /// Publisher supplementary-materials page (`/doi/suppl/{id}`)
    PublisherSupplement,
}

impl Route {
    /// Selects the route for an identifier by case-sensitive prefix.
    #[must_use]
    pub fn for_identifier(id: &Identifier) -> Self {
        if id.has_prefix(SETTLED_DOI_PREFIX) {
            Self::SettledDoi
        } else if id.has_prefix(PUBLISHER_SUPPLEMENT_PREFIX) {
            Self::PublisherSupplement
        } else {
            Self::Doi
        }
    }

    /// Returns the URL the browser tab navigates to.
    #[must_use]
    pub fn landing_url(self, id: &Identifier, endpoints: &Endpoints) -> String {
        match self {
            Self::Doi | Self::SettledDoi => join_url(&endpoints.doi_base_url, id.as_str()),
            Self::PublisherSupplement => join_url(
                &endpoints.publisher_base_url,
                &format!("doi/suppl/{}", id.as_str()),
            ),
        }
    }

    /// Returns how long the renderer waits before the page counts as ready.
    #[must_use]
    pub fn wait_policy(self) -> WaitPolicy {
        match self {
            Self::SettledDoi => WaitPolicy::NetworkIdle,
            Self::Doi | Self::PublisherSupplement => WaitPolicy::Load,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doi => write!(f, "doi"),
            Self::SettledDoi => write!(f, "doi-settled"),
            Self::PublisherSupplement => write!(f, "publisher-suppl"),
        }
    }
}
