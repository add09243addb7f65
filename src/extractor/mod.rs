//! Link extraction from rendered landing pages.
//!
//! Two interchangeable strategies implement [`LinkExtractor`]:
//!
//! - [`DomQueryExtractor`] - reads renderer-resolved `href` properties from the
//!   live page and keeps direct document URLs (suffix match, no query string)
//! - [`StaticContentExtractor`] - parses the captured HTML, keeps anchors passing
//!   [`is_valid_link`], and normalizes them against the page's final URL
//!
//! [`extractor_for`] picks the strategy from the same [`Route`] that drove
//! resolution.

mod links;

pub use links::{collect_anchor_hrefs, is_document_url, is_valid_link, normalize_href};

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::resolver::{PageSnapshot, RenderedPage, ResolveError, Route};

/// Deduplicated document links for one identifier, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    /// Creates an empty link set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link; returns false if an identical link was already present.
    pub fn insert(&mut self, link: impl Into<String>) -> bool {
        let link = link.into();
        if self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.links.push(link);
        true
    }

    /// Returns the number of distinct links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if no links were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates over the links.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    /// Returns the links as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.links
    }
}

impl<S: Into<String>> FromIterator<S> for LinkSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for link in iter {
            set.insert(link);
        }
        set
    }
}

impl Serialize for LinkSet {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(&self.links)
    }
}

/// A strategy that turns an open page into a [`LinkSet`].
#[async_trait]
pub trait LinkExtractor: Send + Sync {
    /// Returns the strategy name for logging.
    fn name(&self) -> &str;

    /// Extracts document links from the page.
    async fn extract(&self, page: &dyn RenderedPage) -> Result<LinkSet, ResolveError>;
}

/// Returns the extraction strategy matching `route`.
#[must_use]
pub fn extractor_for(route: Route) -> Box<dyn LinkExtractor> {
    match route {
        Route::SettledDoi => Box::new(DomQueryExtractor),
        Route::Doi | Route::PublisherSupplement => Box::new(StaticContentExtractor),
    }
}

/// Reads resolved `href` properties from the live DOM.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomQueryExtractor;

#[async_trait]
impl LinkExtractor for DomQueryExtractor {
    fn name(&self) -> &'static str {
        "dom-query"
    }

    #[tracing::instrument(skip(self, page), fields(extractor = "dom-query"))]
    async fn extract(&self, page: &dyn RenderedPage) -> Result<LinkSet, ResolveError> {
        let hrefs = page.query_hrefs().await?;
        let total = hrefs.len();
        let links: LinkSet = hrefs.into_iter().filter(|href| is_document_url(href)).collect();
        debug!(candidates = total, kept = links.len(), "DOM query filtered");
        Ok(links)
    }
}

/// Parses captured HTML for anchor links.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticContentExtractor;

impl StaticContentExtractor {
    /// Extracts links from an already captured snapshot.
    #[must_use]
    pub fn extract_from_snapshot(snapshot: &PageSnapshot) -> LinkSet {
        let hrefs = collect_anchor_hrefs(&snapshot.content);
        let total = hrefs.len();
        let links: LinkSet = hrefs
            .iter()
            .filter(|href| is_valid_link(href))
            .map(|href| normalize_href(href, &snapshot.final_url))
            .collect();
        debug!(
            final_url = %snapshot.final_url,
            anchors = total,
            kept = links.len(),
            "Static content filtered"
        );
        links
    }
}

#[async_trait]
impl LinkExtractor for StaticContentExtractor {
    fn name(&self) -> &'static str {
        "static-content"
    }

    #[tracing::instrument(skip(self, page), fields(extractor = "static-content"))]
    async fn extract(&self, page: &dyn RenderedPage) -> Result<LinkSet, ResolveError> {
        let snapshot = page.snapshot().await?;
        Ok(Self::extract_from_snapshot(&snapshot))
    }
}
