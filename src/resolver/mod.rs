//! Identifier resolution: DOI in, rendered landing page out.
//!
//! # Architecture
//!
//! - [`Route`] - Per-identifier variant chosen by DOI prefix
//! - [`Renderer`] - Async trait for anything that can open a page for a URL
//! - [`RenderedPage`] - An open page: content snapshot, DOM query, close
//! - [`ChromeRenderer`] - Headless Chromium implementation of [`Renderer`]
//! - [`IdentifierResolver`] - Routes an identifier and opens its landing page
//!
//! # Example
//!
//! ```no_run
//! use suppinfo_core::parser::Identifier;
//! use suppinfo_core::resolver::{BrowserOptions, ChromeRenderer, IdentifierResolver, Route};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = ChromeRenderer::launch(&BrowserOptions::default()).await?;
//! let resolver = IdentifierResolver::new(Box::new(renderer));
//!
//! let id = Identifier::parse("10.1021/acs.jpca.0c01234")?;
//! let page = resolver.open(&id, Route::for_identifier(&id)).await?;
//! let snapshot = page.snapshot().await?;
//! println!("landed on {}", snapshot.final_url);
//! page.close().await?;
//! resolver.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod browser;
mod error;
mod route;
pub(crate) mod utils;

pub use browser::{BrowserOptions, ChromeRenderer};
pub use error::ResolveError;
pub use route::{
    DEFAULT_DOI_BASE_URL, DEFAULT_PUBLISHER_BASE_URL, Endpoints, PUBLISHER_SUPPLEMENT_PREFIX,
    Route, SETTLED_DOI_PREFIX,
};

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::parser::Identifier;

/// When a freshly navigated page counts as ready for capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Ready once the navigation's load event fired
    Load,
    /// Ready once the main frame reports no network activity
    NetworkIdle,
}

/// Rendered content of a landing page plus the URL it ended up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Serialized DOM after rendering
    pub content: String,
    /// Final URL after redirects; base for relative links
    pub final_url: Url,
}

impl PageSnapshot {
    /// Creates a snapshot, validating that `final_url` is an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidFinalUrl`] if `final_url` does not parse.
    pub fn new(content: impl Into<String>, final_url: &str) -> Result<Self, ResolveError> {
        let final_url = Url::parse(final_url)
            .map_err(|error| ResolveError::invalid_final_url(final_url, &error.to_string()))?;
        Ok(Self {
            content: content.into(),
            final_url,
        })
    }
}

/// An open, rendered page.
///
/// Implementations hold one browser tab; callers must call [`RenderedPage::close`]
/// once they are done with it.
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// Captures the current DOM and the final URL.
    async fn snapshot(&self) -> Result<PageSnapshot, ResolveError>;

    /// Returns the resolved `href` property of every element carrying an `href`
    /// attribute, as computed by the renderer (already absolute).
    async fn query_hrefs(&self) -> Result<Vec<String>, ResolveError>;

    /// Closes the page and releases its tab.
    async fn close(&self) -> Result<(), ResolveError>;
}

/// Something that can open rendered pages.
///
/// Uses `async_trait` so the pipeline can hold a `Box<dyn Renderer>` and tests can
/// substitute in-memory renderers.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Returns the renderer's name for logging.
    fn name(&self) -> &str;

    /// Opens a new page at `url` and waits per `wait`.
    ///
    /// On error no page is left open.
    async fn open(&self, url: &str, wait: WaitPolicy)
    -> Result<Box<dyn RenderedPage>, ResolveError>;

    /// Releases renderer-wide resources (the browser process).
    async fn shutdown(&self) -> Result<(), ResolveError> {
        Ok(())
    }
}

/// Opens landing pages for identifiers.
pub struct IdentifierResolver {
    renderer: Box<dyn Renderer>,
    endpoints: Endpoints,
}

impl IdentifierResolver {
    /// Creates a resolver with the default DOI and publisher endpoints.
    #[must_use]
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self::with_endpoints(renderer, Endpoints::default())
    }

    /// Creates a resolver with custom endpoints (used by tests and config overrides).
    #[must_use]
    pub fn with_endpoints(renderer: Box<dyn Renderer>, endpoints: Endpoints) -> Self {
        Self {
            renderer,
            endpoints,
        }
    }

    /// Opens the landing page for `id` following `route`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the renderer cannot open or navigate the page.
    #[tracing::instrument(skip(self, id), fields(renderer = self.renderer.name(), id = %id))]
    pub async fn open(
        &self,
        id: &Identifier,
        route: Route,
    ) -> Result<Box<dyn RenderedPage>, ResolveError> {
        let url = route.landing_url(id, &self.endpoints);
        debug!(url = %url, route = %route, "Opening landing page");
        self.renderer.open(&url, route.wait_policy()).await
    }

    /// Shuts down the underlying renderer.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the renderer fails to shut down cleanly.
    pub async fn shutdown(&self) -> Result<(), ResolveError> {
        self.renderer.shutdown().await
    }
}

impl std::fmt::Debug for IdentifierResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierResolver")
            .field("renderer", &self.renderer.name())
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
