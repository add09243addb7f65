//! Headless Chromium renderer built on `chromiumoxide`.
//!
//! One browser process serves the whole run. Every [`Renderer::open`] call
//! creates a fresh tab; the tab is closed by [`RenderedPage::close`], or by
//! `open` itself when navigation fails.

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::EventLifecycleEvent;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::{PageSnapshot, RenderedPage, Renderer, ResolveError, WaitPolicy};

/// Lifecycle event marking the start of a new document in a frame.
const LIFECYCLE_INIT: &str = "init";
/// Lifecycle event fired once a frame has had no network activity for 500ms.
const LIFECYCLE_NETWORK_IDLE: &str = "networkIdle";

/// Collects `href` properties of all elements with an `href` attribute.
///
/// SVG anchors expose `href` as an animated string object, so only plain strings
/// are kept.
const QUERY_HREFS_JS: &str = r"Array.from(document.querySelectorAll('[href]'))
    .map((el) => el.href)
    .filter((href) => typeof href === 'string')";

const LAUNCH_ARGS: &[&str] = &["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"];

/// Browser launch options.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Path to a Chromium/Chrome executable; auto-detected when `None`
    pub executable: Option<PathBuf>,
    /// Run without a visible window
    pub headless: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
        }
    }
}

/// A [`Renderer`] backed by a single Chromium instance.
pub struct ChromeRenderer {
    browser: Mutex<Browser>,
    handler: Mutex<Option<JoinHandle<()>>>,
}

impl ChromeRenderer {
    /// Launches the browser and starts polling its event handler.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::BrowserLaunch`] if the configuration is invalid or the
    /// process cannot be started.
    #[tracing::instrument(fields(renderer = "chrome"))]
    pub async fn launch(options: &BrowserOptions) -> Result<Self, ResolveError> {
        let mut builder = BrowserConfig::builder().args(LAUNCH_ARGS.iter().copied());
        builder = if options.headless {
            builder.new_headless_mode()
        } else {
            builder.with_head()
        };
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder
            .build()
            .map_err(|reason| ResolveError::browser_launch(&reason))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|error| ResolveError::browser_launch(&error.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(error) = event {
                    trace!(error = %error, "browser handler event error");
                }
            }
            debug!("browser handler finished");
        });

        info!(headless = options.headless, "Browser launched");
        Ok(Self {
            browser: Mutex::new(browser),
            handler: Mutex::new(Some(handler)),
        })
    }
}

impl std::fmt::Debug for ChromeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeRenderer").finish_non_exhaustive()
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    fn name(&self) -> &'static str {
        "chrome"
    }

    #[tracing::instrument(skip(self), fields(renderer = "chrome"))]
    async fn open(
        &self,
        url: &str,
        wait: WaitPolicy,
    ) -> Result<Box<dyn RenderedPage>, ResolveError> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .map_err(|error| ResolveError::navigation_failed(url, &error.to_string()))?;

        match navigate(&page, url, wait).await {
            Ok(()) => Ok(Box::new(ChromePage {
                page,
                requested_url: url.to_string(),
            })),
            Err(error) => {
                if let Err(close_error) = page.close().await {
                    warn!(error = %close_error, "Failed to close tab after navigation error");
                }
                Err(error)
            }
        }
    }

    async fn shutdown(&self) -> Result<(), ResolveError> {
        let mut browser = self.browser.lock().await;
        if let Err(error) = browser.close().await {
            warn!(error = %error, "Browser did not acknowledge close");
        }
        if let Err(error) = browser.wait().await {
            warn!(error = %error, "Waiting for browser exit failed");
        }
        if let Some(handler) = self.handler.lock().await.take() {
            let _ = handler.await;
        }
        info!("Browser closed");
        Ok(())
    }
}

/// Navigates `page` to `url` and waits according to `wait`.
async fn navigate(page: &Page, url: &str, wait: WaitPolicy) -> Result<(), ResolveError> {
    let nav_error = |error: chromiumoxide::error::CdpError| {
        ResolveError::navigation_failed(url, &error.to_string())
    };

    match wait {
        WaitPolicy::Load => {
            page.goto(url).await.map_err(nav_error)?;
        }
        WaitPolicy::NetworkIdle => {
            // Subscribe before navigating so no lifecycle event is missed.
            let main_frame = page.mainframe().await.map_err(nav_error)?;
            let mut lifecycle = page
                .event_listener::<EventLifecycleEvent>()
                .await
                .map_err(nav_error)?;
            page.goto(url).await.map_err(nav_error)?;

            // Track the newest document in the main frame so idle events from
            // about:blank or a replaced document are ignored.
            let mut current_loader = None;
            while let Some(event) = lifecycle.next().await {
                if main_frame.as_ref().is_some_and(|frame| *frame != event.frame_id) {
                    continue;
                }
                if event.name == LIFECYCLE_INIT {
                    current_loader = Some(event.loader_id.clone());
                } else if event.name == LIFECYCLE_NETWORK_IDLE
                    && current_loader.as_ref() == Some(&event.loader_id)
                {
                    debug!(url, "network idle");
                    break;
                }
            }
        }
    }

    Ok(())
}

/// One open Chromium tab.
struct ChromePage {
    page: Page,
    requested_url: String,
}

#[async_trait]
impl RenderedPage for ChromePage {
    async fn snapshot(&self) -> Result<PageSnapshot, ResolveError> {
        let content = self
            .page
            .content()
            .await
            .map_err(|error| ResolveError::capture_failed(&self.requested_url, &error.to_string()))?;
        let final_url = self
            .page
            .url()
            .await
            .map_err(|error| ResolveError::capture_failed(&self.requested_url, &error.to_string()))?
            .unwrap_or_else(|| self.requested_url.clone());

        trace!(final_url = %final_url, bytes = content.len(), "page captured");
        PageSnapshot::new(content, &final_url)
    }

    async fn query_hrefs(&self) -> Result<Vec<String>, ResolveError> {
        let evaluation = self
            .page
            .evaluate(QUERY_HREFS_JS)
            .await
            .map_err(|error| ResolveError::capture_failed(&self.requested_url, &error.to_string()))?;
        evaluation
            .into_value::<Vec<String>>()
            .map_err(|error| ResolveError::capture_failed(&self.requested_url, &error.to_string()))
    }

    async fn close(&self) -> Result<(), ResolveError> {
        self.page
            .clone()
            .close()
            .await
            .map_err(|error| ResolveError::capture_failed(&self.requested_url, &error.to_string()))
    }
}
