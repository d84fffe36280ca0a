//! Browser session management.
//!
//! A [`Session`] owns one browser process and one browsing context, and keeps
//! a directory of the pages open in that context:
//!
//! - a **tag registry** mapping caller-chosen labels to page handles
//!   (the initial page is registered under the reserved tag `"default"`),
//! - a **current page** pointer updated by switch/close operations.
//!
//! The browser is launched lazily: every browser-dependent method runs an
//! explicit `ensure_started` guard first, so constructing a `Session` is
//! free and the process only appears on first use.
//!
//! The session is a single-threaded, sequential façade: methods take
//! `&mut self`, no operation overlaps another, and there is no locking
//! because there is no concurrent mutation to guard against. The page list
//! itself is always the browser's, so pages opened around the manager
//! (popups, `target=_blank`) show up in lookups and listings as untagged;
//! pages *closed* around the manager leave dangling registry entries, and
//! only [`Session::close_page`] prunes.
//!
//! # Example
//!
//! ```no_run
//! use multipage::{PageQuery, Session, SessionConfig};
//!
//! # async fn example() -> multipage::Result<()> {
//! let mut session = Session::open(SessionConfig::new().with_headless()).await?;
//!
//! session.goto("https://example.com").await?;
//! let shop = session.open_new_page("shop").await?;
//! shop.goto("https://shop.example.com").await?;
//!
//! for listing in session.list_pages().await? {
//!     println!("{listing}");
//! }
//!
//! session.switch_page(&PageQuery::tag("shop")).await?;
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

mod actions;
mod pages;

pub use pages::{PageInfo, PageListing};

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::target::TargetId;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::driver::{self, LaunchedBrowser};
use crate::error::Result;
use crate::registry::TagRegistry;

// ============================================================================
// Constants
// ============================================================================

/// Reserved tag for the initial page of a context.
pub const DEFAULT_TAG: &str = "default";

/// Sentinel shown for pages no tag points at.
pub const UNNAMED_TAG: &str = "unnamed";

// ============================================================================
// Types
// ============================================================================

/// Running-state of a session: browser process plus page directory.
///
/// The context's page list is the browser's own (`Browser::pages`), never a
/// shadow copy: pages the site opens (popups, `target=_blank`) are part of
/// the directory even though no tag points at them.
pub(crate) struct Launched {
    /// Browser process and its CDP event loop.
    pub driver: LaunchedBrowser,
    /// Tag → page identity registry.
    pub tags: TagRegistry<TargetId>,
    /// The active page, or `None` after the last page was closed.
    pub current: Option<Page>,
}

impl Launched {
    /// Launches the browser and registers the initial `"default"` page.
    ///
    /// Chrome opens with a blank tab; that tab is adopted as the default
    /// page and any extra launch-time tabs are closed, so the context
    /// starts with exactly one page.
    async fn start(config: &SessionConfig) -> Result<Self> {
        let driver = driver::launch(config).await?;

        let mut existing = driver.browser.pages().await?;
        let page = if existing.is_empty() {
            driver.browser.new_page("about:blank").await?
        } else {
            existing.remove(0)
        };
        for extra in existing {
            debug!("Closing extra launch-time tab");
            let _ = extra.close().await;
        }

        let mut tags = TagRegistry::new();
        tags.insert(DEFAULT_TAG, page.target_id().clone());

        info!(session = %driver.id, "Session started with initial '{DEFAULT_TAG}' page");

        Ok(Self {
            driver,
            tags,
            current: Some(page),
        })
    }

    /// Every open page in the context, in the browser's own order.
    pub(crate) async fn context_pages(&self) -> Result<Vec<Page>> {
        Ok(self.driver.browser.pages().await?)
    }
}

// ============================================================================
// Session
// ============================================================================

/// Multi-page browser session.
///
/// See the [module docs](self) for the model. Dropping a session without
/// calling [`close`](Session::close) leaves process shutdown to the
/// underlying automation library's process guard.
pub struct Session {
    /// Launch-time configuration.
    config: SessionConfig,
    /// `None` until the first browser-dependent call.
    state: Option<Launched>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("started", &self.state.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session - Lifecycle
// ============================================================================

impl Session {
    /// Creates a session without launching anything.
    ///
    /// The browser starts on the first browser-dependent call.
    #[inline]
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Creates a session and launches the browser immediately.
    ///
    /// The initial page is registered under [`DEFAULT_TAG`] and becomes the
    /// current page. Opening a second session does not close the first; the
    /// caller owns both processes.
    ///
    /// # Errors
    ///
    /// Launch failures are fatal and propagated unchanged — see
    /// [`Error::is_launch_error`].
    pub async fn open(config: SessionConfig) -> Result<Self> {
        let mut session = Self::new(config);
        session.ensure_started().await?;
        Ok(session)
    }

    /// Returns `true` once the browser has been launched.
    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    /// The launch-time configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of open pages in the context (0 when not started).
    pub async fn page_count(&self) -> Result<usize> {
        match &self.state {
            Some(launched) => Ok(launched.context_pages().await?.len()),
            None => Ok(0),
        }
    }

    /// The current page handle, if any page is open.
    #[inline]
    #[must_use]
    pub fn current_page(&self) -> Option<Page> {
        self.state.as_ref().and_then(|l| l.current.clone())
    }

    /// Launches the browser if it is not running yet.
    ///
    /// This is the explicit guard every browser-dependent method calls.
    pub(crate) async fn ensure_started(&mut self) -> Result<&mut Launched> {
        let launched = match self.state.take() {
            Some(launched) => launched,
            None => {
                info!("Browser not started; launching now");
                Launched::start(&self.config).await?
            }
        };
        Ok(self.state.insert(launched))
    }

    /// Resets the browsing context: closes every page, clears the registry
    /// and opens a fresh `"default"` page that becomes the current page.
    pub async fn reset_context(&mut self) -> Result<Page> {
        let launched = self.ensure_started().await?;

        for page in launched.context_pages().await? {
            if let Err(e) = page.close().await {
                warn!(error = %e, "Failed to close page during context reset");
            }
        }
        launched.tags.clear();

        let page = launched.driver.browser.new_page("about:blank").await?;
        launched.tags.insert(DEFAULT_TAG, page.target_id().clone());
        launched.current = Some(page.clone());

        info!("Context reset; fresh '{DEFAULT_TAG}' page opened");
        Ok(page)
    }

    /// Closes the session: browser process, event loop, registry.
    ///
    /// Safe to call on a never-started session or more than once; each
    /// resource is checked before release.
    pub async fn close(&mut self) -> Result<()> {
        let Some(mut launched) = self.state.take() else {
            info!("Session close: nothing to release");
            return Ok(());
        };

        launched.tags.clear();
        launched.current = None;

        if let Err(e) = launched.driver.browser.close().await {
            warn!(session = %launched.driver.id, error = %e, "Browser close failed");
        }
        // Grace period for the child processes to exit after the graceful
        // close, then force kill so no Chrome process outlives the session.
        sleep(Duration::from_millis(500)).await;
        let _ = launched.driver.browser.kill().await;
        launched.driver.handler_task.abort();

        info!(session = %launched.driver.id, "Session closed");
        Ok(())
    }

    /// Mutable borrow of the running state, if started.
    pub(crate) fn state_mut(&mut self) -> Option<&mut Launched> {
        self.state.as_mut()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::query::PageQuery;

    #[tokio::test]
    async fn test_new_session_is_lazy() {
        let session = Session::new(SessionConfig::new());
        assert!(!session.is_started());
        assert_eq!(session.page_count().await.unwrap(), 0);
        assert!(session.current_page().is_none());
    }

    #[test]
    fn test_debug_does_not_require_start() {
        let session = Session::new(SessionConfig::new().with_headless());
        let rendered = format!("{session:?}");
        assert!(rendered.contains("started: false"));
    }

    // The remaining tests exercise a live browser and are skipped by default.
    // Run with: cargo test -- --ignored

    fn live_config() -> SessionConfig {
        SessionConfig::new()
            .with_headless()
            .with_arg("--no-sandbox")
            .with_arg("--disable-popup-blocking")
            .with_timeout_ms(15_000)
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_open_registers_default_page() {
        let mut session = Session::open(live_config()).await.unwrap();

        assert!(session.is_started());
        assert_eq!(session.page_count().await.unwrap(), 1);

        let listings = session.list_pages().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].tag.as_deref(), Some(DEFAULT_TAG));

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_get_or_create_returns_same_page() {
        let mut session = Session::open(live_config()).await.unwrap();

        let first = session.open_new_page("shop").await.unwrap();
        let second = session.open_new_page("shop").await.unwrap();

        assert_eq!(first.target_id(), second.target_id());
        assert_eq!(session.page_count().await.unwrap(), 2);

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_two_tags_are_distinct_pages() {
        let mut session = Session::open(live_config()).await.unwrap();

        let a = session.open_new_page("a").await.unwrap();
        let b = session.open_new_page("b").await.unwrap();
        assert_ne!(a.target_id(), b.target_id());

        let found = session.find_page(&PageQuery::tag("a")).await.unwrap().unwrap();
        assert_eq!(found.target_id(), a.target_id());

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_close_default_leaves_tagged_page_current() {
        let mut session = Session::open(live_config()).await.unwrap();

        session.open_new_page("shop").await.unwrap();
        assert_eq!(session.list_pages().await.unwrap().len(), 2);

        let closed = session.close_page(&PageQuery::tag(DEFAULT_TAG)).await.unwrap();
        assert!(closed);

        let listings = session.list_pages().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].tag.as_deref(), Some("shop"));

        let current = session.current_page().unwrap();
        let shop = session.find_page(&PageQuery::tag("shop")).await.unwrap().unwrap();
        assert_eq!(current.target_id(), shop.target_id());

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_closing_last_page_empties_session() {
        let mut session = Session::open(live_config()).await.unwrap();

        let closed = session.close_page(&PageQuery::current()).await.unwrap();
        assert!(closed);
        assert!(session.current_page().is_none());
        assert!(session.list_pages().await.unwrap().is_empty());

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_close_page_no_match_returns_false() {
        let mut session = Session::open(live_config()).await.unwrap();

        let closed = session.close_page(&PageQuery::tag("nope")).await.unwrap();
        assert!(!closed);
        assert_eq!(session.page_count().await.unwrap(), 1);

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_switch_by_out_of_bounds_index_keeps_current() {
        let mut session = Session::open(live_config()).await.unwrap();
        let before = session.current_page().unwrap();

        let result = session.switch_page(&PageQuery::index(9)).await.unwrap();
        assert!(result.is_none());

        let after = session.current_page().unwrap();
        assert_eq!(before.target_id(), after.target_id());

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_site_opened_popup_is_listed_unnamed() {
        let mut session = Session::open(live_config()).await.unwrap();

        let page = session.current_page().unwrap();
        page.goto("https://example.com").await.unwrap();
        page.evaluate("window.open('https://example.com/', '_blank')")
            .await
            .unwrap();
        sleep(Duration::from_millis(500)).await;

        // The popup never went through open_new_page, yet it is part of
        // the context and must be visible to listing and index lookup.
        let listings = session.list_pages().await.unwrap();
        assert_eq!(listings.len(), 2);
        assert!(listings.iter().any(|l| l.tag.is_none()));
        assert!(listings.iter().any(|l| l.tag_or_unnamed() == UNNAMED_TAG));

        let popup = session.find_page(&PageQuery::index(1)).await.unwrap();
        assert!(popup.is_some());

        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chromium install"]
    async fn test_close_is_idempotent_and_safe_unstarted() {
        let mut fresh = Session::new(live_config());
        fresh.close().await.unwrap();

        let mut session = Session::open(live_config()).await.unwrap();
        session.close().await.unwrap();
        session.close().await.unwrap();
    }
}
