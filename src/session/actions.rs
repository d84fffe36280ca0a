//! Operations on the current page: navigation, element actions, waits.
//!
//! Failures here are the recoverable class: each step logs the selector and
//! attempted value, then propagates, so a caller iterating a batch decides
//! whether to skip the item or abort.

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Element, Page};
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info};
use url::Url;

use crate::error::{Error, Result};

use super::Session;

// ============================================================================
// Constants
// ============================================================================

/// Poll interval for selector-appearance waits.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// Helpers
// ============================================================================

/// Prefixes `http://` when no scheme is present, mirroring how the manager
/// has always treated bare hostnames.
fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

// ============================================================================
// Session - Page Actions
// ============================================================================

impl Session {
    /// The current page, starting the browser first if needed.
    async fn page(&mut self) -> Result<Page> {
        self.ensure_started().await?;
        self.current_page().ok_or(Error::NoCurrentPage)
    }

    /// Navigates the current page to `url` and waits for the load to settle.
    ///
    /// Bare hostnames get an `http://` prefix; anything else unparseable is
    /// a [`Error::Navigation`].
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        let full = normalize_url(url);
        let parsed = Url::parse(&full).map_err(|e| {
            error!(url = %full, error = %e, "Refusing to navigate to unparseable URL");
            Error::navigation(&full, e.to_string())
        })?;

        let page = self.page().await?;
        page.goto(parsed.as_str()).await.map_err(|e| {
            error!(url = %parsed, error = %e, "Navigation failed");
            Error::navigation(parsed.as_str(), e.to_string())
        })?;
        page.wait_for_navigation().await.map_err(|e| {
            error!(url = %parsed, error = %e, "Load did not settle");
            Error::navigation(parsed.as_str(), e.to_string())
        })?;

        info!(url = %parsed, "Navigated");
        Ok(())
    }

    /// Clicks the first element matching `selector`.
    pub async fn click(&mut self, selector: &str) -> Result<()> {
        let page = self.page().await?;

        let element = page.find_element(selector).await.map_err(|e| {
            error!(selector, error = %e, "Click target not found");
            Error::action("click", selector, e.to_string())
        })?;
        element.click().await.map_err(|e| {
            error!(selector, error = %e, "Click failed");
            Error::action("click", selector, e.to_string())
        })?;

        debug!(selector, "Clicked");
        Ok(())
    }

    /// Fills the input matching `selector` with `text`, replacing any
    /// existing value and firing `input`/`change` events.
    pub async fn fill(&mut self, selector: &str, text: &str) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                el.focus();
                el.value = {val};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            sel = serde_json::to_string(selector)?,
            val = serde_json::to_string(text)?,
        );

        let page = self.page().await?;
        let result = page.evaluate(script).await.map_err(|e| {
            error!(selector, value = text, error = %e, "Fill failed");
            Error::action("fill", selector, e.to_string())
        })?;
        let found: bool = result
            .into_value()
            .map_err(|e| Error::action("fill", selector, e.to_string()))?;

        if !found {
            error!(selector, value = text, "Fill target not found");
            return Err(Error::action("fill", selector, "no element matched"));
        }

        debug!(selector, value = text, "Filled");
        Ok(())
    }

    /// Inner text of the first element matching `selector`.
    pub async fn inner_text(&mut self, selector: &str) -> Result<String> {
        let page = self.page().await?;

        let element = page.find_element(selector).await.map_err(|e| {
            error!(selector, error = %e, "Text target not found");
            Error::action("inner_text", selector, e.to_string())
        })?;
        let text = element.inner_text().await.map_err(|e| {
            error!(selector, error = %e, "Reading text failed");
            Error::action("inner_text", selector, e.to_string())
        })?;

        Ok(text.unwrap_or_default())
    }

    /// Drives the checkbox (or radio button) matching `selector` to
    /// `checked`, clicking only when the state actually differs.
    pub async fn set_checkbox(&mut self, selector: &str, checked: bool) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return 'missing';
                if (el.checked !== {checked}) {{ el.click(); return 'toggled'; }}
                return 'unchanged';
            }})()"#,
            sel = serde_json::to_string(selector)?,
        );

        let page = self.page().await?;
        let result = page.evaluate(script).await.map_err(|e| {
            error!(selector, checked, error = %e, "Checkbox update failed");
            Error::action("set_checkbox", selector, e.to_string())
        })?;
        let outcome: String = result
            .into_value()
            .map_err(|e| Error::action("set_checkbox", selector, e.to_string()))?;

        if outcome == "missing" {
            error!(selector, "Checkbox not found");
            return Err(Error::action("set_checkbox", selector, "no element matched"));
        }

        debug!(selector, checked, outcome = %outcome, "Checkbox updated");
        Ok(())
    }

    /// Selects the `<option>` whose label (or trimmed text) equals `label`
    /// in the `<select>` matching `selector`.
    pub async fn select_option(&mut self, selector: &str, label: &str) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                const wanted = {val};
                const opt = Array.from(el.options)
                    .find(o => o.label === wanted || o.textContent.trim() === wanted);
                if (!opt) return false;
                el.value = opt.value;
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            sel = serde_json::to_string(selector)?,
            val = serde_json::to_string(label)?,
        );

        let page = self.page().await?;
        let result = page.evaluate(script).await.map_err(|e| {
            error!(selector, label, error = %e, "Select failed");
            Error::action("select_option", selector, e.to_string())
        })?;
        let found: bool = result
            .into_value()
            .map_err(|e| Error::action("select_option", selector, e.to_string()))?;

        if !found {
            error!(selector, label, "Select or option not found");
            return Err(Error::action("select_option", selector, "no option matched"));
        }

        debug!(selector, label, "Option selected");
        Ok(())
    }

    /// Waits for `selector` to appear on the current page, polling until
    /// `timeout` (the configured default when `None`).
    pub async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Option<Duration>,
    ) -> Result<Element> {
        let timeout = timeout.unwrap_or(Duration::from_millis(self.config.timeout_ms));
        let page = self.page().await?;
        let deadline = Instant::now() + timeout;

        loop {
            if let Ok(element) = page.find_element(selector).await {
                debug!(selector, "Selector appeared");
                return Ok(element);
            }
            if Instant::now() >= deadline {
                error!(selector, timeout_ms = timeout.as_millis() as u64, "Selector never appeared");
                return Err(Error::timeout(
                    format!("wait_for_selector {selector}"),
                    timeout.as_millis() as u64,
                ));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Saves a full-page PNG screenshot of the current page to `path`.
    pub async fn screenshot(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let page = self.page().await?;
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        page.save_screenshot(params, path.as_ref()).await?;
        info!(path = %path.as_ref().display(), "Screenshot saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
