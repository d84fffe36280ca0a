//! Browser process launch and CDP event-loop ownership.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use futures_util::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{BrowserKind, SessionConfig};
use crate::error::{Error, Result};

use super::chrome::find_executable;

// ============================================================================
// LaunchedBrowser
// ============================================================================

/// A running browser process together with its CDP event loop.
///
/// The event handler runs on a background task for the lifetime of the
/// process; when the handler stream ends the browser has disconnected.
pub(crate) struct LaunchedBrowser {
    /// Identifier used to correlate log lines for this process.
    pub id: Uuid,
    /// Handle to the browser process.
    pub browser: Browser,
    /// Background task driving the CDP message loop.
    pub handler_task: JoinHandle<()>,
    /// Profile directory; removed from disk when the session is dropped.
    _user_data_dir: TempDir,
}

// ============================================================================
// Launch
// ============================================================================

/// Launches a browser process for the given configuration.
///
/// # Errors
///
/// - [`Error::UnsupportedBrowser`] for non-Chromium engines
/// - [`Error::BrowserNotFound`] when the channel has no installed executable
/// - [`Error::Launch`] when the process fails to start
pub(crate) async fn launch(config: &SessionConfig) -> Result<LaunchedBrowser> {
    if config.browser_type != BrowserKind::Chromium {
        return Err(Error::unsupported_browser(config.browser_type.to_string()));
    }

    let executable = find_executable(config.channel)
        .ok_or_else(|| Error::browser_not_found(config.channel.to_string()))?;

    let user_data_dir = TempDir::with_prefix("multipage-profile-")?;

    let mut builder = BrowserConfig::builder()
        .chrome_executable(&executable)
        .user_data_dir(user_data_dir.path())
        .request_timeout(Duration::from_millis(config.timeout_ms))
        .args(config.browser_args.iter().cloned());

    // Modern Chrome needs --headless=new for a usable headless session.
    builder = if config.headless {
        builder.headless_mode(HeadlessMode::New)
    } else {
        builder.with_head()
    };

    let browser_config = builder.build().map_err(Error::launch)?;

    info!(
        channel = %config.channel,
        headless = config.headless,
        executable = %executable.display(),
        "Launching browser"
    );

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .map_err(|e| Error::launch(e.to_string()))?;

    let id = Uuid::new_v4();

    // When the handler stream ends the process is gone; nothing to restart.
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                debug!(session = %id, error = %e, "CDP handler event error");
            }
        }
        warn!(session = %id, "Browser disconnected (handler loop ended)");
    });

    info!(session = %id, "Browser launched");

    Ok(LaunchedBrowser {
        id,
        browser,
        handler_task,
        _user_data_dir: user_data_dir,
    })
}
