//! Error types for the session manager.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`].
//!
//! Two classes of failure exist (and are kept distinct on purpose):
//!
//! - **Fatal**: browser/context/page construction problems — the environment
//!   cannot run automation at all. These propagate unchanged, no retry.
//! - **Recoverable**: a single step inside a named operation failed (click,
//!   fill, select). These are logged with selector context and re-raised so
//!   the caller's surrounding loop decides whether to skip and continue.
//!
//! Page-lookup misses are *not* errors: `find_page`/`switch_page` return
//! `Ok(None)` and `close_page` returns `Ok(false)` instead.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use chromiumoxide::error::CdpError;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Launch Errors (fatal)
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when session configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// The requested browser engine cannot be driven by the CDP backend.
    ///
    /// Only the Chromium family is launchable; `firefox`/`webkit` remain in
    /// the configuration surface for compatibility but are rejected here.
    #[error("Unsupported browser engine: {kind}")]
    UnsupportedBrowser {
        /// The engine that was requested.
        kind: String,
    },

    /// No executable found for the requested release channel.
    #[error("No {channel} executable found on this system")]
    BrowserNotFound {
        /// The release channel that was searched for.
        channel: String,
    },

    /// Failed to launch the browser process.
    #[error("Failed to launch browser: {message}")]
    Launch {
        /// Description of the launch failure.
        message: String,
    },

    // ========================================================================
    // Page Operation Errors (recoverable)
    // ========================================================================
    /// Navigation to a URL failed.
    #[error("Navigation failed: url={url}: {message}")]
    Navigation {
        /// The URL that was being navigated to.
        url: String,
        /// Description of the navigation failure.
        message: String,
    },

    /// An action on a selector failed (click, fill, select, read).
    #[error("Action '{action}' failed: selector={selector}: {message}")]
    Action {
        /// The action that was attempted.
        action: String,
        /// CSS selector the action targeted.
        selector: String,
        /// Description of the failure.
        message: String,
    },

    /// A page query was malformed (e.g. an invalid URL regex).
    #[error("Invalid page query: {message}")]
    InvalidQuery {
        /// Description of the invalid query.
        message: String,
    },

    /// Operation exceeded its timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// No page is open in the session.
    ///
    /// Returned by current-page operations after the last page was closed.
    #[error("No open page in session")]
    NoCurrentPage,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// Error from the underlying CDP automation library.
    #[error("CDP error: {0}")]
    Cdp(#[from] CdpError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an unsupported browser error.
    #[inline]
    pub fn unsupported_browser(kind: impl Into<String>) -> Self {
        Self::UnsupportedBrowser { kind: kind.into() }
    }

    /// Creates a browser-not-found error.
    #[inline]
    pub fn browser_not_found(channel: impl Into<String>) -> Self {
        Self::BrowserNotFound {
            channel: channel.into(),
        }
    }

    /// Creates a launch error.
    #[inline]
    pub fn launch(message: impl Into<String>) -> Self {
        Self::Launch {
            message: message.into(),
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an action error.
    #[inline]
    pub fn action(
        action: impl Into<String>,
        selector: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Action {
            action: action.into(),
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid query error.
    #[inline]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this error is fatal for the whole session.
    ///
    /// Fatal errors mean the environment cannot run automation; there is no
    /// point retrying the operation on the same session.
    #[inline]
    #[must_use]
    pub fn is_launch_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::UnsupportedBrowser { .. }
                | Self::BrowserNotFound { .. }
                | Self::Launch { .. }
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors concern a single page operation; the session stays
    /// usable and the caller may continue with the next item.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Navigation { .. }
                | Self::Action { .. }
                | Self::Timeout { .. }
                | Self::NoCurrentPage
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
