//! Session configuration.
//!
//! The configuration surface read by [`Session`](crate::Session) at launch
//! time. All fields have defaults and deserialization ignores unrecognized
//! keys, so partial configuration files work:
//!
//! ```
//! use multipage::SessionConfig;
//!
//! let config: SessionConfig =
//!     serde_json::from_str(r#"{ "headless": true, "future_option": 1 }"#).unwrap();
//! assert!(config.headless);
//! ```
//!
//! # Example
//!
//! ```
//! use multipage::{Channel, SessionConfig};
//!
//! let config = SessionConfig::new()
//!     .with_headless()
//!     .with_channel(Channel::Msedge)
//!     .with_arg("--disable-blink-features=AutomationControlled")
//!     .with_timeout_ms(10_000);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Default wait timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// BrowserKind
// ============================================================================

/// Browser engine selection.
///
/// The full surface of the original configuration is kept, but only the
/// Chromium family can actually be driven by the CDP backend; launching
/// `firefox` or `webkit` fails with an unsupported-engine error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Chromium-family engine (the only launchable kind).
    #[default]
    Chromium,
    /// Firefox engine. Accepted in configuration, rejected at launch.
    Firefox,
    /// WebKit engine. Accepted in configuration, rejected at launch.
    Webkit,
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
            Self::Webkit => "webkit",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Channel
// ============================================================================

/// Release channel, i.e. which installed executable family to look for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Plain Chromium build.
    #[default]
    Chromium,
    /// Google Chrome.
    Chrome,
    /// Microsoft Edge.
    Msedge,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chromium => "chromium",
            Self::Chrome => "chrome",
            Self::Msedge => "msedge",
        };
        f.write_str(name)
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Configuration for a browser session.
///
/// Read once when the browser is launched; later changes have no effect on a
/// running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Browser engine to launch.
    pub browser_type: BrowserKind,

    /// Run without a visible window.
    pub headless: bool,

    /// Release channel used for executable discovery.
    pub channel: Channel,

    /// Additional process launch flags, passed through verbatim.
    pub browser_args: Vec<String>,

    /// Default wait timeout in milliseconds. Accepts `timeout` as an input
    /// key as well.
    #[serde(alias = "timeout")]
    pub timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser_type: BrowserKind::Chromium,
            headless: false,
            channel: Channel::Chromium,
            browser_args: Vec::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SessionConfig {
    /// Creates a configuration with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the browser engine.
    #[inline]
    #[must_use]
    pub fn with_browser_type(mut self, kind: BrowserKind) -> Self {
        self.browser_type = kind;
        self
    }

    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Sets the release channel.
    #[inline]
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Adds a process launch flag.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.browser_args.push(arg.into());
        self
    }

    /// Adds multiple process launch flags.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.browser_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the default wait timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.browser_type, BrowserKind::Chromium);
        assert!(!config.headless);
        assert_eq!(config.channel, Channel::Chromium);
        assert!(config.browser_args.is_empty());
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_builder_chain() {
        let config = SessionConfig::new()
            .with_browser_type(BrowserKind::Chromium)
            .with_headless()
            .with_channel(Channel::Msedge)
            .with_arg("--no-sandbox")
            .with_args(["--disable-gpu", "--mute-audio"])
            .with_timeout_ms(5_000);

        assert!(config.headless);
        assert_eq!(config.channel, Channel::Msedge);
        assert_eq!(
            config.browser_args,
            vec!["--no-sandbox", "--disable-gpu", "--mute-audio"]
        );
        assert_eq!(config.timeout_ms, 5_000);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: SessionConfig = serde_json::from_str(
            r#"{ "browser_type": "chromium", "headless": true, "proxy": "http://x", "retries": 3 }"#,
        )
        .unwrap();
        assert!(config.headless);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_timeout_accepted_under_both_keys() {
        let config: SessionConfig = serde_json::from_str(r#"{ "timeout": 5000 }"#).unwrap();
        assert_eq!(config.timeout_ms, 5_000);

        let config: SessionConfig = serde_json::from_str(r#"{ "timeout_ms": 7000 }"#).unwrap();
        assert_eq!(config.timeout_ms, 7_000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{ "channel": "msedge" }"#).unwrap();
        assert_eq!(config.channel, Channel::Msedge);
        assert!(!config.headless);
    }

    #[test]
    fn test_kind_and_channel_display() {
        assert_eq!(BrowserKind::Chromium.to_string(), "chromium");
        assert_eq!(BrowserKind::Webkit.to_string(), "webkit");
        assert_eq!(Channel::Msedge.to_string(), "msedge");
    }
}
