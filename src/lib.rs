//! Multi-page Chromium session manager.
//!
//! This library keeps a small directory over the pages open in a single
//! browsing context, on top of the `chromiumoxide` CDP client. Browser
//! process control, page lifecycle and DOM semantics belong to the
//! automation library; this crate adds what automation scripts keep
//! rebuilding by hand:
//!
//! - a **tag registry** mapping caller-chosen labels to page handles,
//! - **find/switch/close/list** operations over those pages, with fixed
//!   criteria precedence (tag > index > title > url > current),
//! - a lazily launched, explicitly closed **session lifecycle**,
//! - current-page conveniences: navigate, click, fill, declarative
//!   [`FormPlan`] filling, selector waits, screenshots.
//!
//! # Quick Start
//!
//! ```no_run
//! use multipage::{PageQuery, Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> multipage::Result<()> {
//!     multipage::logging::init(false, None)?;
//!
//!     let mut session = Session::open(SessionConfig::new().with_headless()).await?;
//!     session.goto("https://example.com").await?;
//!
//!     let shop = session.open_new_page("shop").await?;
//!     shop.goto("https://shop.example.com").await?;
//!
//!     session.switch_page(&PageQuery::tag("shop")).await?;
//!     for listing in session.list_pages().await? {
//!         println!("{listing}");
//!     }
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`session`] | [`Session`]: lifecycle, page directory, page actions |
//! | [`config`] | [`SessionConfig`], engine and channel selection |
//! | [`query`] | [`PageQuery`] lookup criteria |
//! | [`form`] | [`FormPlan`] declarative form filling |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`logging`] | Console + append-only file logging setup |

// ============================================================================
// Modules
// ============================================================================

/// Session configuration: engine, channel, headless, launch args, timeout.
pub mod config;

/// Error types and result aliases.
pub mod error;

/// Declarative form filling.
pub mod form;

/// Console and file logging setup.
pub mod logging;

/// Page lookup criteria.
pub mod query;

/// Browser session and page directory.
pub mod session;

mod driver;
mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{BrowserKind, Channel, DEFAULT_TIMEOUT_MS, SessionConfig};
pub use error::{Error, Result};
pub use form::FormPlan;
pub use query::PageQuery;
pub use session::{DEFAULT_TAG, PageInfo, PageListing, Session, UNNAMED_TAG};

// The page handle type is the automation library's; re-exported so callers
// don't need a direct chromiumoxide dependency for basic use.
pub use chromiumoxide::Page;
