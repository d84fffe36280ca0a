//! Console and file logging setup.
//!
//! Log lines are unstructured line-oriented text, not a machine-readable
//! contract. Output always goes to the console; passing a path adds an
//! append-only file layer so runs accumulate in one log.
//!
//! Calling this more than once is harmless; later calls are no-ops.
//!
//! # Example
//!
//! ```no_run
//! multipage::logging::init(false, Some("session.log".as_ref())).unwrap();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::Result;

// ============================================================================
// Init
// ============================================================================

/// Initializes tracing with a console layer and an optional append-only
/// file layer.
///
/// `debug` raises the crate's level from `info` to `debug`; `RUST_LOG`
/// overrides both.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let default_filter = if debug {
        "multipage=debug"
    } else {
        "multipage=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console = tracing_subscriber::fmt::layer().with_target(false);

    let file = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    // try_init: a second call (tests, embedding apps) is not an error.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init();

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init(true, None).unwrap();
        init(false, None).unwrap();
    }

    #[test]
    fn test_file_layer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");

        std::fs::write(&path, "existing line\n").unwrap();
        init(false, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing line"));
    }
}
