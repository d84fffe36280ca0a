//! Shared utilities for the demo scripts.
//!
//! Provides command-line flag parsing and logging setup used by every demo.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments for demos.
#[derive(Debug, Clone)]
pub struct Args {
    pub debug: bool,
    pub headful: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self {
            debug: args.iter().any(|a| a == "--debug"),
            headful: args.iter().any(|a| a == "--headful"),
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize console + file logging for a demo run.
pub fn init_logging(debug: bool) {
    let log_file = PathBuf::from("multipage-demo.log");
    multipage::logging::init(debug, Some(&log_file)).expect("logging setup failed");
}
