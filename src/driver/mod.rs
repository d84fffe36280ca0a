//! Browser process launching.
//!
//! Internal module: discovers an installed Chromium-family executable for the
//! configured release channel and launches it through the CDP automation
//! library. The [`Session`](crate::Session) owns the result; nothing here is
//! part of the public API except through `Session::open`.

mod chrome;
mod launch;

pub(crate) use launch::{LaunchedBrowser, launch};
