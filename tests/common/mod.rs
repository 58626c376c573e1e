//! Shared test utilities for vows
//!
//! - A fake spreadsheet API served by axum on a loopback port
//! - TUI terminal testing helpers

pub mod fake_sheet;
pub mod terminal;
