//! Integration tests for vows
//!
//! These tests drive the public API end to end: HTTP clients against a fake sheet,
//! the RSVP flow, the refresh bus and the binary itself.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod http_api;
pub mod refresh_views;
pub mod rsvp_flow;
pub mod search_props;
pub mod tui;
