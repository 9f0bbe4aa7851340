//! Integration tests for the TUI dashboard module.
//!
//! These tests verify cross-module interactions: key sequences driving the
//! dashboard through the event layer, and full-frame renders against a
//! ratatui `TestBackend`.

#[cfg(feature = "tui")]
mod app_state;
#[cfg(feature = "tui")]
mod widget_tests;
