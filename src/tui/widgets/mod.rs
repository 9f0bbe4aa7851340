//! # Module: TUI Widgets
//!
//! ## Responsibility
//! Individual rendering widgets for each dashboard section. Each widget is a pure
//! function that takes app state and a layout rect, and renders into a frame.
//!
//! ## Guarantees
//! - All widgets handle zero-data gracefully (empty state rendering)
//! - No widget panics on any input range
//! - Role colors are consistent between the chart and its legend

pub mod activity;
pub mod chart;
pub mod filter;
pub mod form;
pub mod table;

use ratatui::style::Color;

use crate::chart::Rgb;

/// Converts a palette color to a terminal color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
