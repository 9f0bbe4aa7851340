//! # Module: TUI Dashboard
//!
//! ## Responsibility
//! Terminal front end for the user dashboard using Ratatui: the filter bar,
//! the paginated user table, the role pie chart, the activity log, and the
//! add/edit user modal.
//!
//! ## Guarantees
//! - No panics in any rendering or update path
//! - Clean terminal restore on exit, including on panic (see the binary)
//! - Graceful resize handling down to the minimum size, below which a guard
//!   message is shown instead of the dashboard
//! - Every resize is published to the dashboard viewport so an open form
//!   can switch between one and two columns
//!
//! ## NOT Responsible For
//! - Store, table, chart and form semantics (delegates to [`crate::Dashboard`])

pub mod app;
pub mod events;
pub mod ui;
pub mod widgets;
