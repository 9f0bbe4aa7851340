//! # user-dashboard
//!
//! A reactive, in-memory user dashboard: a filtered and paginated user table,
//! a pie chart of the role distribution, and a modal form for creating and
//! editing users.
//!
//! ## Architecture
//!
//! ```text
//!   UserStore ──broadcast──▶ Dashboard ──▶ TableView
//!       ▲                        │    └──▶ ChartRenderer (lazy "chart")
//!       └──── add / update ◀─────┴─────── UserForm (lazy "user-form")
//! ```
//!
//! The view-model core is terminal independent. The ratatui front end lives
//! in [`tui`] behind the default `tui` feature.

// ── Lint policy ───────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(missing_docs)]

use std::fs::OpenOptions;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod activity;
pub mod chart;
pub mod config;
pub mod controller;
pub mod features;
pub mod form;
pub mod model;
pub mod store;
pub mod table;

#[cfg(feature = "tui")]
pub mod tui;

pub use chart::{ChartRenderer, ChartUpdate, RoleHistogram};
pub use config::{DashboardConfig, LogFormat, LoggingConfig};
pub use controller::{Dashboard, ModalState, SubmitOutcome};
pub use form::{FormError, UserForm};
pub use model::{Role, User, UserFields, UserId};
pub use store::{Snapshot, Subscription, UpdateOutcome, UserStore};
pub use table::{TablePage, TableView};

/// Initialise the global tracing subscriber from the logging configuration.
///
/// Log lines go to `config.file` because stdout is owned by the terminal UI.
/// When no file is configured nothing is installed and `Ok(false)` is
/// returned. The filter starts from `config.level`; `RUST_LOG` takes
/// precedence when set.
///
/// # Errors
///
/// - [`DashboardError::Io`] if the log file cannot be opened.
/// - [`DashboardError::Tracing`] if a global subscriber is already set.
///
/// # Panics
///
/// This function never panics.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, DashboardError> {
    let Some(path) = config.file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DashboardError::Io {
            context: format!("opening log file {}", path.display()),
            source: e,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_writer(Mutex::new(file))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
    };

    result
        .map(|()| true)
        .map_err(|e| DashboardError::Tracing(e.to_string()))
}

/// Top-level dashboard errors.
///
/// Form validation failures are not errors at this level; they are reported
/// inline by [`UserForm`] through [`FormError`].
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Loading or validating the configuration failed.
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// A lazily loaded feature module could not be constructed.
    #[error("failed to load feature '{feature}': {reason}")]
    FeatureLoad {
        /// Registry name of the feature, e.g. `"chart"`.
        feature: &'static str,
        /// Human-readable cause.
        reason: String,
    },

    /// Terminal or file I/O failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The global tracing subscriber could not be installed.
    #[error("tracing init failed: {0}")]
    Tracing(String),
}
