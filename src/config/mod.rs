//! # Module: Dashboard Configuration
//!
//! ## Responsibility
//! Parse and validate the TOML configuration: table paging, form breakpoint,
//! chart palette, logging, and optional seed users.
//! ```text
//! user-dashboard --config dashboard.toml
//! ```
//!
//! ## Guarantees
//! - Every section is optional; missing values fall back to documented defaults
//! - Validated: semantic constraints are checked before a config is accepted
//! - Schema-exportable: JSON Schema output enables IDE autocomplete
//!
//! ## NOT Responsible For
//! - Installing the tracing subscriber (that belongs to `init_tracing`)
//! - Applying seed users to the store (that belongs to `controller`)

pub mod loader;
pub mod validation;

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chart::DEFAULT_COLORS;
use crate::form::DEFAULT_HANDSET_MAX_WIDTH;
use crate::model::UserFields;

pub use validation::ConfigError;

// ── Default value functions ──────────────────────────────────────────────

/// Default rows per page: 5.
fn default_page_size() -> usize {
    5
}

/// Default paginator options: 5, 10, 25.
fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 25]
}

/// Default handset breakpoint in terminal columns.
fn default_handset_max_width() -> u16 {
    DEFAULT_HANDSET_MAX_WIDTH
}

/// Default slice colors for Admin, Editor, Viewer.
fn default_colors() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
}

/// Default log filter directive.
fn default_log_level() -> String {
    "info".to_string()
}

// ── Top-level config ─────────────────────────────────────────────────────

/// Root configuration.
///
/// # Example
///
/// ```toml
/// [table]
/// page_size = 10
///
/// [[seed]]
/// name = "Ann"
/// email = "a@x.com"
/// role = "Admin"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// User table paging.
    pub table: TableConfig,
    /// User form layout.
    pub form: FormConfig,
    /// Role chart appearance.
    pub chart: ChartConfig,
    /// Log output.
    pub logging: LoggingConfig,
    /// Users added to the store at startup, in order.
    pub seed: Vec<UserFields>,
}

/// Table paging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Initial rows per page. Must be one of `page_size_options`.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Page sizes the paginator cycles through.
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

/// Form layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// Terminal widths below this many columns use the one-column layout.
    #[serde(default = "default_handset_max_width")]
    pub handset_max_width: u16,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            handset_max_width: default_handset_max_width(),
        }
    }
}

/// Chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Slice colors as `#rrggbb`, in order Admin, Editor, Viewer.
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"user_dashboard=debug"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Log file. The terminal is owned by the UI, so without a file no logs
    /// are written.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// Structured JSON lines.
    Json,
}

/// Export the JSON Schema for [`DashboardConfig`].
///
/// # Errors
///
/// Returns `serde_json::Error` if schema serialization fails.
pub fn export_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(DashboardConfig);
    serde_json::to_string_pretty(&schema)
}
