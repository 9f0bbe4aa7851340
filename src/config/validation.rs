//! Configuration validation engine.
//!
//! ## Responsibility
//! Validate semantic constraints on a parsed [`DashboardConfig`] that serde
//! cannot express (ranges, membership, color syntax, seed user shape).
//!
//! ## Guarantees
//! - Validation collects *all* errors before returning (no short-circuit)
//! - Error messages include the field path and the invalid value
//!
//! ## NOT Responsible For
//! - Parsing TOML (that belongs to `loader`)
//! - File I/O (that belongs to `loader`)

use crate::chart::Rgb;
use crate::form;

use super::DashboardConfig;

/// Errors arising from configuration parsing, validation, or I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing failed.
    #[error("Parse error in {file}: {source}")]
    Parse {
        /// Path of the file that failed to parse.
        file: String,
        /// Underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// One or more semantic validation rules failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A specific field has an out-of-range or contradictory value.
    #[error("Field '{field}' has invalid value {value}: {reason}")]
    InvalidField {
        /// Dot-separated field path (e.g., "table.page_size").
        field: String,
        /// String representation of the invalid value.
        value: String,
        /// Human-readable explanation of the constraint.
        reason: String,
    },

    /// File I/O error.
    #[error("IO error reading {file}: {source}")]
    Io {
        /// Path of the file that could not be read.
        file: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidField {
        field: field.into(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Validate all semantic constraints on a [`DashboardConfig`].
///
/// # Returns
///
/// - `Ok(())` if all constraints pass.
/// - `Err(Vec<ConfigError>)` with every violation found.
pub fn validate(config: &DashboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // ── Table ────────────────────────────────────────────────────────
    let table = &config.table;
    if table.page_size_options.is_empty() {
        errors.push(invalid(
            "table.page_size_options",
            "[]",
            "must list at least one page size",
        ));
    }
    if table.page_size_options.contains(&0) {
        errors.push(invalid(
            "table.page_size_options",
            format!("{:?}", table.page_size_options),
            "page sizes must be at least 1",
        ));
    }
    if table.page_size == 0 {
        errors.push(invalid("table.page_size", 0, "must be at least 1"));
    } else if !table.page_size_options.is_empty()
        && !table.page_size_options.contains(&table.page_size)
    {
        errors.push(invalid(
            "table.page_size",
            table.page_size,
            "must be one of table.page_size_options",
        ));
    }

    // ── Form ─────────────────────────────────────────────────────────
    if config.form.handset_max_width == 0 {
        errors.push(invalid("form.handset_max_width", 0, "must be at least 1"));
    }

    // ── Chart ────────────────────────────────────────────────────────
    if config.chart.colors.len() != 3 {
        errors.push(invalid(
            "chart.colors",
            config.chart.colors.len(),
            "exactly three colors are required (Admin, Editor, Viewer)",
        ));
    }
    for (i, color) in config.chart.colors.iter().enumerate() {
        if Rgb::parse_hex(color).is_none() {
            errors.push(invalid(
                format!("chart.colors[{i}]"),
                color,
                "must be a #rrggbb color",
            ));
        }
    }

    // ── Logging ──────────────────────────────────────────────────────
    if config.logging.level.trim().is_empty() {
        errors.push(invalid("logging.level", "", "must not be empty"));
    }

    // ── Seed users ───────────────────────────────────────────────────
    for (i, user) in config.seed.iter().enumerate() {
        if let Err(problems) = form::validate(&user.name, &user.email, Some(user.role)) {
            for problem in problems {
                errors.push(invalid(
                    format!("seed[{i}].{}", seed_field(problem)),
                    match problem {
                        form::FormError::MissingName => user.name.as_str(),
                        _ => user.email.as_str(),
                    },
                    &problem.to_string(),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn seed_field(error: form::FormError) -> &'static str {
    match error {
        form::FormError::MissingName => "name",
        form::FormError::MissingEmail | form::FormError::MalformedEmail => "email",
        form::FormError::MissingRole => "role",
    }
}
