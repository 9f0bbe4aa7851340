//! Configuration file loading.
//!
//! ## Responsibility
//! Read a TOML file from disk, parse it into a [`DashboardConfig`], and run
//! validation before returning.
//!
//! ## Guarantees
//! - A successfully loaded config is always validated
//! - I/O errors and parse errors are distinguished in the error type
//! - File path is included in every error message
//!
//! ## NOT Responsible For
//! - Defining the config schema (that belongs to `mod.rs`)

use std::path::Path;

use tracing::info;

use super::validation::{self, ConfigError};
use super::DashboardConfig;

/// Load a [`DashboardConfig`] from a TOML file.
///
/// # Returns
///
/// - `Ok(DashboardConfig)` if the file is readable, well-formed, and valid.
/// - `Err(ConfigError::Io)` if the file cannot be read.
/// - `Err(ConfigError::Parse)` if the TOML is malformed.
/// - `Err(ConfigError::Validation)` if semantic constraints are violated.
pub fn load_from_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        file: path.display().to_string(),
        source: e,
    })?;

    let config = load_from_str(&content, &path.display().to_string())?;
    info!(file = %path.display(), seed_users = config.seed.len(), "configuration loaded");
    Ok(config)
}

/// Load a [`DashboardConfig`] from a TOML string.
///
/// # Arguments
///
/// * `content` - TOML content as a string.
/// * `source_name` - Identifier for the source (used in error messages).
pub fn load_from_str(content: &str, source_name: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        file: source_name.to_string(),
        source: e,
    })?;

    validation::validate(&config).map_err(|errors| {
        ConfigError::Validation(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use crate::model::Role;
    use std::io::Write;

    const FULL_TOML: &str = r##"
[table]
page_size = 10
page_size_options = [5, 10, 25]

[form]
handset_max_width = 72

[chart]
colors = ["#ff0000", "#00ff00", "#0000ff"]

[logging]
level = "user_dashboard=debug"
format = "json"
file = "dashboard.log"

[[seed]]
name = "Ann"
email = "a@x.com"
role = "Admin"

[[seed]]
name = "Bo"
email = "b@x.com"
role = "Editor"
"##;

    #[test]
    fn test_load_from_str_empty_uses_defaults() {
        let config = load_from_str("", "empty").expect("test: empty config");
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_load_from_str_full_config() {
        let config = load_from_str(FULL_TOML, "full").expect("test: full config");
        assert_eq!(config.table.page_size, 10);
        assert_eq!(config.form.handset_max_width, 72);
        assert_eq!(config.chart.colors[2], "#0000ff");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.logging.file.as_deref(),
            Some(Path::new("dashboard.log"))
        );
        assert_eq!(config.seed.len(), 2);
        assert_eq!(config.seed[1].role, Role::Editor);
    }

    #[test]
    fn test_load_from_str_partial_section_fills_defaults() {
        let config = load_from_str("[table]\npage_size = 25\n", "partial").expect("test: partial");
        assert_eq!(config.table.page_size, 25);
        assert_eq!(config.table.page_size_options, vec![5, 10, 25]);
    }

    #[test]
    fn test_load_from_str_invalid_toml_returns_parse_error() {
        let result = load_from_str("not valid toml [[[", "bad.toml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_str_unknown_role_returns_parse_error() {
        let toml_str = "[[seed]]\nname = \"Cy\"\nemail = \"c@x.com\"\nrole = \"Owner\"\n";
        let result = load_from_str(toml_str, "role.toml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_str_role_is_case_insensitive() {
        let toml_str = "[[seed]]\nname = \"Cy\"\nemail = \"c@x.com\"\nrole = \"viewer\"\n";
        let config = load_from_str(toml_str, "role.toml").expect("test: lower-case role");
        assert_eq!(config.seed[0].role, Role::Viewer);
    }

    #[test]
    fn test_load_from_str_unknown_field_returns_parse_error() {
        let result = load_from_str("[table]\nrows = 5\n", "unknown.toml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_str_validation_failure_returns_validation_error() {
        let result = load_from_str("[table]\npage_size = 3\n", "bad-size.toml");
        assert!(
            matches!(&result, Err(ConfigError::Validation(msg)) if msg.contains("table.page_size")),
            "expected validation error, got {result:?}"
        );
    }

    #[test]
    fn test_load_from_file_valid_toml_succeeds() {
        let dir = tempfile::tempdir().expect("test: create tempdir");
        let path = dir.path().join("dashboard.toml");
        let mut f = std::fs::File::create(&path).expect("test: create file");
        f.write_all(FULL_TOML.as_bytes()).expect("test: write");
        drop(f);

        let config = load_from_file(&path).expect("test: load");
        assert_eq!(config.seed[0].name, "Ann");
    }

    #[test]
    fn test_load_from_file_missing_file_returns_io_error() {
        let result = load_from_file(Path::new("/nonexistent/dashboard.toml"));
        assert!(
            matches!(&result, Err(ConfigError::Io { file, .. }) if file.contains("dashboard.toml")),
            "expected io error, got {result:?}"
        );
    }
}
