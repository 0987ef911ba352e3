// src/utils/config.rs
//! Configuration loading
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `require-thunk.toml` in the working directory (optional)
//! 3. `REQUIRE_THUNK_*` environment variables, e.g.
//!    `REQUIRE_THUNK_TARGETS=http,https` or `REQUIRE_THUNK_LOG__LEVEL=debug`

use crate::interception::selector::Selection;
use crate::utils::errors::{Result, ThunkError};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive; `RUST_LOG` takes precedence when set
    pub level: String,

    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Thunk provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThunkConfig {
    /// Identifiers to intercept (`*` for all)
    pub targets: Vec<String>,

    pub log: LogConfig,
}

impl ThunkConfig {
    /// Load from `require-thunk.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::build(File::with_name("require-thunk").required(false))
    }

    /// Load from an explicit file, still honoring the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("REQUIRE_THUNK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("targets")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Selection built from `targets`
    pub fn selection(&self) -> Result<Selection> {
        Selection::new(self.targets.clone()).ok_or(ThunkError::EmptySelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = ThunkConfig::default();
        assert!(config.targets.is_empty());
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert!(matches!(config.selection(), Err(ThunkError::EmptySelection)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
targets = ["http", "https"]

[log]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = ThunkConfig::from_file(file.path()).unwrap();
        assert_eq!(config.targets, vec!["http", "https"]);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);

        let selection = config.selection().unwrap();
        assert!(selection.matches("https"));
        assert!(!selection.matches("net"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = ThunkConfig::from_file("/nonexistent/require-thunk.toml");
        assert!(matches!(result, Err(ThunkError::Config(_))));
    }
}
