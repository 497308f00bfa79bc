//! Backup configuration
//!
//! Loaded from a TOML file; every field is optional:
//!
//! ```toml
//! database = "app.db"
//! like = "user%"
//! dialect = "sqlite"
//! include_rows = true
//! output = "backup.sql"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BackupError, Result};
use crate::export::{BackupOptions, Dialect};

/// Configuration for a backup run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// SQLite database file to back up
    pub database: Option<PathBuf>,
    /// LIKE pattern restricting the tables
    pub like: Option<String>,
    /// Target dialect of the script
    pub dialect: Dialect,
    /// Include INSERT statements (default: true)
    pub include_rows: bool,
    /// File the script is written to; stdout when unset
    pub output: Option<PathBuf>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            database: None,
            like: None,
            dialect: Dialect::default(),
            include_rows: true,
            output: None,
        }
    }
}

impl BackupConfig {
    /// Create a new backup config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            BackupError::Config(msg) => BackupError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Set the database path
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }

    /// Set the table pattern
    pub fn with_like(mut self, pattern: impl Into<String>) -> Self {
        self.like = Some(pattern.into());
        self
    }

    /// Set the dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Include or skip row data
    pub fn with_include_rows(mut self, include_rows: bool) -> Self {
        self.include_rows = include_rows;
        self
    }

    /// Set the output file
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Backup options derived from this config
    pub fn options(&self) -> BackupOptions {
        BackupOptions::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackupConfig::from_toml_str("").unwrap();
        assert_eq!(config, BackupConfig::default());
        assert!(config.include_rows);
        assert_eq!(config.dialect, Dialect::Sqlite);
    }

    #[test]
    fn test_parse_full_config() {
        let config = BackupConfig::from_toml_str(
            r#"
            database = "app.db"
            like = "user%"
            dialect = "mysql"
            include_rows = false
            output = "out.sql"
            "#,
        )
        .unwrap();

        assert_eq!(config.database, Some(PathBuf::from("app.db")));
        assert_eq!(config.like.as_deref(), Some("user%"));
        assert_eq!(config.dialect, Dialect::Mysql);
        assert!(!config.include_rows);
        assert_eq!(config.output, Some(PathBuf::from("out.sql")));

        let options = config.options();
        assert_eq!(options.pattern.as_deref(), Some("user%"));
        assert!(!options.include_rows);
    }

    #[test]
    fn test_unknown_dialect_is_config_error() {
        let result = BackupConfig::from_toml_str("dialect = \"oracle\"");
        assert!(matches!(result, Err(BackupError::Config(_))));
    }

    #[test]
    fn test_builder() {
        let config = BackupConfig::new()
            .with_database("a.db")
            .with_like("x%")
            .with_dialect(Dialect::Mysql)
            .with_include_rows(false)
            .with_output("a.sql");
        assert_eq!(config.database, Some(PathBuf::from("a.db")));
        assert_eq!(config.output, Some(PathBuf::from("a.sql")));
    }
}
