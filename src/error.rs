//! Error types for introspection, serialization and restore

use thiserror::Error;

/// Result alias used throughout the SDK
pub type Result<T> = std::result::Result<T, BackupError>;

/// Errors that can occur while introspecting or backing up a database
#[derive(Error, Debug)]
pub enum BackupError {
    /// Malformed input to a public operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A table with zero columns reached the schema serializer
    #[error("Table '{0}' has no columns to serialize")]
    EmptySchema(String),

    /// A metadata query failed or returned a structure that cannot be used
    #[error("Schema introspection failed for table '{table}': {reason}")]
    SchemaIntrospectionFailure { table: String, reason: String },

    /// Driver error outside of schema introspection
    #[error("Database error: {0}")]
    Database(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BackupError {
    /// Build an introspection failure for `table` from any displayable cause.
    ///
    /// Failures that already carry a table are passed through unchanged so the
    /// innermost table name is kept.
    pub fn introspection(table: &str, cause: impl Into<BackupError>) -> Self {
        match cause.into() {
            err @ BackupError::SchemaIntrospectionFailure { .. } => err,
            err @ BackupError::InvalidArgument(_) => err,
            other => BackupError::SchemaIntrospectionFailure {
                table: table.to_string(),
                reason: other.to_string(),
            },
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            BackupError::SchemaIntrospectionFailure { table, reason } => {
                format!(
                    "Could not read the schema of table '{table}': {reason}\n\n\
                    Hint: No partial backup was written. Fix the table definition and retry."
                )
            }
            BackupError::EmptySchema(table) => {
                format!("Table '{table}' has no columns and cannot be serialized.")
            }
            BackupError::Config(msg) => {
                format!("Invalid configuration: {msg}\n\nHint: Check your backup configuration file.")
            }
            _ => self.to_string(),
        }
    }
}

impl From<rusqlite::Error> for BackupError {
    fn from(err: rusqlite::Error) -> Self {
        BackupError::Database(err.to_string())
    }
}

impl From<toml::de::Error> for BackupError {
    fn from(err: toml::de::Error) -> Self {
        BackupError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introspection_wraps_database_errors() {
        let err = BackupError::introspection("users", BackupError::Database("boom".to_string()));
        match err {
            BackupError::SchemaIntrospectionFailure { table, reason } => {
                assert_eq!(table, "users");
                assert!(reason.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_introspection_keeps_inner_table() {
        let inner = BackupError::SchemaIntrospectionFailure {
            table: "orders".to_string(),
            reason: "composite primary key".to_string(),
        };
        let err = BackupError::introspection("users", inner);
        assert!(matches!(
            err,
            BackupError::SchemaIntrospectionFailure { ref table, .. } if table == "orders"
        ));
    }

    #[test]
    fn test_user_message_mentions_table() {
        let err = BackupError::EmptySchema("ghost".to_string());
        assert!(err.user_message().contains("ghost"));
    }
}
