//! CLI error type

use std::path::PathBuf;

use thiserror::Error;

use crate::error::BackupError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {path}: {reason}", path = .0.display(), reason = .1)]
    FileReadError(PathBuf, String),

    #[error("Failed to write {path}: {reason}", path = .0.display(), reason = .1)]
    FileWriteError(PathBuf, String),

    #[error("Cannot open database {path}: {reason}", path = .0.display(), reason = .1)]
    OpenError(PathBuf, String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Backup(#[from] BackupError),
}

impl CliError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            CliError::Backup(err) => err.user_message(),
            CliError::OpenError(path, reason) => format!(
                "Cannot open database {}: {reason}\n\nHint: Check that the file exists and is a SQLite database.",
                path.display()
            ),
            _ => self.to_string(),
        }
    }
}
