//! CLI command handlers

pub mod backup;
pub mod inspect;
pub mod restore;
pub mod verify;

use std::io::Read;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::cli::error::CliError;

/// Open an existing database without write access
pub(crate) fn open_read_only(path: &Path) -> Result<Connection, CliError> {
    if !path.is_file() {
        return Err(CliError::OpenError(
            path.to_path_buf(),
            "file not found".to_string(),
        ));
    }
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| CliError::OpenError(path.to_path_buf(), e.to_string()))
}

/// Load input content from file or stdin
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}
