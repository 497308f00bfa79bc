//! Restore command implementation

use std::path::Path;

use rusqlite::Connection;

use super::load_input;
use crate::cli::error::CliError;
use crate::import::ScriptImporter;

/// Handle the `restore` command
pub fn handle_restore(script: &str, database: &Path) -> Result<(), CliError> {
    let content = load_input(script)?;

    let conn = Connection::open(database)
        .map_err(|e| CliError::OpenError(database.to_path_buf(), e.to_string()))?;
    let tables = ScriptImporter::new(&conn).restore(&content)?;

    println!("Restored {} table(s) into {}", tables, database.display());
    Ok(())
}
