//! Restore a backup script into an empty SQLite database

use rusqlite::Connection;
use tracing::info;

use crate::database::{SchemaSource, SqliteSource};
use crate::error::{BackupError, Result};

/// Script importer - replays a backup script
pub struct ScriptImporter<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ScriptImporter<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Execute `script` against the connection and return the number of
    /// tables afterwards.
    ///
    /// The target must not contain user tables yet. The whole script runs in
    /// one transaction, so a failing statement leaves the database empty.
    pub fn restore(&self, script: &str) -> Result<usize> {
        let source = SqliteSource::new(self.conn);

        let existing = source.list_tables(None)?;
        if !existing.is_empty() {
            return Err(BackupError::InvalidArgument(format!(
                "target database already contains {} table(s): {}",
                existing.len(),
                existing.join(", ")
            )));
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(script)?;
        tx.commit()?;

        let tables = source.list_tables(None)?.len();
        info!("Restored {} table(s)", tables);
        Ok(tables)
    }
}
