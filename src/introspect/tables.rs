//! Table listing

use tracing::debug;

use crate::database::SchemaSource;
use crate::error::{BackupError, Result};

/// Lists the tables of a database in catalog order
pub struct TableLister<'a, S: SchemaSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SchemaSource + ?Sized> TableLister<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Return table names, optionally filtered by a LIKE pattern.
    ///
    /// The names come back in the order the catalog enumerates them; they
    /// are not sorted.
    pub fn tables(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        if let Some(pattern) = pattern {
            if pattern.is_empty() {
                return Err(BackupError::InvalidArgument(
                    "table pattern must not be empty".to_string(),
                ));
            }
            if pattern.contains('\0') {
                return Err(BackupError::InvalidArgument(
                    "table pattern contains a NUL character".to_string(),
                ));
            }
        }

        let tables = self.source.list_tables(pattern)?;
        debug!(
            "Listed {} table(s){}",
            tables.len(),
            pattern
                .map(|p| format!(" matching '{p}'"))
                .unwrap_or_default()
        );
        Ok(tables)
    }
}
