//! Schema introspection
//!
//! Provides the read-only components that turn catalog metadata into
//! descriptors:
//! - `ColumnIntrospector` (columns, key roles, primary key lookup)
//! - `TableLister` (table names in catalog order)

pub mod columns;
pub mod tables;

pub use columns::ColumnIntrospector;
pub use tables::TableLister;

use crate::error::{BackupError, Result};

/// Reject table names no catalog can hold
pub fn validate_table_name(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(BackupError::InvalidArgument(
            "table name must not be empty".to_string(),
        ));
    }
    if table.contains('\0') {
        return Err(BackupError::InvalidArgument(format!(
            "table name '{}' contains a NUL character",
            table.escape_default()
        )));
    }
    Ok(())
}
