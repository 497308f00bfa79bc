//! Database collaborator abstraction
//!
//! Defines the `SchemaSource` trait, the read-only contract the introspection
//! and backup components consume, and `SqliteSource`, its implementation over
//! a borrowed `rusqlite::Connection`.
//!
//! Components receive the source explicitly; there is no ambient connection.

use crate::error::Result;
use crate::models::Row;

pub mod sqlite;

pub use sqlite::SqliteSource;

/// Column metadata record as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    /// Ordinal position in the table
    pub position: usize,
    pub name: String,
    /// Declared type string, empty when the column was declared without one
    pub declared_type: String,
    pub not_null: bool,
    /// Default expression text
    pub default_value: Option<String>,
    /// 0 when the column is not part of the primary key, otherwise its
    /// 1-based position within the key
    pub primary_key_position: u32,
    pub auto_increment: bool,
}

/// Index metadata record as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMetadata {
    pub name: String,
    pub unique: bool,
    pub origin: IndexOrigin,
    /// Indexed column names in key order
    pub columns: Vec<String>,
}

/// How an index came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrigin {
    /// Explicit CREATE INDEX
    Created,
    /// UNIQUE constraint
    Unique,
    /// PRIMARY KEY constraint
    PrimaryKey,
}

/// Trait for metadata and data providers
///
/// Implementations must return tables and columns in catalog order and must
/// not re-sort them.
pub trait SchemaSource {
    /// List user tables, optionally filtered by a LIKE pattern
    fn list_tables(&self, pattern: Option<&str>) -> Result<Vec<String>>;

    /// Describe the columns of `table`
    fn column_metadata(&self, table: &str) -> Result<Vec<ColumnMetadata>>;

    /// Describe the indexes of `table`
    fn index_metadata(&self, table: &str) -> Result<Vec<IndexMetadata>>;

    /// Select every column of every row of `table`
    fn select_rows(&self, table: &str) -> Result<Vec<Row>>;
}

impl<S: SchemaSource + ?Sized> SchemaSource for &S {
    fn list_tables(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        (**self).list_tables(pattern)
    }

    fn column_metadata(&self, table: &str) -> Result<Vec<ColumnMetadata>> {
        (**self).column_metadata(table)
    }

    fn index_metadata(&self, table: &str) -> Result<Vec<IndexMetadata>> {
        (**self).index_metadata(table)
    }

    fn select_rows(&self, table: &str) -> Result<Vec<Row>> {
        (**self).select_rows(table)
    }
}
