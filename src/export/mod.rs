//! Export functionality
//!
//! Provides the serializers that turn introspected tables into script text:
//! - Schema (CREATE TABLE)
//! - Rows (INSERT)
//! - Backup (whole database or single table)

pub mod backup;
pub mod dialect;
pub mod rows;
pub mod schema;

// Re-export for convenience
pub use backup::{BLOCK_SEPARATOR, BackupGenerator, BackupOptions, TABLE_SEPARATOR};
pub use dialect::Dialect;
pub use rows::RowSerializer;
pub use schema::SchemaSerializer;
