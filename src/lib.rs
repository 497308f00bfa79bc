//! SQLite Backup SDK - schema introspection and backup script generation
//!
//! Provides unified interfaces for:
//! - Table listing and column introspection (via a `SchemaSource`)
//! - CREATE TABLE and INSERT serialization (SQLite and MySQL dialects)
//! - Whole-database and single-table backups
//! - Script verification and restore into a fresh database
//!
//! ```rust
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory().unwrap();
//! conn.execute_batch("CREATE TABLE tags (label TEXT NOT NULL);").unwrap();
//!
//! let script = sqlite_backup_sdk::backup_database(&conn).unwrap();
//! assert_eq!(script, "CREATE TABLE \"tags\" (\n  \"label\" TEXT NOT NULL\n);");
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod import;
pub mod introspect;
pub mod models;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::BackupConfig;
pub use database::{SchemaSource, SqliteSource};
pub use error::{BackupError, Result};
pub use export::{BackupGenerator, BackupOptions, Dialect, RowSerializer, SchemaSerializer};
pub use import::ScriptImporter;
pub use introspect::{ColumnIntrospector, TableLister};
pub use validation::{ScriptSummary, validate_script};

// Re-export models
pub use models::{
    BackupDocument, ColumnDescriptor, KeyRole, Row, SqlValue, TableSchema, TableSnapshot,
};

/// Back up every table of a SQLite connection with default options
pub fn backup_database(conn: &rusqlite::Connection) -> Result<String> {
    let source = SqliteSource::new(conn);
    BackupGenerator::new(&source).backup()
}
