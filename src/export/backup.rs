//! Backup generation: composes table listing, column introspection and the
//! two serializers into one reconstruction script.

use tracing::{debug, info};

use super::{Dialect, RowSerializer, SchemaSerializer};
use crate::config::BackupConfig;
use crate::database::SchemaSource;
use crate::error::{BackupError, Result};
use crate::introspect::{ColumnIntrospector, TableLister};
use crate::models::{BackupDocument, TableSchema, TableSnapshot};

/// Separator between the schema text and the row text of one table
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Separator between the blocks of two tables
pub const TABLE_SEPARATOR: &str = "\n\n\n";

/// Options for a backup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOptions {
    pub dialect: Dialect,
    /// Emit INSERT statements; schema-only backups when false
    pub include_rows: bool,
    /// LIKE pattern restricting which tables are backed up
    pub pattern: Option<String>,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            include_rows: true,
            pattern: None,
        }
    }
}

impl From<&BackupConfig> for BackupOptions {
    fn from(config: &BackupConfig) -> Self {
        Self {
            dialect: config.dialect,
            include_rows: config.include_rows,
            pattern: config.like.clone(),
        }
    }
}

/// Generates backup scripts from a schema source
///
/// # Example
///
/// ```rust
/// use rusqlite::Connection;
/// use sqlite_backup_sdk::database::SqliteSource;
/// use sqlite_backup_sdk::export::BackupGenerator;
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute_batch("CREATE TABLE notes (body TEXT); INSERT INTO notes VALUES ('hi');").unwrap();
///
/// let source = SqliteSource::new(&conn);
/// let script = BackupGenerator::new(&source).backup().unwrap();
/// assert_eq!(
///     script,
///     "CREATE TABLE \"notes\" (\n  \"body\" TEXT\n);\n\nINSERT INTO \"notes\" (\"body\") VALUES ('hi');"
/// );
/// ```
pub struct BackupGenerator<'a, S: SchemaSource + ?Sized> {
    source: &'a S,
    options: BackupOptions,
}

impl<'a, S: SchemaSource + ?Sized> BackupGenerator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self::with_options(source, BackupOptions::default())
    }

    pub fn with_options(source: &'a S, options: BackupOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &BackupOptions {
        &self.options
    }

    /// Render the whole database as a reconstruction script
    pub fn backup(&self) -> Result<String> {
        let document = self.snapshot()?;
        let script = self.render(&document)?;
        info!(
            "Backup complete: {} table(s), {} row(s), {} bytes",
            document.tables.len(),
            document.row_count(),
            script.len()
        );
        Ok(script)
    }

    /// Render a single table's schema and rows
    pub fn table_backup(&self, table: &str) -> Result<String> {
        let snapshot = self.snapshot_table(table)?;
        self.render_table(&snapshot)
    }

    /// Capture every listed table.
    ///
    /// Aborts on the first table whose schema cannot be read; no partial
    /// document is returned.
    pub fn snapshot(&self) -> Result<BackupDocument> {
        let tables = TableLister::new(self.source).tables(self.options.pattern.as_deref())?;
        info!(
            "Backing up {} table(s) as {}",
            tables.len(),
            self.options.dialect
        );

        let mut snapshots = Vec::with_capacity(tables.len());
        for table in &tables {
            snapshots.push(self.snapshot_table(table)?);
        }
        Ok(BackupDocument::new(snapshots))
    }

    /// Capture the schema and rows of one table
    pub fn snapshot_table(&self, table: &str) -> Result<TableSnapshot> {
        let columns = ColumnIntrospector::new(self.source).columns(table)?;
        let schema = TableSchema::new(table, columns).map_err(|e| {
            BackupError::SchemaIntrospectionFailure {
                table: table.to_string(),
                reason: e.to_string(),
            }
        })?;

        let rows = if self.options.include_rows {
            self.source.select_rows(table)?
        } else {
            Vec::new()
        };

        debug!(
            "Captured table '{}': {} column(s), {} row(s)",
            table,
            schema.columns.len(),
            rows.len()
        );
        Ok(TableSnapshot::new(schema, rows))
    }

    /// Render a captured document
    pub fn render(&self, document: &BackupDocument) -> Result<String> {
        let mut blocks = Vec::with_capacity(document.tables.len());
        for snapshot in &document.tables {
            let block = self.render_table(snapshot)?;
            if !block.is_empty() {
                blocks.push(block);
            }
        }
        Ok(blocks.join(TABLE_SEPARATOR))
    }

    /// Render one table: schema text (only when it has columns), then row text
    pub fn render_table(&self, snapshot: &TableSnapshot) -> Result<String> {
        let mut parts = Vec::with_capacity(2);

        if !snapshot.schema.columns.is_empty() {
            parts.push(SchemaSerializer::new(self.options.dialect).serialize(&snapshot.schema)?);
        }

        let rows = RowSerializer::new(self.options.dialect)
            .serialize(&snapshot.schema.name, &snapshot.rows)?;
        if !rows.is_empty() {
            parts.push(rows);
        }

        Ok(parts.join(BLOCK_SEPARATOR))
    }
}
