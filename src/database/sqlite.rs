//! SQLite implementation of `SchemaSource`

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, warn};

use super::{ColumnMetadata, IndexMetadata, IndexOrigin, SchemaSource};
use crate::error::Result;
use crate::export::Dialect;
use crate::models::{Row, SqlValue};

/// User tables in catalog order; SQLite's own `sqlite_*` tables are skipped
/// because they cannot be recreated by a script.
const LIST_TABLES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'";

const VIRTUAL_TABLES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND sql LIKE 'CREATE VIRTUAL TABLE%'";

/// Shadow tables are only flagged once their virtual table is connected
const SHADOW_TABLES: &str = "SELECT name FROM pragma_table_list \
     WHERE schema = 'main' AND type = 'shadow'";

/// `hidden` is 0 for ordinary columns, 1 for hidden virtual table columns and
/// 2 or 3 for generated columns
const TABLE_INFO: &str = "SELECT cid, name, type, \"notnull\", dflt_value, pk, hidden \
     FROM pragma_table_xinfo(?1)";

const INDEX_LIST: &str = "SELECT name, \"unique\", origin FROM pragma_index_list(?1)";

const INDEX_INFO: &str = "SELECT name FROM pragma_index_info(?1) ORDER BY seqno";

const TABLE_SQL: &str = "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1";

/// Read-only metadata and data access over a borrowed SQLite connection
pub struct SqliteSource<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSource<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    /// Whether the stored CREATE statement of `table` uses AUTOINCREMENT
    fn uses_autoincrement(&self, table: &str) -> Result<bool> {
        let sql: Option<Option<String>> = self
            .conn
            .query_row(TABLE_SQL, [table], |row| row.get(0))
            .optional()?;

        Ok(sql
            .flatten()
            .is_some_and(|sql| has_keyword(&sql, "AUTOINCREMENT")))
    }

    /// All columns in catalog order, each paired with whether it holds no
    /// stored data (generated or hidden)
    fn xinfo(&self, table: &str) -> Result<Vec<(ColumnMetadata, bool)>> {
        let mut stmt = self.conn.prepare(TABLE_INFO)?;
        let rows = stmt.query_map([table], |row| {
            let column = ColumnMetadata {
                position: row.get::<_, i64>(0)? as usize,
                name: row.get(1)?,
                declared_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                not_null: row.get::<_, i64>(3)? != 0,
                default_value: row.get(4)?,
                primary_key_position: row.get(5)?,
                auto_increment: false,
            };
            Ok((column, row.get::<_, i64>(6)? != 0))
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    /// Names of the columns a script can insert into. Generated columns are
    /// left out: the catalog does not expose their expression.
    fn stored_column_names(&self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .xinfo(table)?
            .into_iter()
            .filter(|(_, hidden)| !hidden)
            .map(|(column, _)| column.name)
            .collect())
    }

    fn names(&self, sql: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    /// Virtual tables and their shadow tables. Their content belongs to the
    /// virtual table module and cannot be recreated with plain DDL.
    fn module_tables(&self) -> Result<Vec<String>> {
        let mut names = self.names(VIRTUAL_TABLES)?;
        if names.is_empty() {
            return Ok(names);
        }

        for table in &names {
            // Preparing a query connects the virtual table
            let connect = format!(
                "SELECT 1 FROM {} LIMIT 0",
                Dialect::Sqlite.quote_identifier(table)
            );
            if let Err(e) = self.conn.prepare(&connect) {
                debug!("Cannot connect virtual table '{}': {}", table, e);
            }
        }

        names.extend(self.names(SHADOW_TABLES)?);
        Ok(names)
    }

    fn index_columns(&self, index: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(INDEX_INFO)?;
        let rows = stmt.query_map([index], |row| row.get::<_, Option<String>>(0))?;

        let mut columns = Vec::new();
        for row in rows {
            // Expression members have no column name; keep them so the
            // member count stays accurate
            columns.push(row?.unwrap_or_default());
        }
        Ok(columns)
    }
}

impl SchemaSource for SqliteSource<'_> {
    fn list_tables(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let mut names = Vec::new();

        if let Some(pattern) = pattern {
            let mut stmt = self
                .conn
                .prepare(&format!("{LIST_TABLES} AND name LIKE ?1"))?;
            let rows = stmt.query_map([pattern], |row| row.get::<_, String>(0))?;
            for row in rows {
                names.push(row?);
            }
        } else {
            let mut stmt = self.conn.prepare(LIST_TABLES)?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            for row in rows {
                names.push(row?);
            }
        }

        let module_tables = self.module_tables()?;
        names.retain(|name| {
            let skip = module_tables.contains(name);
            if skip {
                warn!("Skipping virtual or shadow table '{}'", name);
            }
            !skip
        });

        Ok(names)
    }

    fn column_metadata(&self, table: &str) -> Result<Vec<ColumnMetadata>> {
        let mut columns = Vec::new();
        for (column, hidden) in self.xinfo(table)? {
            if hidden {
                warn!(
                    "Leaving generated column '{}' of table '{}' out of the backup",
                    column.name, table
                );
            } else {
                columns.push(column);
            }
        }

        let primary: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.primary_key_position > 0)
            .map(|(i, _)| i)
            .collect();
        if let [only] = primary.as_slice() {
            if self.uses_autoincrement(table)? {
                columns[*only].auto_increment = true;
            }
        }

        debug!("Read {} column(s) of table '{}'", columns.len(), table);
        Ok(columns)
    }

    fn index_metadata(&self, table: &str) -> Result<Vec<IndexMetadata>> {
        let mut stmt = self.conn.prepare(INDEX_LIST)?;
        let rows = stmt.query_map([table], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)? != 0,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut listed = Vec::new();
        for row in rows {
            listed.push(row?);
        }

        let mut indexes = Vec::with_capacity(listed.len());
        for (name, unique, origin) in listed {
            let origin = match origin.as_str() {
                "pk" => IndexOrigin::PrimaryKey,
                "u" => IndexOrigin::Unique,
                _ => IndexOrigin::Created,
            };
            let columns = self.index_columns(&name)?;
            indexes.push(IndexMetadata {
                name,
                unique,
                origin,
                columns,
            });
        }

        Ok(indexes)
    }

    fn select_rows(&self, table: &str) -> Result<Vec<Row>> {
        let columns = self.stored_column_names(table)?;
        let projection = if columns.is_empty() {
            "*".to_string()
        } else {
            columns
                .iter()
                .map(|name| Dialect::Sqlite.quote_identifier(name))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let sql = format!(
            "SELECT {projection} FROM {}",
            Dialect::Sqlite.quote_identifier(table)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut results = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Row::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                values.push(name.as_str(), SqlValue::from(row.get_ref(i)?));
            }
            results.push(values);
        }

        debug!("Selected {} row(s) from table '{}'", results.len(), table);
        Ok(results)
    }
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(n) => SqlValue::Integer(n),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => SqlValue::Text(text.to_string()),
                Err(_) => SqlValue::TextBytes(bytes.to_vec()),
            },
            ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
        }
    }
}

/// Case-insensitive whole-word search in a SQL text
fn has_keyword(sql: &str, keyword: &str) -> bool {
    sql.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|word| word.eq_ignore_ascii_case(keyword))
}
