//! Row serializer for generating INSERT statements from table rows.
//!
//! # Security
//!
//! Values never reach the output by plain concatenation: each one is rendered
//! through [`RowSerializer::literal`], which quotes and escapes text per
//! dialect and renders NULL as the bare `NULL` keyword. Identifiers go through
//! [`Dialect::quote_identifier`].

use super::Dialect;
use super::dialect::hex_literal;
use crate::error::{BackupError, Result};
use crate::introspect::validate_table_name;
use crate::models::{Row, SqlValue};

/// Serializer for INSERT statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowSerializer {
    dialect: Dialect,
}

impl RowSerializer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Render rows as one INSERT statement per row, joined by newlines.
    ///
    /// Each statement lists the columns in the row's own key order, so values
    /// always stay paired with the column they were read from. Returns an
    /// empty string when there are no rows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sqlite_backup_sdk::export::{Dialect, RowSerializer};
    /// use sqlite_backup_sdk::models::{Row, SqlValue};
    ///
    /// let rows = vec![Row::new().with("id", 1).with("name", "O'Brien").with("email", SqlValue::Null)];
    /// let sql = RowSerializer::new(Dialect::Sqlite).serialize("users", &rows).unwrap();
    /// assert_eq!(
    ///     sql,
    ///     "INSERT INTO \"users\" (\"id\", \"name\", \"email\") VALUES (1, 'O''Brien', NULL);"
    /// );
    /// ```
    pub fn serialize(&self, table: &str, rows: &[Row]) -> Result<String> {
        validate_table_name(table)?;
        if rows.is_empty() {
            return Ok(String::new());
        }

        let table_ident = self.dialect.quote_identifier(table);
        let mut statements = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(BackupError::InvalidArgument(format!(
                    "row {index} of table '{table}' has no columns"
                )));
            }

            let columns: Vec<String> = row
                .columns()
                .map(|c| self.dialect.quote_identifier(c))
                .collect();
            let values: Vec<String> = row.values().map(|v| self.literal(v)).collect();

            statements.push(format!(
                "INSERT INTO {table_ident} ({}) VALUES ({});",
                columns.join(", "),
                values.join(", ")
            ));
        }

        Ok(statements.join("\n"))
    }

    /// Render one value as a literal of the target dialect
    pub fn literal(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(n) => n.to_string(),
            SqlValue::Real(f) => self.real_literal(*f),
            SqlValue::Text(text) => self.dialect.quote_text(text),
            SqlValue::Blob(bytes) => hex_literal(bytes),
            SqlValue::TextBytes(bytes) => self.dialect.text_bytes_literal(bytes),
        }
    }

    fn real_literal(&self, value: f64) -> String {
        if value.is_nan() {
            return "NULL".to_string();
        }
        if value.is_infinite() {
            // SQLite reads an overflowing literal back as +/-Inf
            return match (self.dialect, value.is_sign_positive()) {
                (Dialect::Sqlite, true) => "9.0e999".to_string(),
                (Dialect::Sqlite, false) => "-9.0e999".to_string(),
                (Dialect::Mysql, _) => "NULL".to_string(),
            };
        }
        // Debug keeps a decimal point or exponent and round-trips exactly
        format!("{value:?}")
    }
}
