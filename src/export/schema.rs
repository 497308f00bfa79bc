//! Schema serializer for generating CREATE TABLE statements from introspected
//! table schemas.
//!
//! # Security
//!
//! Table and column names are quoted and escaped through
//! [`Dialect::quote_identifier`].

use tracing::debug;

use super::Dialect;
use crate::error::{BackupError, Result};
use crate::models::{ColumnDescriptor, KeyRole, TableSchema};

/// Serializer for CREATE TABLE statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaSerializer {
    dialect: Dialect,
}

impl SchemaSerializer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Render a table schema as a CREATE TABLE statement.
    ///
    /// Columns are emitted in schema order, each as name, type, length,
    /// attribute, nullability, default and auto-increment. Key clauses follow
    /// the columns: one PRIMARY clause, one UNIQUE clause per unique column and
    /// one KEY clause per multi-value column. SQLite has no inline KEY clause,
    /// so those become `CREATE INDEX` statements after the table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sqlite_backup_sdk::export::{Dialect, SchemaSerializer};
    /// use sqlite_backup_sdk::models::{ColumnDescriptor, KeyRole, TableSchema};
    ///
    /// let schema = TableSchema::new(
    ///     "users",
    ///     vec![ColumnDescriptor::new("id", "INTEGER").with_key_role(KeyRole::Primary)],
    /// )
    /// .unwrap();
    ///
    /// let sql = SchemaSerializer::new(Dialect::Sqlite).serialize(&schema).unwrap();
    /// assert_eq!(sql, "CREATE TABLE \"users\" (\n  \"id\" INTEGER,\n  PRIMARY KEY (\"id\")\n);");
    /// ```
    pub fn serialize(&self, schema: &TableSchema) -> Result<String> {
        if schema.columns.is_empty() {
            return Err(BackupError::EmptySchema(schema.name.clone()));
        }

        let table = self.dialect.quote_identifier(&schema.name);

        let mut parts: Vec<String> = schema
            .columns
            .iter()
            .map(|column| format!("  {}", self.column_definition(column)))
            .collect();

        for column in &schema.columns {
            if let Some(clause) = self.key_clause(column) {
                parts.push(format!("  {clause}"));
            }
        }

        let mut sql = format!("CREATE TABLE {table} (\n{}\n);", parts.join(",\n"));

        if self.dialect == Dialect::Sqlite {
            for column in schema
                .columns
                .iter()
                .filter(|c| c.key_role == KeyRole::MultiValue)
            {
                let index = column
                    .index_name
                    .clone()
                    .unwrap_or_else(|| generated_index_name(&schema.name, &column.name));
                sql.push_str(&format!(
                    "\nCREATE INDEX {} ON {table} ({});",
                    self.dialect.quote_identifier(&index),
                    self.dialect.quote_identifier(&column.name)
                ));
            }
        }

        Ok(sql)
    }

    fn column_definition(&self, column: &ColumnDescriptor) -> String {
        let mut def = self.dialect.quote_identifier(&column.name);

        let column_type = column.render_type();
        if !column_type.is_empty() {
            def.push(' ');
            def.push_str(&column_type);
        }

        if !column.nullable {
            def.push_str(" NOT NULL");
        }

        if let Some(default) = &column.default_value {
            def.push_str(" DEFAULT ");
            def.push_str(&render_default(default));
        }

        if column.auto_increment {
            match self.dialect {
                // SQLite only accepts AUTOINCREMENT on an inline INTEGER PRIMARY KEY
                Dialect::Sqlite if column.key_role == KeyRole::Primary => {
                    def.push_str(" PRIMARY KEY ");
                    def.push_str(self.dialect.auto_increment_keyword());
                }
                Dialect::Sqlite => {
                    debug!(
                        "Dropping auto-increment on non-primary column '{}'",
                        column.name
                    );
                }
                Dialect::Mysql => {
                    def.push(' ');
                    def.push_str(self.dialect.auto_increment_keyword());
                }
            }
        }

        def
    }

    fn key_clause(&self, column: &ColumnDescriptor) -> Option<String> {
        let name = self.dialect.quote_identifier(&column.name);
        match (column.key_role, self.dialect) {
            (KeyRole::Primary, Dialect::Sqlite) if column.auto_increment => None,
            (KeyRole::Primary, _) => Some(format!("PRIMARY KEY ({name})")),
            (KeyRole::Unique, Dialect::Sqlite) => Some(format!("UNIQUE ({name})")),
            (KeyRole::Unique, Dialect::Mysql) => Some(format!("UNIQUE KEY {name} ({name})")),
            (KeyRole::MultiValue, Dialect::Mysql) => {
                let key = column
                    .index_name
                    .as_deref()
                    .map_or_else(|| name.clone(), |index| self.dialect.quote_identifier(index));
                Some(format!("KEY {key} ({name})"))
            }
            (KeyRole::MultiValue, Dialect::Sqlite) | (KeyRole::None, _) => None,
        }
    }
}

/// Index name for a multi-value column that carries no catalog name. The
/// table name's length is part of the name so two table/column pairs never
/// produce the same text.
fn generated_index_name(table: &str, column: &str) -> String {
    format!("idx{}_{table}_{column}", table.chars().count())
}

/// Render a catalog default expression so it re-parses inside a column
/// definition. Literals are emitted as-is, anything else is parenthesized.
fn render_default(expr: &str) -> String {
    let expr = expr.trim();
    if is_literal(expr) || is_parenthesized(expr) {
        expr.to_string()
    } else {
        format!("({expr})")
    }
}

fn is_literal(expr: &str) -> bool {
    const KEYWORDS: [&str; 6] = [
        "NULL",
        "TRUE",
        "FALSE",
        "CURRENT_TIME",
        "CURRENT_DATE",
        "CURRENT_TIMESTAMP",
    ];

    if KEYWORDS.iter().any(|k| expr.eq_ignore_ascii_case(k)) {
        return true;
    }

    if is_numeric_literal(expr) {
        return true;
    }

    let quoted = expr
        .strip_prefix(['x', 'X'])
        .unwrap_or(expr);
    is_string_literal(quoted)
}

/// Signed decimal number as SQL spells it: digits with an optional fraction
/// and exponent. Words such as `inf` or `nan` are not numbers here.
fn is_numeric_literal(expr: &str) -> bool {
    let unsigned = expr.strip_prefix(['-', '+']).unwrap_or(expr);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(['-', '+']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

/// A single-quoted literal whose inner quotes are all doubled
fn is_string_literal(expr: &str) -> bool {
    let Some(inner) = expr
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    else {
        return false;
    };
    inner.replace("''", "").find('\'').is_none()
}

/// Whether the whole expression is wrapped in one pair of parentheses
fn is_parenthesized(expr: &str) -> bool {
    if !expr.starts_with('(') {
        return false;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    for (i, c) in expr.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == expr.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
