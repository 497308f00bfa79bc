//! Backup script verification using `sqlparser`

use serde::Serialize;
use sqlparser::ast::Statement;
use sqlparser::dialect::{MySqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;
use tracing::debug;

use crate::error::{BackupError, Result};
use crate::export::Dialect;

/// Statement counts of a parsed script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    pub create_tables: usize,
    pub create_indexes: usize,
    pub inserts: usize,
    pub other: usize,
}

impl ScriptSummary {
    pub fn total(&self) -> usize {
        self.create_tables + self.create_indexes + self.inserts + self.other
    }
}

/// Parse a backup script in `dialect` and count its statements.
///
/// Returns `InvalidArgument` with the parser message when the script does not
/// parse.
pub fn validate_script(script: &str, dialect: Dialect) -> Result<ScriptSummary> {
    let statements = match dialect {
        Dialect::Sqlite => Parser::parse_sql(&SQLiteDialect {}, script),
        Dialect::Mysql => Parser::parse_sql(&MySqlDialect {}, script),
    }
    .map_err(|e| BackupError::InvalidArgument(format!("SQL validation failed: {e}")))?;

    let mut summary = ScriptSummary::default();
    for statement in &statements {
        match statement {
            Statement::CreateTable(_) => summary.create_tables += 1,
            Statement::CreateIndex(_) => summary.create_indexes += 1,
            Statement::Insert(_) => summary.inserts += 1,
            _ => summary.other += 1,
        }
    }

    debug!("Validated script with {} statement(s)", summary.total());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_statements() {
        let script = "CREATE TABLE \"users\" (\n  \"id\" INTEGER,\n  \"name\" TEXT NOT NULL,\n  PRIMARY KEY (\"id\")\n);\n\n\
                      INSERT INTO \"users\" (\"id\", \"name\") VALUES (1, 'O''Brien');\n\
                      INSERT INTO \"users\" (\"id\", \"name\") VALUES (2, 'Ann');";
        let summary = validate_script(script, Dialect::Sqlite).unwrap();
        assert_eq!(summary.create_tables, 1);
        assert_eq!(summary.inserts, 2);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_counts_indexes() {
        let script = "CREATE TABLE \"t\" (\"a\" TEXT);\nCREATE INDEX \"t_a_idx\" ON \"t\" (\"a\");";
        let summary = validate_script(script, Dialect::Sqlite).unwrap();
        assert_eq!(summary.create_indexes, 1);
    }

    #[test]
    fn test_empty_script_is_valid() {
        assert_eq!(validate_script("", Dialect::Sqlite).unwrap().total(), 0);
    }

    #[test]
    fn test_syntax_error_rejected() {
        let result = validate_script("CREATE TABLE (", Dialect::Sqlite);
        assert!(matches!(result, Err(BackupError::InvalidArgument(_))));
    }
}
