//! SQL dialects targeted by the serializers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BackupError;

/// Target dialect of a backup script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Sqlite,
    Mysql,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Mysql => "mysql",
        }
    }

    /// Quote and escape an identifier.
    ///
    /// # Security
    ///
    /// Quote characters inside the identifier are escaped by doubling them,
    /// so a crafted table or column name cannot terminate the quoting.
    ///
    /// - **SQLite**: double quotes (`"identifier"`)
    /// - **MySQL**: backticks (`` `identifier` ``)
    pub fn quote_identifier(&self, identifier: &str) -> String {
        match self {
            Dialect::Sqlite => format!("\"{}\"", identifier.replace('"', "\"\"")),
            Dialect::Mysql => format!("`{}`", identifier.replace('`', "``")),
        }
    }

    /// Quote and escape a text literal.
    ///
    /// MySQL treats backslash as an escape character inside string literals
    /// by default, so backslashes are doubled there and NUL becomes `\0`.
    /// SQLite's tokenizer stops at a NUL byte, so text containing one is
    /// written as a hex literal cast back to TEXT.
    pub fn quote_text(&self, text: &str) -> String {
        match self {
            Dialect::Sqlite if text.contains('\0') => self.text_bytes_literal(text.as_bytes()),
            Dialect::Sqlite => format!("'{}'", text.replace('\'', "''")),
            Dialect::Mysql => format!(
                "'{}'",
                text.replace('\\', "\\\\")
                    .replace('\'', "''")
                    .replace('\0', "\\0")
            ),
        }
    }

    /// Literal for TEXT content given as raw bytes, which need not be valid
    /// UTF-8. The bytes reach the database unchanged.
    pub fn text_bytes_literal(&self, bytes: &[u8]) -> String {
        match self {
            Dialect::Sqlite => format!("CAST({} AS TEXT)", hex_literal(bytes)),
            Dialect::Mysql => hex_literal(bytes),
        }
    }

    pub fn auto_increment_keyword(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "AUTOINCREMENT",
            Dialect::Mysql => "AUTO_INCREMENT",
        }
    }
}

/// `X'..'` literal with upper-case hex digits
pub(crate) fn hex_literal(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!("X'{hex}'")
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = BackupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mysql" | "mariadb" => Ok(Dialect::Mysql),
            other => Err(BackupError::InvalidArgument(format!(
                "unknown dialect '{other}' (expected 'sqlite' or 'mysql')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes() {
        assert_eq!(Dialect::Sqlite.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(Dialect::Mysql.quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_quote_text_escapes() {
        assert_eq!(Dialect::Sqlite.quote_text("O'Brien"), "'O''Brien'");
        assert_eq!(Dialect::Sqlite.quote_text("a\\b"), "'a\\b'");
        assert_eq!(Dialect::Mysql.quote_text("a\\b'c"), "'a\\\\b''c'");
    }

    #[test]
    fn test_quote_text_with_nul() {
        assert_eq!(Dialect::Sqlite.quote_text("a\0b"), "CAST(X'610062' AS TEXT)");
        assert_eq!(Dialect::Mysql.quote_text("a\0b"), "'a\\0b'");
    }

    #[test]
    fn test_text_bytes_literal() {
        assert_eq!(
            Dialect::Sqlite.text_bytes_literal(&[0xff, 0x41]),
            "CAST(X'FF41' AS TEXT)"
        );
        assert_eq!(Dialect::Mysql.text_bytes_literal(&[0xff, 0x41]), "X'FF41'");
    }

    #[test]
    fn test_parse_dialect() {
        assert_eq!("SQLite".parse::<Dialect>().unwrap(), Dialect::Sqlite);
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert!(matches!(
            "oracle".parse::<Dialect>(),
            Err(BackupError::InvalidArgument(_))
        ));
    }
}
