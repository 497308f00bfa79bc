//! Serializer tests

use sqlite_backup_sdk::export::{Dialect, RowSerializer, SchemaSerializer};
use sqlite_backup_sdk::models::{ColumnDescriptor, KeyRole, Row, SqlValue, TableSchema};
use sqlite_backup_sdk::BackupError;

fn users_schema() -> TableSchema {
    TableSchema::new(
        "users",
        vec![
            ColumnDescriptor::new("id", "INTEGER")
                .with_nullable(false)
                .with_auto_increment(true)
                .with_key_role(KeyRole::Primary),
            ColumnDescriptor::new("name", "VARCHAR(50)").with_nullable(false),
            ColumnDescriptor::new("email", "VARCHAR(100)")
                .with_default("NULL")
                .with_key_role(KeyRole::Unique),
            ColumnDescriptor::new("country", "CHAR(2)").with_key_role(KeyRole::MultiValue),
        ],
    )
    .unwrap()
}

mod schema_serializer_tests {
    use super::*;

    #[test]
    fn test_sqlite_schema() {
        let sql = SchemaSerializer::new(Dialect::Sqlite)
            .serialize(&users_schema())
            .unwrap();

        assert_eq!(
            sql,
            "CREATE TABLE \"users\" (\n\
             \x20 \"id\" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,\n\
             \x20 \"name\" VARCHAR(50) NOT NULL,\n\
             \x20 \"email\" VARCHAR(100) DEFAULT NULL,\n\
             \x20 \"country\" CHAR(2),\n\
             \x20 UNIQUE (\"email\")\n\
             );\n\
             CREATE INDEX \"idx5_users_country\" ON \"users\" (\"country\");"
        );
    }

    #[test]
    fn test_mysql_schema() {
        let sql = SchemaSerializer::new(Dialect::Mysql)
            .serialize(&users_schema())
            .unwrap();

        assert_eq!(
            sql,
            "CREATE TABLE `users` (\n\
             \x20 `id` INTEGER NOT NULL AUTO_INCREMENT,\n\
             \x20 `name` VARCHAR(50) NOT NULL,\n\
             \x20 `email` VARCHAR(100) DEFAULT NULL,\n\
             \x20 `country` CHAR(2),\n\
             \x20 PRIMARY KEY (`id`),\n\
             \x20 UNIQUE KEY `email` (`email`),\n\
             \x20 KEY `country` (`country`)\n\
             );"
        );
    }

    #[test]
    fn test_exactly_one_primary_clause() {
        let sql = SchemaSerializer::new(Dialect::Mysql)
            .serialize(&users_schema())
            .unwrap();
        assert_eq!(sql.matches("PRIMARY KEY").count(), 1);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let serializer = SchemaSerializer::new(Dialect::Sqlite);
        let schema = users_schema();
        assert_eq!(
            serializer.serialize(&schema).unwrap(),
            serializer.serialize(&schema).unwrap()
        );
    }

    #[test]
    fn test_empty_schema_fails() {
        let schema = TableSchema::new("nothing", Vec::new()).unwrap();
        let result = SchemaSerializer::default().serialize(&schema);
        assert!(matches!(result, Err(BackupError::EmptySchema(name)) if name == "nothing"));
    }

    #[test]
    fn test_expression_default_is_parenthesized() {
        let schema = TableSchema::new(
            "stamps",
            vec![ColumnDescriptor::new("at", "INTEGER").with_default("strftime('%s','now')")],
        )
        .unwrap();
        let sql = SchemaSerializer::default().serialize(&schema).unwrap();
        assert!(sql.contains("\"at\" INTEGER DEFAULT (strftime('%s','now'))"));
    }
}

mod row_serializer_tests {
    use super::*;

    #[test]
    fn test_null_is_keyword_not_string() {
        let rows = vec![Row::new()
            .with("id", 1)
            .with("name", "Ann")
            .with("email", SqlValue::Null)];
        let sql = RowSerializer::new(Dialect::Sqlite)
            .serialize("users", &rows)
            .unwrap();

        assert_eq!(
            sql,
            "INSERT INTO \"users\" (\"id\", \"name\", \"email\") VALUES (1, 'Ann', NULL);"
        );
        assert!(!sql.contains("'NULL'"));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let rows = vec![Row::new().with("name", "O'Brien")];

        let sqlite = RowSerializer::new(Dialect::Sqlite)
            .serialize("people", &rows)
            .unwrap();
        assert_eq!(sqlite, "INSERT INTO \"people\" (\"name\") VALUES ('O''Brien');");

        let mysql = RowSerializer::new(Dialect::Mysql)
            .serialize("people", &rows)
            .unwrap();
        assert_eq!(mysql, "INSERT INTO `people` (`name`) VALUES ('O''Brien');");
    }

    #[test]
    fn test_one_statement_per_row() {
        let rows = vec![
            Row::new().with("id", 1),
            Row::new().with("id", 2),
            Row::new().with("id", 3),
        ];
        let sql = RowSerializer::default().serialize("t", &rows).unwrap();
        assert_eq!(sql.lines().count(), 3);
        assert!(sql.lines().all(|line| line.starts_with("INSERT INTO \"t\"")));
    }

    #[test]
    fn test_rows_with_different_key_order() {
        let rows = vec![
            Row::new().with("a", 1).with("b", "x"),
            Row::new().with("b", "y").with("a", 2),
        ];
        let sql = RowSerializer::default().serialize("t", &rows).unwrap();
        let lines: Vec<&str> = sql.lines().collect();

        assert_eq!(lines[0], "INSERT INTO \"t\" (\"a\", \"b\") VALUES (1, 'x');");
        assert_eq!(lines[1], "INSERT INTO \"t\" (\"b\", \"a\") VALUES ('y', 2);");
    }

    #[test]
    fn test_value_literals() {
        let serializer = RowSerializer::new(Dialect::Sqlite);
        assert_eq!(serializer.literal(&SqlValue::Real(1.5)), "1.5");
        assert_eq!(serializer.literal(&SqlValue::Real(2.0)), "2.0");
        assert_eq!(serializer.literal(&SqlValue::Blob(vec![0xde, 0xad])), "X'DEAD'");
        assert_eq!(serializer.literal(&SqlValue::Integer(-7)), "-7");
    }

    #[test]
    fn test_invalid_table_name() {
        let rows = vec![Row::new().with("id", 1)];
        let result = RowSerializer::default().serialize("", &rows);
        assert!(matches!(result, Err(BackupError::InvalidArgument(_))));
    }
}
