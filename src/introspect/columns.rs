//! Column introspection

use std::collections::HashMap;

use tracing::{debug, warn};

use super::validate_table_name;
use crate::database::{ColumnMetadata, IndexMetadata, IndexOrigin, SchemaSource};
use crate::error::{BackupError, Result};
use crate::models::{ColumnDescriptor, KeyRole};

/// Reads the ordered column descriptors of a table
pub struct ColumnIntrospector<'a, S: SchemaSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SchemaSource + ?Sized> ColumnIntrospector<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Return the columns of `table` in physical order.
    ///
    /// Key roles come only from what the catalog reports: the primary-key flag
    /// yields `Primary`, a single-column unique index yields `Unique` and a
    /// single-column plain index yields `MultiValue`. Everything else stays
    /// `None`.
    ///
    /// A table that does not exist has no columns and yields an empty list.
    pub fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        validate_table_name(table)?;

        let mut metadata = self
            .source
            .column_metadata(table)
            .map_err(|e| BackupError::introspection(table, e))?;
        metadata.sort_by_key(|c| c.position);

        if metadata.is_empty() {
            debug!("Table '{}' reported no columns", table);
            return Ok(Vec::new());
        }

        check_metadata(table, &metadata)?;

        let indexes = self
            .source
            .index_metadata(table)
            .map_err(|e| BackupError::introspection(table, e))?;
        let index_roles = index_key_roles(table, &indexes);

        let columns = metadata
            .into_iter()
            .map(|meta| {
                let (key_role, index_name) = if meta.primary_key_position > 0 {
                    (KeyRole::Primary, None)
                } else {
                    index_roles.get(&meta.name).cloned().unwrap_or_default()
                };

                let mut column = ColumnDescriptor::new(meta.name, meta.declared_type)
                    .with_nullable(!meta.not_null)
                    .with_auto_increment(meta.auto_increment)
                    .with_key_role(key_role);
                column.default_value = meta.default_value;
                column.index_name = index_name;
                column
            })
            .collect();

        Ok(columns)
    }

    /// Name of the primary key column, `None` when the table has none
    pub fn primary_key(&self, table: &str) -> Result<Option<String>> {
        Ok(self
            .columns(table)?
            .into_iter()
            .find(|c| c.key_role == KeyRole::Primary)
            .map(|c| c.name))
    }
}

fn check_metadata(table: &str, metadata: &[ColumnMetadata]) -> Result<()> {
    if let Some(column) = metadata.iter().find(|c| c.name.is_empty()) {
        return Err(BackupError::SchemaIntrospectionFailure {
            table: table.to_string(),
            reason: format!("column at position {} has no name", column.position),
        });
    }

    let primary: Vec<&str> = metadata
        .iter()
        .filter(|c| c.primary_key_position > 0)
        .map(|c| c.name.as_str())
        .collect();
    if primary.len() > 1 {
        return Err(BackupError::SchemaIntrospectionFailure {
            table: table.to_string(),
            reason: format!(
                "composite primary key ({}) is not supported",
                primary.join(", ")
            ),
        });
    }

    Ok(())
}

/// Map single-column indexes to key roles. Unique wins over multi-value when
/// a column has both; a multi-value role keeps the name of its index.
fn index_key_roles(
    table: &str,
    indexes: &[IndexMetadata],
) -> HashMap<String, (KeyRole, Option<String>)> {
    let mut roles: HashMap<String, (KeyRole, Option<String>)> = HashMap::new();

    for index in indexes {
        if index.origin == IndexOrigin::PrimaryKey {
            continue;
        }
        let [column] = index.columns.as_slice() else {
            warn!(
                "Index '{}' on table '{}' spans {} column(s); no key role assigned",
                index.name,
                table,
                index.columns.len()
            );
            continue;
        };

        let role = if index.unique {
            (KeyRole::Unique, None)
        } else {
            (KeyRole::MultiValue, Some(index.name.clone()))
        };
        // The first plain index of a column names its role
        let keep_existing = match roles.get(column) {
            Some((KeyRole::Unique, _)) => true,
            Some(_) => role.0 == KeyRole::MultiValue,
            None => false,
        };
        if !keep_existing {
            roles.insert(column.clone(), role);
        }
    }

    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    /// Canned metadata source
    #[derive(Default)]
    struct FakeSource {
        columns: Vec<ColumnMetadata>,
        indexes: Vec<IndexMetadata>,
        fail: bool,
    }

    impl SchemaSource for FakeSource {
        fn list_tables(&self, _pattern: Option<&str>) -> Result<Vec<String>> {
            Ok(vec!["t".to_string()])
        }

        fn column_metadata(&self, _table: &str) -> Result<Vec<ColumnMetadata>> {
            if self.fail {
                return Err(BackupError::Database("no such table".to_string()));
            }
            Ok(self.columns.clone())
        }

        fn index_metadata(&self, _table: &str) -> Result<Vec<IndexMetadata>> {
            Ok(self.indexes.clone())
        }

        fn select_rows(&self, _table: &str) -> Result<Vec<Row>> {
            Ok(Vec::new())
        }
    }

    fn meta(position: usize, name: &str, declared_type: &str, pk: u32) -> ColumnMetadata {
        ColumnMetadata {
            position,
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            not_null: false,
            default_value: None,
            primary_key_position: pk,
            auto_increment: false,
        }
    }

    #[test]
    fn test_columns_sorted_by_position() {
        let source = FakeSource {
            columns: vec![meta(1, "b", "TEXT", 0), meta(0, "a", "INTEGER", 1)],
            ..Default::default()
        };
        let columns = ColumnIntrospector::new(&source).columns("t").unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(columns[0].key_role, KeyRole::Primary);
    }

    #[test]
    fn test_unique_wins_over_multi_value() {
        let source = FakeSource {
            columns: vec![meta(0, "email", "TEXT", 0)],
            indexes: vec![
                IndexMetadata {
                    name: "plain".to_string(),
                    unique: false,
                    origin: IndexOrigin::Created,
                    columns: vec!["email".to_string()],
                },
                IndexMetadata {
                    name: "uniq".to_string(),
                    unique: true,
                    origin: IndexOrigin::Unique,
                    columns: vec!["email".to_string()],
                },
            ],
            ..Default::default()
        };
        let columns = ColumnIntrospector::new(&source).columns("t").unwrap();
        assert_eq!(columns[0].key_role, KeyRole::Unique);
        assert_eq!(columns[0].index_name, None);
    }

    #[test]
    fn test_multi_value_keeps_index_name() {
        let source = FakeSource {
            columns: vec![meta(0, "city", "TEXT", 0)],
            indexes: vec![IndexMetadata {
                name: "people_by_city".to_string(),
                unique: false,
                origin: IndexOrigin::Created,
                columns: vec!["city".to_string()],
            }],
            ..Default::default()
        };
        let columns = ColumnIntrospector::new(&source).columns("t").unwrap();
        assert_eq!(columns[0].key_role, KeyRole::MultiValue);
        assert_eq!(columns[0].index_name.as_deref(), Some("people_by_city"));
    }

    #[test]
    fn test_multi_column_index_assigns_nothing() {
        let source = FakeSource {
            columns: vec![meta(0, "a", "TEXT", 0), meta(1, "b", "TEXT", 0)],
            indexes: vec![IndexMetadata {
                name: "ab".to_string(),
                unique: true,
                origin: IndexOrigin::Created,
                columns: vec!["a".to_string(), "b".to_string()],
            }],
            ..Default::default()
        };
        let columns = ColumnIntrospector::new(&source).columns("t").unwrap();
        assert!(columns.iter().all(|c| c.key_role == KeyRole::None));
    }

    #[test]
    fn test_composite_primary_key_fails() {
        let source = FakeSource {
            columns: vec![meta(0, "a", "INTEGER", 1), meta(1, "b", "INTEGER", 2)],
            ..Default::default()
        };
        let result = ColumnIntrospector::new(&source).columns("t");
        assert!(matches!(
            result,
            Err(BackupError::SchemaIntrospectionFailure { .. })
        ));
    }

    #[test]
    fn test_metadata_error_becomes_introspection_failure() {
        let source = FakeSource {
            fail: true,
            ..Default::default()
        };
        let result = ColumnIntrospector::new(&source).columns("t");
        assert!(matches!(
            result,
            Err(BackupError::SchemaIntrospectionFailure { ref table, .. }) if table == "t"
        ));
    }

    #[test]
    fn test_empty_table_name_rejected() {
        let source = FakeSource::default();
        let result = ColumnIntrospector::new(&source).columns("  ");
        assert!(matches!(result, Err(BackupError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_primary_key_is_none() {
        let source = FakeSource {
            columns: vec![meta(0, "a", "TEXT", 0)],
            ..Default::default()
        };
        let pk = ColumnIntrospector::new(&source).primary_key("t").unwrap();
        assert_eq!(pk, None);
    }
}
