//! Table model for the SDK

use super::column::{ColumnDescriptor, KeyRole};
use super::value::Row;
use crate::error::{BackupError, Result};
use serde::{Deserialize, Serialize};

/// Ordered column layout of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Create a table schema.
    ///
    /// Fails with `InvalidArgument` when more than one column carries the
    /// primary key role; composite primary keys are not modelled.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Result<Self> {
        let name = name.into();
        let primary: Vec<&str> = columns
            .iter()
            .filter(|c| c.key_role == KeyRole::Primary)
            .map(|c| c.name.as_str())
            .collect();
        if primary.len() > 1 {
            return Err(BackupError::InvalidArgument(format!(
                "table '{}' has more than one primary key column ({})",
                name,
                primary.join(", ")
            )));
        }
        Ok(Self { name, columns })
    }

    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|c| c.key_role == KeyRole::Primary)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Schema plus row data of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub schema: TableSchema,
    pub rows: Vec<Row>,
}

impl TableSnapshot {
    pub fn new(schema: TableSchema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }
}

/// Every table of a database, in table-listing order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub tables: Vec<TableSnapshot>,
}

impl BackupDocument {
    pub fn new(tables: Vec<TableSnapshot>) -> Self {
        Self { tables }
    }

    pub fn table(&self, name: &str) -> Option<&TableSnapshot> {
        self.tables.iter().find(|t| t.name() == name)
    }

    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }
}
