//! Inspection commands: `tables`, `columns` and `primary-key`

use std::path::PathBuf;

use super::open_read_only;
use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_columns, format_tables};
use crate::database::SqliteSource;
use crate::introspect::{ColumnIntrospector, TableLister};

/// Arguments for the `tables` command
pub struct TablesArgs {
    /// Path to the database file
    pub database: PathBuf,
    /// LIKE pattern to filter by
    pub like: Option<String>,
}

/// Arguments for the `columns` and `primary-key` commands
pub struct ColumnsArgs {
    /// Path to the database file
    pub database: PathBuf,
    pub table: String,
    pub format: OutputFormat,
}

/// Handle the `tables` command
pub fn handle_tables(args: &TablesArgs) -> Result<(), CliError> {
    let conn = open_read_only(&args.database)?;
    let source = SqliteSource::new(&conn);

    let tables = TableLister::new(&source).tables(args.like.as_deref())?;
    print!("{}", format_tables(&tables));
    Ok(())
}

/// Handle the `columns` command
pub fn handle_columns(args: &ColumnsArgs) -> Result<(), CliError> {
    let conn = open_read_only(&args.database)?;
    let source = SqliteSource::new(&conn);

    let columns = ColumnIntrospector::new(&source).columns(&args.table)?;
    if columns.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "table '{}' not found in {}",
            args.table,
            args.database.display()
        )));
    }

    print!("{}", format_columns(&args.table, &columns, args.format)?);
    Ok(())
}

/// Handle the `primary-key` command
pub fn handle_primary_key(args: &ColumnsArgs) -> Result<(), CliError> {
    let conn = open_read_only(&args.database)?;
    let source = SqliteSource::new(&conn);

    match ColumnIntrospector::new(&source).primary_key(&args.table)? {
        Some(column) => println!("{column}"),
        None => eprintln!("Table '{}' has no primary key", args.table),
    }
    Ok(())
}
