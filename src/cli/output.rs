//! Output formatting for CLI

use crate::cli::error::CliError;
use crate::models::{ColumnDescriptor, KeyRole};
use crate::validation::ScriptSummary;

/// Output format for structured results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One table name per line
pub fn format_tables(tables: &[String]) -> String {
    let mut output = String::new();
    for table in tables {
        output.push_str(table);
        output.push('\n');
    }
    output
}

/// Format a column listing
pub fn format_columns(
    table: &str,
    columns: &[ColumnDescriptor],
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(columns)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| CliError::SerializationError(e.to_string())),
        OutputFormat::Text => Ok(format_columns_text(table, columns)),
    }
}

fn format_columns_text(table: &str, columns: &[ColumnDescriptor]) -> String {
    let mut output = format!("Table: {table}\n");
    output.push_str(&format!("  Columns: {}\n", columns.len()));

    for col in columns {
        output.push_str(&format!("    - {} ({})\n", col.name, col.declared_type));
        match col.key_role {
            KeyRole::Primary => output.push_str("      Key: primary\n"),
            KeyRole::Unique => output.push_str("      Key: unique\n"),
            KeyRole::MultiValue => output.push_str("      Key: multi-value\n"),
            KeyRole::None => {}
        }
        if !col.nullable {
            output.push_str("      Nullable: false\n");
        }
        if let Some(default) = &col.default_value {
            output.push_str(&format!("      Default: {default}\n"));
        }
        if col.auto_increment {
            output.push_str("      Auto increment: true\n");
        }
    }

    output
}

/// Format a script verification summary
pub fn format_summary(summary: &ScriptSummary) -> String {
    format!(
        "Script is valid: {} statement(s)\n  CREATE TABLE: {}\n  CREATE INDEX: {}\n  INSERT: {}\n  Other: {}\n",
        summary.total(),
        summary.create_tables,
        summary.create_indexes,
        summary.inserts,
        summary.other
    )
}
