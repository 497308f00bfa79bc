//! Backup command implementation

use std::path::PathBuf;

use tracing::info;

use super::open_read_only;
use crate::cli::error::CliError;
use crate::config::BackupConfig;
use crate::database::SqliteSource;
use crate::export::{BackupGenerator, Dialect};

/// Arguments for the `backup` command; unset fields fall back to the config file
pub struct BackupArgs {
    pub database: Option<PathBuf>,
    /// Back up only this table
    pub table: Option<String>,
    pub like: Option<String>,
    pub dialect: Option<Dialect>,
    pub schema_only: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl BackupArgs {
    /// Merge command-line flags over the config file
    pub fn resolve_config(&self) -> Result<BackupConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => BackupConfig::from_file(path)?,
            None => BackupConfig::default(),
        };

        if let Some(database) = &self.database {
            config.database = Some(database.clone());
        }
        if let Some(like) = &self.like {
            config.like = Some(like.clone());
        }
        if let Some(dialect) = self.dialect {
            config.dialect = dialect;
        }
        if self.schema_only {
            config.include_rows = false;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }

        Ok(config)
    }
}

/// Handle the `backup` command
pub fn handle_backup(args: &BackupArgs) -> Result<(), CliError> {
    let config = args.resolve_config()?;
    let database = config.database.clone().ok_or_else(|| {
        CliError::InvalidArgument(
            "no database given (pass a path or set `database` in the config file)".to_string(),
        )
    })?;

    let conn = open_read_only(&database)?;
    let source = SqliteSource::new(&conn);
    let generator = BackupGenerator::with_options(&source, config.options());

    let script = match &args.table {
        Some(table) => generator.table_backup(table)?,
        None => generator.backup()?,
    };

    match &config.output {
        Some(path) => {
            let mut content = script;
            content.push('\n');
            std::fs::write(path, content)
                .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
            info!("Wrote backup of {} to {}", database.display(), path.display());
        }
        None => println!("{script}"),
    }

    Ok(())
}
