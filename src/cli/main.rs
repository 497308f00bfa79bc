use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlite_backup_sdk::Dialect;
use sqlite_backup_sdk::cli::commands::backup::{BackupArgs, handle_backup};
use sqlite_backup_sdk::cli::commands::inspect::{
    ColumnsArgs, TablesArgs, handle_columns, handle_primary_key, handle_tables,
};
use sqlite_backup_sdk::cli::commands::restore::handle_restore;
use sqlite_backup_sdk::cli::commands::verify::handle_verify;
use sqlite_backup_sdk::cli::output::OutputFormat;
use sqlite_backup_sdk::cli::{CliError, setup_logging};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "schema-backup",
    version,
    about = "Introspect SQLite databases and generate backup scripts"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables in catalog order
    Tables {
        database: PathBuf,
        /// SQL LIKE pattern, e.g. "user%"
        #[arg(long)]
        like: Option<String>,
    },
    /// Describe the columns of a table
    Columns {
        database: PathBuf,
        table: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the primary key column of a table
    PrimaryKey { database: PathBuf, table: String },
    /// Generate a backup script (schema and rows)
    Backup {
        /// Database file; may instead come from the config file
        database: Option<PathBuf>,
        /// Back up a single table
        #[arg(long)]
        table: Option<String>,
        #[arg(long, conflicts_with = "table")]
        like: Option<String>,
        /// sqlite or mysql
        #[arg(long)]
        dialect: Option<Dialect>,
        /// Omit INSERT statements
        #[arg(long)]
        schema_only: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Check that a script parses; "-" reads stdin
    Verify {
        input: String,
        #[arg(long, default_value = "sqlite")]
        dialect: Dialect,
    },
    /// Replay a script into an empty database; "-" reads stdin
    Restore { script: String, database: PathBuf },
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Tables { database, like } => {
            handle_tables(&TablesArgs { database, like }).context("tables command failed")?
        }
        Commands::Columns {
            database,
            table,
            format,
        } => handle_columns(&ColumnsArgs {
            database,
            table,
            format,
        })
        .context("columns command failed")?,
        Commands::PrimaryKey { database, table } => handle_primary_key(&ColumnsArgs {
            database,
            table,
            format: OutputFormat::Text,
        })
        .context("primary-key command failed")?,
        Commands::Backup {
            database,
            table,
            like,
            dialect,
            schema_only,
            output,
            config,
        } => handle_backup(&BackupArgs {
            database,
            table,
            like,
            dialect,
            schema_only,
            output,
            config,
        })
        .context("backup failed")?,
        Commands::Verify { input, dialect } => {
            handle_verify(&input, dialect).with_context(|| format!("verification of {input} failed"))?
        }
        Commands::Restore { script, database } => handle_restore(&script, &database)
            .with_context(|| format!("restore into {} failed", database.display()))?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("{:?}", err);
            match err.downcast_ref::<CliError>() {
                Some(cli_error) => eprintln!("❌ {}", cli_error.user_message()),
                None => eprintln!("❌ {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
