//! Verify command implementation

use super::load_input;
use crate::cli::error::CliError;
use crate::cli::output::format_summary;
use crate::export::Dialect;
use crate::validation::validate_script;

/// Handle the `verify` command
pub fn handle_verify(input: &str, dialect: Dialect) -> Result<(), CliError> {
    let content = load_input(input)?;
    let summary = validate_script(&content, dialect)?;
    print!("{}", format_summary(&summary));
    Ok(())
}
