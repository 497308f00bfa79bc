//! CLI module for the schema-backup binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;

use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr log subscriber; stdout is reserved for scripts
pub fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}
