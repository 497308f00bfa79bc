//! Validation functionality
//!
//! Provides syntax checks for generated backup scripts.

pub mod script;

pub use script::{ScriptSummary, validate_script};
