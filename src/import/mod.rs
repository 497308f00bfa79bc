//! Import functionality
//!
//! Applies backup scripts to a fresh database.

pub mod script;

// Re-export for convenience
pub use script::ScriptImporter;
