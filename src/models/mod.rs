//! Models module for the SDK
//!
//! Defines the structures produced by introspection and consumed by the
//! serializers. A `BackupDocument` only lives for one backup request; its
//! rendered text is what callers keep.

pub mod column;
pub mod table;
pub mod value;

pub use column::{ColumnDescriptor, DeclaredType, KeyRole};
pub use table::{BackupDocument, TableSchema, TableSnapshot};
pub use value::{Row, SqlValue};
