//! Dynamic value model and persistent record primitive for recordkit.
//!
//! This crate is the storage layer that record schemas build on:
//! - [`Value`] — the tagged input/output tree (scalars, sequences, keyed mappings, records)
//! - [`Record`] — a named, immutable keyed value with structural equality
//! - [`RecordBackend`] / [`RecordConstructor`] — the constructor-builder seam that
//!   turns a default-values snapshot into a record constructor
//! - [`ImmutableRecords`] — the default backend
//!
//! The input shape of a value is decided once, when it is converted into a
//! [`Value`] (for example from `serde_json::Value`). Consumers match on the
//! variants instead of probing shapes again at every level.

mod backend;
mod record;
mod value;

use std::collections::BTreeMap;

pub use backend::{ImmutableRecords, RecordBackend, RecordConstructor};
pub use record::Record;
pub use value::Value;

/// Field name to value mapping, used for record fields and keyed mappings.
pub type Fields = BTreeMap<String, Value>;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in record operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cannot set unknown field `{field}` on record `{record}`")]
    UnknownField { record: String, field: String },
}
