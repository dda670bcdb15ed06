//! Error types for record construction.

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building defaults or instances.
///
/// Coercion failures come from a type's own factory and are passed through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A type rejected the value it was asked to build from.
    #[error("cannot build `{type_name}`: {reason}")]
    Coercion { type_name: String, reason: String },

    /// A record factory was given input that is not a keyed mapping.
    #[error("record `{record}` expects a mapping of values, got {kind}")]
    InvalidInput { record: String, kind: &'static str },

    /// Record primitive error.
    #[error(transparent)]
    Value(#[from] recordkit_value::Error),
}

impl Error {
    /// Shorthand for a [`Error::Coercion`].
    pub fn coercion(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Coercion {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
