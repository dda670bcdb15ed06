//! Declarative, immutable record schemas.
//!
//! A schema is a named set of typed properties. [`compose`] freezes a schema,
//! merging in the schemas of any composed types it extends, and returns a
//! [`RecordFactory`] that turns raw input into validated [`Record`]s:
//! - [`Type`] — primitive coercions, plain constructors, and composed record types
//! - [`TypeDescriptor`] / [`Property`] — a field's type, default, nested item typing
//!   and nullability
//! - [`Schema`] — the frozen property collection of a composed type
//! - [`Composer`] — composition with an injected [`RecordBackend`]
//! - [`Diagnostic`] — non-fatal problems found while composing
//!
//! Resolution is synchronous and pure. Schemas and factories are immutable
//! once built and can be shared across threads freely.

mod compose;
mod descriptor;
mod diagnostic;
mod error;
mod factory;
mod generic;
mod instantiate;
mod property;
mod types;

pub use compose::{ComposeOptions, Composer, Composition, compose};
pub use descriptor::{Property, PropertyCollection, Schema, TypeDescriptor};
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use factory::RecordFactory;
pub use generic::resolve_generic;
pub use instantiate::instantiate;
pub use property::resolve_property;
pub use types::{Constructor, Primitive, Type};

pub use recordkit_value::{Fields, ImmutableRecords, Record, RecordBackend, RecordConstructor, Value};

/// `None` and `Value::Null` both mean "no value supplied".
pub(crate) fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}
