//! Property types.
//!
//! A [`Type`] says how one property value is built:
//! - [`Primitive`] — a coercing factory with a no-argument default (`String`, `Number`, `Boolean`)
//! - [`Constructor`] — a plain constructor taking one optional value (`List`, `Map`, user types)
//! - [`RecordFactory`] — a composed record type
//!
//! Only composed record types can be extended.

use crate::{Error, Fields, RecordFactory, Result, Value};
use std::fmt;
use std::sync::{Arc, LazyLock};

type CoerceFn = dyn Fn(Option<&Value>) -> Result<Value> + Send + Sync;
type ConstructFn = dyn Fn(Option<Value>) -> Result<Value> + Send + Sync;

/// A validating, coercing factory.
///
/// Called with `None` it returns the type's canonical default. Called with a
/// value it either normalizes it or fails with [`Error::Coercion`].
/// Two primitives are equal when they share the same factory.
#[derive(Clone)]
pub struct Primitive {
    name: Arc<str>,
    coerce: Arc<CoerceFn>,
}

static STRING: LazyLock<Primitive> = LazyLock::new(|| Primitive::new("String", coerce_string));
static NUMBER: LazyLock<Primitive> = LazyLock::new(|| Primitive::new("Number", coerce_number));
static BOOLEAN: LazyLock<Primitive> = LazyLock::new(|| Primitive::new("Boolean", coerce_boolean));

impl Primitive {
    pub fn new(
        name: impl Into<Arc<str>>,
        coerce: impl Fn(Option<&Value>) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            coerce: Arc::new(coerce),
        }
    }

    /// Text. Numbers and booleans are formatted; defaults to `""`.
    #[must_use]
    pub fn string() -> Self {
        STRING.clone()
    }

    /// Numbers. Numeric strings are parsed and booleans map to 1/0; defaults to `0`.
    #[must_use]
    pub fn number() -> Self {
        NUMBER.clone()
    }

    /// Truthiness of any value; defaults to `false`.
    #[must_use]
    pub fn boolean() -> Self {
        BOOLEAN.clone()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coerce(&self, value: Option<&Value>) -> Result<Value> {
        (self.coerce)(value)
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.coerce, &other.coerce)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Primitive").field(&self.name).finish()
    }
}

fn coerce_string(value: Option<&Value>) -> Result<Value> {
    match value {
        None | Some(Value::Null) => Ok(Value::String(String::new())),
        Some(Value::String(s)) => Ok(Value::String(s.clone())),
        Some(Value::Bool(b)) => Ok(Value::String(b.to_string())),
        Some(Value::Number(n)) => Ok(Value::String(n.to_string())),
        Some(other) => Err(Error::coercion(
            "String",
            format!("a {} has no string form", other.kind()),
        )),
    }
}

fn coerce_number(value: Option<&Value>) -> Result<Value> {
    match value {
        None | Some(Value::Null) => Ok(Value::Number(0.0)),
        Some(Value::Number(n)) => Ok(Value::Number(*n)),
        Some(Value::Bool(b)) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(Value::Number(0.0));
            }
            trimmed
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| Error::coercion("Number", format!("`{s}` is not a number")))
        }
        Some(other) => Err(Error::coercion(
            "Number",
            format!("a {} is not a number", other.kind()),
        )),
    }
}

fn coerce_boolean(value: Option<&Value>) -> Result<Value> {
    Ok(Value::Bool(value.is_some_and(Value::is_truthy)))
}

/// A plain constructor taking one optional value.
///
/// Unlike a [`Primitive`], it is always called with the value as supplied,
/// falsy or not. Two constructors are equal when they share the same function.
#[derive(Clone)]
pub struct Constructor {
    name: Arc<str>,
    build: Arc<ConstructFn>,
}

static LIST: LazyLock<Constructor> = LazyLock::new(|| Constructor::new("List", build_list));
static MAP: LazyLock<Constructor> = LazyLock::new(|| Constructor::new("Map", build_map));

impl Constructor {
    pub fn new(
        name: impl Into<Arc<str>>,
        build: impl Fn(Option<Value>) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            build: Arc::new(build),
        }
    }

    /// Sequence container. Absent input builds an empty sequence.
    #[must_use]
    pub fn list() -> Self {
        LIST.clone()
    }

    /// Keyed mapping container. Records are flattened to their fields.
    #[must_use]
    pub fn map() -> Self {
        MAP.clone()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn construct(&self, value: Option<Value>) -> Result<Value> {
        (self.build)(value)
    }
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.build, &other.build)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constructor").field(&self.name).finish()
    }
}

fn build_list(value: Option<Value>) -> Result<Value> {
    match value {
        None | Some(Value::Null) => Ok(Value::Sequence(Vec::new())),
        Some(Value::Sequence(items)) => Ok(Value::Sequence(items)),
        Some(other) => Err(Error::coercion(
            "List",
            format!("expected a sequence, got {}", other.kind()),
        )),
    }
}

fn build_map(value: Option<Value>) -> Result<Value> {
    match value {
        None | Some(Value::Null) => Ok(Value::Mapping(Fields::new())),
        Some(Value::Mapping(entries)) => Ok(Value::Mapping(entries)),
        Some(Value::Record(record)) => Ok(Value::Mapping(record.fields().clone())),
        Some(other) => Err(Error::coercion(
            "Map",
            format!("expected a mapping, got {}", other.kind()),
        )),
    }
}

/// The declared type of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(Primitive),
    Class(Constructor),
    Composed(RecordFactory),
}

impl Type {
    #[must_use]
    pub fn string() -> Self {
        Self::Primitive(Primitive::string())
    }

    #[must_use]
    pub fn number() -> Self {
        Self::Primitive(Primitive::number())
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::Primitive(Primitive::boolean())
    }

    #[must_use]
    pub fn list() -> Self {
        Self::Class(Constructor::list())
    }

    #[must_use]
    pub fn map() -> Self {
        Self::Class(Constructor::map())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(primitive) => primitive.name(),
            Self::Class(constructor) => constructor.name(),
            Self::Composed(factory) => factory.name(),
        }
    }
}

impl From<Primitive> for Type {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<Constructor> for Type {
    fn from(constructor: Constructor) -> Self {
        Self::Class(constructor)
    }
}

impl From<RecordFactory> for Type {
    fn from(factory: RecordFactory) -> Self {
        Self::Composed(factory)
    }
}

impl From<&RecordFactory> for Type {
    fn from(factory: &RecordFactory) -> Self {
        Self::Composed(factory.clone())
    }
}
