use crate::{
    Error, Fields, Record, RecordConstructor, Result, Schema, Value, present, resolve_property,
};
use std::fmt;
use std::sync::Arc;

/// Builds instances of one composed record type.
///
/// Cloning is cheap and every clone refers to the same type: equality is
/// identity, not structure.
#[derive(Clone)]
pub struct RecordFactory {
    inner: Arc<FactoryInner>,
}

struct FactoryInner {
    name: String,
    schema: Schema,
    constructor: Arc<dyn RecordConstructor>,
}

impl RecordFactory {
    pub(crate) fn new(
        name: String,
        schema: Schema,
        constructor: Arc<dyn RecordConstructor>,
    ) -> Self {
        Self {
            inner: Arc::new(FactoryInner {
                name,
                schema,
                constructor,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The frozen schema, usable as an `extends` source.
    #[must_use]
    pub fn describe(&self) -> &Schema {
        &self.inner.schema
    }

    /// The default-values snapshot computed at composition time.
    #[must_use]
    pub fn defaults(&self) -> &Fields {
        self.inner.constructor.defaults()
    }

    /// Resolves every declared property against `values` and builds the record.
    ///
    /// `values` may be absent, a mapping, or an existing record whose fields
    /// are used as input. Entries that do not name a declared property are
    /// ignored.
    pub fn create(&self, values: Option<Value>) -> Result<Record> {
        let mut input = match present(values) {
            None => Fields::new(),
            Some(Value::Mapping(entries)) => entries,
            Some(Value::Record(record)) => record.fields().clone(),
            Some(other) => {
                return Err(Error::InvalidInput {
                    record: self.inner.name.clone(),
                    kind: other.kind(),
                });
            }
        };

        let resolved = self
            .inner
            .schema
            .iter()
            .map(|(name, property)| {
                Ok((name.to_owned(), resolve_property(property, input.remove(name))?))
            })
            .collect::<Result<Fields>>()?;

        Ok(self.inner.constructor.construct(resolved))
    }

    /// [`create`](Self::create) from JSON input.
    pub fn create_from_json(&self, values: serde_json::Value) -> Result<Record> {
        self.create(Some(Value::from(values)))
    }
}

impl PartialEq for RecordFactory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for RecordFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFactory")
            .field("name", &self.inner.name)
            .field("properties", &self.inner.schema.names().collect::<Vec<_>>())
            .finish()
    }
}
