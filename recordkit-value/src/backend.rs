//! Record constructor-builders.
//!
//! Schemas never build records directly. They hand a default-values snapshot
//! to a [`RecordBackend`] once, at composition time, and call the returned
//! [`RecordConstructor`] for every instance.

use crate::{Fields, Record};
use std::sync::Arc;

/// Builds named record constructors from a default-values snapshot.
pub trait RecordBackend: Send + Sync {
    /// Defines a record type called `name` whose key set and defaults are
    /// given by `defaults`.
    fn define(&self, name: &str, defaults: Fields) -> Arc<dyn RecordConstructor>;
}

/// Constructs instances of one record type.
pub trait RecordConstructor: Send + Sync {
    fn name(&self) -> &str;

    /// The default-values snapshot this type was defined with.
    fn defaults(&self) -> &Fields;

    /// Builds an instance from a full values mapping.
    fn construct(&self, values: Fields) -> Record;
}

/// The default backend.
///
/// Supplied values are laid over the defaults. Keys the defaults do not
/// declare are dropped, so an instance always has exactly the declared keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmutableRecords;

impl RecordBackend for ImmutableRecords {
    fn define(&self, name: &str, defaults: Fields) -> Arc<dyn RecordConstructor> {
        Arc::new(ImmutableRecordType {
            name: Arc::from(name),
            defaults: Arc::new(defaults),
        })
    }
}

#[derive(Debug)]
struct ImmutableRecordType {
    name: Arc<str>,
    defaults: Arc<Fields>,
}

impl RecordConstructor for ImmutableRecordType {
    fn name(&self) -> &str {
        &self.name
    }

    fn defaults(&self) -> &Fields {
        &self.defaults
    }

    fn construct(&self, values: Fields) -> Record {
        let mut fields = (*self.defaults).clone();
        for (key, value) in values {
            if let Some(slot) = fields.get_mut(&key) {
                *slot = value;
            }
        }
        Record::from_parts(Arc::clone(&self.name), Arc::clone(&self.defaults), fields)
    }
}
