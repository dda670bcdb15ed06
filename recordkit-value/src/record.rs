//! Named immutable records.
//!
//! A record's key set is fixed by the default-values snapshot it was built
//! from. Every "mutation" returns a new record; fields are shared behind an
//! `Arc`, so cloning a record never copies its contents.

use crate::value::fields_to_json;
use crate::{Error, Fields, Result, Value};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// An immutable, named keyed value.
#[derive(Clone)]
pub struct Record {
    name: Arc<str>,
    defaults: Arc<Fields>,
    fields: Arc<Fields>,
}

impl Record {
    /// Assembles a record from its parts.
    ///
    /// The caller guarantees that `fields` has exactly the key set of
    /// `defaults`; [`ImmutableRecords`](crate::ImmutableRecords) does this.
    #[must_use]
    pub fn from_parts(name: Arc<str>, defaults: Arc<Fields>, fields: Fields) -> Self {
        Self {
            name,
            defaults,
            fields: Arc::new(fields),
        }
    }

    /// The record type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields, keyed by name.
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a copy with `key` replaced by `value`.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<Record> {
        self.ensure_known(key)?;
        let mut next = self.clone();
        Arc::make_mut(&mut next.fields).insert(key.to_owned(), value.into());
        Ok(next)
    }

    /// Returns a copy with `key` reset to its default value.
    pub fn remove(&self, key: &str) -> Result<Record> {
        self.ensure_known(key)?;
        let default = self.defaults.get(key).cloned().unwrap_or_default();
        let mut next = self.clone();
        Arc::make_mut(&mut next.fields).insert(key.to_owned(), default);
        Ok(next)
    }

    /// Returns a copy with every entry of `values` applied. Fails on the first
    /// unknown key without producing a partial record.
    pub fn merge(&self, values: Fields) -> Result<Record> {
        if let Some(unknown) = values.keys().find(|key| !self.contains_key(key)) {
            return Err(self.unknown(unknown));
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.fields).extend(values);
        Ok(next)
    }

    /// Converts into a JSON object of the record's fields.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        fields_to_json(&self.fields)
    }

    fn ensure_known(&self, key: &str) -> Result<()> {
        if self.contains_key(key) {
            Ok(())
        } else {
            Err(self.unknown(key))
        }
    }

    fn unknown(&self, key: &str) -> Error {
        Error::UnknownField {
            record: self.name.to_string(),
            field: key.to_owned(),
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && (Arc::ptr_eq(&self.fields, &other.fields) || self.fields == other.fields)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.name)?;
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields.iter())
    }
}
