//! Schema composition.
//!
//! Merge order: the explicitly declared properties come first, then each
//! extended schema is laid over the result in the order listed. A later
//! source replaces any same-named property from an earlier one, so extended
//! schemas take precedence over declared properties and the last extended
//! schema wins.

use crate::{
    Diagnostic, Fields, ImmutableRecords, Property, PropertyCollection, RecordBackend,
    RecordFactory, Result, Schema, Type, instantiate,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Input to [`Composer::compose`].
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub name: String,
    pub properties: Option<PropertyCollection>,
    pub extends: Vec<Type>,
}

impl ComposeOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: None,
            extends: Vec::new(),
        }
    }

    /// Declares one property, replacing any earlier declaration of `name`.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, property: impl Into<Property>) -> Self {
        self.properties
            .get_or_insert_with(PropertyCollection::new)
            .insert(name.into(), property.into());
        self
    }

    #[must_use]
    pub fn properties(mut self, properties: PropertyCollection) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Appends one type to extend.
    #[must_use]
    pub fn extend(mut self, ty: impl Into<Type>) -> Self {
        self.extends.push(ty.into());
        self
    }

    /// Appends several types to extend, in order.
    #[must_use]
    pub fn extends<T: Into<Type>>(mut self, types: impl IntoIterator<Item = T>) -> Self {
        self.extends.extend(types.into_iter().map(Into::into));
        self
    }
}

/// The result of a composition: the factory plus any skipped-extend
/// diagnostics.
#[derive(Debug, Clone)]
pub struct Composition {
    pub factory: RecordFactory,
    pub diagnostics: Vec<Diagnostic>,
}

impl Composition {
    #[must_use]
    pub fn into_factory(self) -> RecordFactory {
        self.factory
    }
}

/// Composes schemas into record factories backed by a [`RecordBackend`].
#[derive(Clone)]
pub struct Composer {
    backend: Arc<dyn RecordBackend>,
}

impl Composer {
    /// A composer using [`ImmutableRecords`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(ImmutableRecords)
    }

    pub fn with_backend(backend: impl RecordBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Merges the declared and inherited properties, freezes them, computes
    /// the default-values snapshot and defines the record type.
    ///
    /// Primitive and non-composed entries in `extends` are skipped with a
    /// [`Diagnostic`]. Fails only when a property's default is rejected by
    /// its own type.
    pub fn compose(&self, options: ComposeOptions) -> Result<Composition> {
        let ComposeOptions {
            name,
            properties,
            extends,
        } = options;

        let mut merged = properties.unwrap_or_default();
        let mut diagnostics = Vec::new();

        for ty in &extends {
            let diagnostic = match ty {
                Type::Composed(parent) => {
                    merged.extend(parent.describe().to_collection());
                    continue;
                }
                Type::Primitive(primitive) => Diagnostic::PrimitiveCannotExtend {
                    schema: name.clone(),
                    type_name: primitive.name().to_owned(),
                },
                Type::Class(constructor) => Diagnostic::NonComposedCannotExtend {
                    schema: name.clone(),
                    type_name: constructor.name().to_owned(),
                },
            };
            warn!(schema = %name, type_name = %diagnostic.type_name(), "{diagnostic}");
            diagnostics.push(diagnostic);
        }

        // Defaults only go through the declared type, never through item typing.
        let defaults = merged
            .iter()
            .map(|(prop_name, prop)| {
                Ok((prop_name.clone(), instantiate(&prop.ty, prop.default_value.clone())?))
            })
            .collect::<Result<Fields>>()?;

        let schema = Schema::from(merged);
        let constructor = self.backend.define(&name, defaults);
        debug!(
            schema = %name,
            properties = schema.len(),
            skipped = diagnostics.len(),
            "Composed record type"
        );

        Ok(Composition {
            factory: RecordFactory::new(name, schema, constructor),
            diagnostics,
        })
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer").finish_non_exhaustive()
    }
}

/// Composes with the default [`ImmutableRecords`] backend.
pub fn compose(options: ComposeOptions) -> Result<Composition> {
    Composer::new().compose(options)
}
