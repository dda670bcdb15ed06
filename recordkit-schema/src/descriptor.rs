use crate::{Type, Value};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

/// A field's type, optional default, and optional item typing.
///
/// `items` applies to each element when the runtime value is a sequence or a
/// keyed mapping, and may nest to any depth.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub ty: Type,
    pub default_value: Option<Value>,
    pub items: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub fn new(ty: impl Into<Type>) -> Self {
        Self {
            ty: ty.into(),
            default_value: None,
            items: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: TypeDescriptor) -> Self {
        self.items = Some(Box::new(items));
        self
    }
}

/// A [`TypeDescriptor`] plus nullability.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub descriptor: TypeDescriptor,
    pub nullable: bool,
}

impl Property {
    pub fn new(ty: impl Into<Type>) -> Self {
        Self::from(TypeDescriptor::new(ty))
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.descriptor = self.descriptor.with_default(value);
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: TypeDescriptor) -> Self {
        self.descriptor = self.descriptor.with_items(items);
        self
    }

    /// Marks the property nullable: with no input it resolves to `Value::Null`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl From<TypeDescriptor> for Property {
    fn from(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            nullable: false,
        }
    }
}

impl Deref for Property {
    type Target = TypeDescriptor;

    fn deref(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}

/// Property name to [`Property`], before freezing.
pub type PropertyCollection = BTreeMap<String, Property>;

/// A frozen property collection.
///
/// There is no way to change a schema after it is built; extending a
/// composed type merges into a fresh [`PropertyCollection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    properties: Arc<PropertyCollection>,
}

impl Schema {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(name, prop)| (name.as_str(), prop))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// A mutable copy of the properties, for building a new schema.
    #[must_use]
    pub fn to_collection(&self) -> PropertyCollection {
        (*self.properties).clone()
    }
}

impl From<PropertyCollection> for Schema {
    fn from(properties: PropertyCollection) -> Self {
        Self {
            properties: Arc::new(properties),
        }
    }
}
