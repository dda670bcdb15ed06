//! Generic item resolution.
//!
//! Walks a value against a (possibly nested) item descriptor. Sequences keep
//! their length and order, mappings keep their key set; every element is
//! resolved through the inner levels first and then built as the level's
//! declared type.

use crate::{Fields, Result, TypeDescriptor, Value, instantiate, present};

/// Resolves `value` against `descriptor`.
///
/// Without a descriptor the value is returned untouched. Scalars (records
/// included) pass through; an absent value falls back to the descriptor's
/// default, which may itself be absent.
pub fn resolve_generic(
    descriptor: Option<&TypeDescriptor>,
    value: Option<Value>,
) -> Result<Option<Value>> {
    let Some(descriptor) = descriptor else {
        return Ok(value);
    };

    match present(value) {
        Some(Value::Sequence(items)) => {
            let resolved = items
                .into_iter()
                .map(|item| resolve_item(descriptor, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(Value::Sequence(resolved)))
        }
        Some(Value::Mapping(entries)) => {
            let resolved = entries
                .into_iter()
                .map(|(key, item)| Ok((key, resolve_item(descriptor, item)?)))
                .collect::<Result<Fields>>()?;
            Ok(Some(Value::Mapping(resolved)))
        }
        Some(scalar) => Ok(Some(scalar)),
        None => Ok(descriptor.default_value.clone()),
    }
}

fn resolve_item(descriptor: &TypeDescriptor, item: Value) -> Result<Value> {
    let inner = match descriptor.items.as_deref() {
        Some(items) => resolve_generic(Some(items), Some(item))?,
        None => Some(item),
    };
    instantiate(&descriptor.ty, inner)
}
