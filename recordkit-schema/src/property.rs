use crate::{Property, Result, Value, instantiate, present, resolve_generic};

/// Resolves the final value of one property.
///
/// The result is always a built value of the property's type, or
/// `Value::Null` when the property is nullable and nothing was supplied.
/// Item typing only applies when a value is present; otherwise the
/// property's own default is used.
pub fn resolve_property(property: &Property, value: Option<Value>) -> Result<Value> {
    match (property.items.as_deref(), present(value)) {
        (Some(items), Some(value)) => {
            let resolved = resolve_generic(Some(items), Some(value))?;
            instantiate(&property.ty, resolved)
        }
        (_, None) if property.nullable => Ok(Value::Null),
        (_, value) => instantiate(
            &property.ty,
            value.or_else(|| property.default_value.clone()),
        ),
    }
}
