use crate::{Result, Type, Value, present};

/// Builds one value of `ty`.
///
/// Composed types and constructors receive the value as supplied. Primitives
/// only see truthy values: a falsy input (`0`, `""`, `false`) takes the same
/// path as no input and yields the primitive's no-argument default.
pub fn instantiate(ty: &Type, value: Option<Value>) -> Result<Value> {
    let value = present(value);
    match ty {
        Type::Composed(factory) => factory.create(value).map(Value::Record),
        Type::Class(constructor) => constructor.construct(value),
        Type::Primitive(primitive) => match value {
            Some(value) if value.is_truthy() => primitive.coerce(Some(&value)),
            _ => primitive.coerce(None),
        },
    }
}
