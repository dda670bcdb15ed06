use std::fmt;

/// A non-fatal problem found while composing a schema.
///
/// The offending `extends` entry is skipped and composition carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A primitive type was listed in `extends`.
    PrimitiveCannotExtend { schema: String, type_name: String },
    /// A plain constructor (not a composed record) was listed in `extends`.
    NonComposedCannotExtend { schema: String, type_name: String },
}

impl Diagnostic {
    /// Name of the schema being composed.
    #[must_use]
    pub fn schema(&self) -> &str {
        match self {
            Self::PrimitiveCannotExtend { schema, .. }
            | Self::NonComposedCannotExtend { schema, .. } => schema,
        }
    }

    /// Name of the skipped type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::PrimitiveCannotExtend { type_name, .. }
            | Self::NonComposedCannotExtend { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimitiveCannotExtend { schema, type_name } => write!(
                f,
                "{schema}: primitive type `{type_name}` cannot extend a record type"
            ),
            Self::NonComposedCannotExtend { schema, type_name } => write!(
                f,
                "{schema}: `{type_name}` is not a composed record; only composed records can be extended"
            ),
        }
    }
}
