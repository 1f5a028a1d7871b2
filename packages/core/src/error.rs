use thiserror::Error;

/// Errors returned when a [`Schema`](crate::Schema) is constructed or mutated
/// with input that breaks its invariants.
///
/// Every failure is raised at the offending call and leaves the schema
/// untouched.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("type is required for a schema.org object")]
    TypeRequired,

    #[error("schema.org type does not appear to be valid: {0:?}")]
    InvalidType(String),

    #[error("property name is required")]
    PropertyNameRequired,

    #[error("property name {0:?} is reserved for JSON-LD keywords")]
    ReservedPropertyName(String),

    #[error("property value cannot be null")]
    NullValue,

    #[error("property value does not appear to be a valid type: {0}")]
    UnsupportedValue(String),

    #[error("property already exists: {0:?}")]
    PropertyExists(String),

    #[error("property does not exist: {0:?}")]
    PropertyNotFound(String),

    #[error("property {0:?} does not hold a nested schema")]
    NotNested(String),
}

/// The broad class a [`SchemaError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The schema itself was declared with an unusable type.
    Configuration,
    /// A property name or value was rejected.
    InvalidArgument,
    /// A property with the same name is already attached.
    Conflict,
    /// The requested property is not attached.
    NotFound,
}

impl SchemaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::TypeRequired | SchemaError::InvalidType(_) => ErrorKind::Configuration,
            SchemaError::PropertyNameRequired
            | SchemaError::ReservedPropertyName(_)
            | SchemaError::NullValue
            | SchemaError::UnsupportedValue(_)
            | SchemaError::NotNested(_) => ErrorKind::InvalidArgument,
            SchemaError::PropertyExists(_) => ErrorKind::Conflict,
            SchemaError::PropertyNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::InvalidArgument => write!(f, "invalid-argument"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::NotFound => write!(f, "not-found"),
        }
    }
}

// --- tests -------------------------------------------------------------------
