//! Error types for ormsugar

use thiserror::Error;

/// Result type alias for ormsugar operations
pub type SugarResult<T> = Result<T, SugarError>;

/// Errors raised while building paths and predicates
#[derive(Debug, Error)]
pub enum SugarError {
    /// Segment name that cannot be used as a path segment
    #[error("No such attribute: '{0}'")]
    NoSuchAttribute(String),

    /// The root object was called with positional arguments and no field path
    #[error("Missing field: positional arguments require an addressed field")]
    MissingField,

    /// A lookup handler rejected its call arguments
    #[error("Invalid arguments for lookup '{lookup}': {message}")]
    InvalidArguments { lookup: String, message: String },

    /// Dotted path text could not be parsed
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SugarError {
    /// Create an invalid-arguments error for a named lookup
    pub fn invalid_arguments(lookup: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            lookup: lookup.into(),
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath(message.into())
    }

    /// Create a no-such-attribute error
    pub fn no_such_attribute(name: impl Into<String>) -> Self {
        Self::NoSuchAttribute(name.into())
    }

    /// Check if this is a no-such-attribute error
    pub fn is_no_such_attribute(&self) -> bool {
        matches!(self, Self::NoSuchAttribute(_))
    }

    /// Check if this is a missing field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField)
    }

    /// Check if this is an invalid arguments error
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::InvalidArguments { .. })
    }
}
