//! Error types for schema construction.
//!
//! Everything in this module is a configuration-time failure: a schema that
//! names a type, format or constraint the casting engine cannot honor. None of
//! these errors are ever produced while casting data values.

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Main error type for schema construction and compilation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Field declares a type with no registered caster
    #[error("Unknown type '{type_name}' for field '{field}'")]
    UnknownType {
        /// Field name
        field: String,
        /// Declared type
        type_name: String,
    },

    /// Field declares a format its type does not recognize
    #[error("Unknown format '{format}' for {type_name} field '{field}'")]
    UnknownFormat {
        /// Field name
        field: String,
        /// Declared type
        type_name: String,
        /// Declared format
        format: String,
    },

    /// Constraint is not in the type's supported set
    #[error("Constraint '{constraint}' is not supported by {type_name} field '{field}'")]
    UnsupportedConstraint {
        /// Field name
        field: String,
        /// Declared type
        type_name: String,
        /// Constraint name
        constraint: String,
    },

    /// Pattern constraint is not a valid regular expression
    #[error("Invalid pattern for field '{field}': {error}")]
    InvalidPattern {
        /// Field name
        field: String,
        /// Regex compiler message
        error: String,
    },

    /// Constraint value cannot be interpreted as the field's type
    #[error("Invalid value for constraint '{constraint}' on field '{field}': {message}")]
    InvalidConstraintValue {
        /// Field name
        field: String,
        /// Constraint name
        constraint: String,
        /// Failure details
        message: String,
    },

    /// Two fields share the same name
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// Schema declares no fields
    #[error("Schema has no fields defined")]
    NoFields,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SchemaError {
    /// Creates a new unknown type error.
    pub fn unknown_type(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            field: field.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a new unknown format error.
    pub fn unknown_format(
        field: impl Into<String>,
        type_name: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self::UnknownFormat {
            field: field.into(),
            type_name: type_name.into(),
            format: format.into(),
        }
    }

    /// Creates a new unsupported constraint error.
    pub fn unsupported_constraint(
        field: impl Into<String>,
        type_name: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::UnsupportedConstraint {
            field: field.into(),
            type_name: type_name.into(),
            constraint: constraint.into(),
        }
    }

    /// Creates a new invalid constraint value error.
    pub fn invalid_constraint_value(
        field: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidConstraintValue {
            field: field.into(),
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}
