//! Error types for casting operations.
//!
//! `FieldError` is what a single field reports; it is always collected, never
//! raised on its own. `RowError` is what a row conversion returns, and its
//! shape depends on the error mode the caller chose.

use tableschema_core::ConstraintKind;
use thiserror::Error;

/// Errors reported for a single field value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Value cannot be interpreted as the field's type
    #[error("Invalid {type_name} value for field '{field}': {reason}")]
    InvalidCast {
        field: String,
        type_name: String,
        value: String,
        reason: String,
    },

    /// Value cast successfully but breaks a declared constraint
    #[error("Constraint '{constraint}' violated for field '{field}': expected {expected}, got {actual}")]
    ConstraintViolation {
        field: String,
        constraint: ConstraintKind,
        expected: String,
        actual: String,
    },
}

impl FieldError {
    /// Creates a new invalid cast error.
    pub fn invalid_cast(
        field: impl Into<String>,
        type_name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidCast {
            field: field.into(),
            type_name: type_name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new constraint violation error.
    pub fn violation(
        field: impl Into<String>,
        constraint: ConstraintKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ConstraintViolation {
            field: field.into(),
            constraint,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns the name of the field the error belongs to.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidCast { field, .. } | Self::ConstraintViolation { field, .. } => field,
        }
    }

    /// Returns the violated constraint, if this is a constraint violation.
    pub fn constraint(&self) -> Option<ConstraintKind> {
        match self {
            Self::ConstraintViolation { constraint, .. } => Some(*constraint),
            Self::InvalidCast { .. } => None,
        }
    }

    /// Returns true if the value failed to cast.
    pub fn is_invalid_cast(&self) -> bool {
        matches!(self, Self::InvalidCast { .. })
    }
}

/// Errors returned by row conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// Row width does not match the schema
    #[error("Row has {actual} values but the schema defines {expected} fields")]
    Conversion { expected: usize, actual: usize },

    /// First field error in fail-fast mode
    #[error("Invalid cast: {0}")]
    InvalidCast(FieldError),

    /// Every field error in the row, in field order
    #[error("Row has {} invalid value(s): {}", .0.len(), join_errors(.0))]
    MultipleInvalid(Vec<FieldError>),
}

impl RowError {
    /// Creates a new row width error.
    pub fn conversion(expected: usize, actual: usize) -> Self {
        Self::Conversion { expected, actual }
    }

    /// Returns the field errors carried by this error.
    ///
    /// Width errors carry none.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Conversion { .. } => &[],
            Self::InvalidCast(error) => std::slice::from_ref(error),
            Self::MultipleInvalid(errors) => errors,
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
