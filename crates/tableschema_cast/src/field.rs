//! Field conversion.
//!
//! A `FieldConverter` is one compiled column: its caster, its constraint
//! validator and the raw values it treats as missing. Converting a value
//! never raises; every problem comes back in the error list.

use crate::types::{Cast, TypeCaster, describe};
use crate::{ConstraintValidator, FieldError, TypeRegistry, Value};
use serde_json::Value as JsonValue;
use tableschema_core::{FieldDefinition, SchemaError};
use tracing::{debug, trace};

/// A compiled field.
///
/// # Example
///
/// ```rust
/// use tableschema_cast::{FieldConverter, Value};
/// use tableschema_core::FieldBuilder;
/// use serde_json::json;
///
/// let field = FieldBuilder::new("age", "integer").minimum(0).build();
/// let converter = FieldConverter::new(&field, &["".to_string()]).unwrap();
///
/// assert_eq!(converter.convert(&json!("42")), Ok(Value::Integer(42)));
/// assert_eq!(converter.convert(&json!("")), Ok(Value::Null));
/// assert!(converter.convert(&json!("-1")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FieldConverter {
    name: String,
    caster: TypeCaster,
    constraints: ConstraintValidator,
    missing_values: Vec<String>,
}

impl FieldConverter {
    /// Compiles a field with the built-in types.
    pub fn new(field: &FieldDefinition, missing_values: &[String]) -> Result<Self, SchemaError> {
        Self::with_registry(field, missing_values, &TypeRegistry::new())
    }

    /// Compiles a field, resolving its type through `registry`.
    pub fn with_registry(
        field: &FieldDefinition,
        missing_values: &[String],
        registry: &TypeRegistry,
    ) -> Result<Self, SchemaError> {
        let caster = registry.build(field)?;
        let constraints = ConstraintValidator::compile(field, &caster)?;

        debug!(
            "Compiled field '{}' as {} (format '{}', {} constraint(s))",
            field.name,
            caster.name(),
            field.format,
            field.constraints.declared().len()
        );

        Ok(Self {
            name: field.name.clone(),
            caster,
            constraints,
            missing_values: missing_values.to_vec(),
        })
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resolved caster.
    pub fn caster(&self) -> &TypeCaster {
        &self.caster
    }

    /// Returns true if the raw value stands for "no value".
    pub fn is_missing(&self, raw: &JsonValue) -> bool {
        match raw {
            JsonValue::Null => true,
            JsonValue::String(s) => self.missing_values.iter().any(|m| m == s),
            _ => false,
        }
    }

    /// Converts one raw value.
    ///
    /// A missing value becomes `Value::Null` unless the field is required.
    /// A cast failure is reported alone; otherwise every violated
    /// constraint is reported.
    pub fn convert(&self, raw: &JsonValue) -> Result<Value, Vec<FieldError>> {
        if self.is_missing(raw) {
            trace!("Field '{}': {} is missing", self.name, describe(raw));
            return match self.constraints.check_required(raw) {
                Some(err) => Err(vec![err]),
                None => Ok(Value::Null),
            };
        }

        let value = self.caster.cast(raw).map_err(|failure| {
            trace!("Field '{}': cast failed: {}", self.name, failure);
            vec![FieldError::invalid_cast(
                &self.name,
                self.caster.name(),
                describe(raw),
                failure.reason(),
            )]
        })?;

        let errors = self.constraints.check(raw, &value);
        if errors.is_empty() {
            trace!("Field '{}': cast {} to {}", self.name, describe(raw), value);
            Ok(value)
        } else {
            Err(errors)
        }
    }
}
