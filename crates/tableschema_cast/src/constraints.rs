//! Constraint validation logic.
//!
//! This module checks cast values against a field's declared constraints:
//! - Required: value must not be missing
//! - Pattern: the raw text must fully match a regular expression
//! - Enum: value must be one of an allowed set
//! - Minimum/Maximum: ordered values must lie within bounds
//! - MinLength/MaxLength: strings, arrays and objects must have a bounded length
//!
//! Constraints are compiled once per field. Enum members and bounds are cast
//! through the field's own caster at that point, so checking a row compares
//! typed values with typed values.

use crate::types::{Cast, TypeCaster};
use crate::{FieldError, Value};
use regex::Regex;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};
use tracing::warn;

/// Validates a single field's constraints.
#[derive(Debug, Clone)]
pub struct ConstraintValidator {
    field: String,
    required: bool,
    pattern: Option<(String, Regex)>,
    allowed_values: Option<Vec<Value>>,
    minimum: Option<Value>,
    maximum: Option<Value>,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl ConstraintValidator {
    /// Compiles the constraints declared on `field` for the given caster.
    ///
    /// Fails if a constraint is not supported by the caster's type, if the
    /// pattern does not compile, or if an enum member or bound cannot be
    /// cast to the field's type.
    pub fn compile(field: &FieldDefinition, caster: &TypeCaster) -> Result<Self, SchemaError> {
        let constraints = &field.constraints;

        for kind in constraints.declared() {
            if !caster.supports(kind) {
                return Err(SchemaError::unsupported_constraint(
                    &field.name,
                    caster.name(),
                    kind.as_str(),
                ));
            }
        }

        // Uniqueness spans rows; UniqueTracker enforces it.
        let pattern = match &constraints.pattern {
            Some(pattern) => {
                let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                    SchemaError::InvalidPattern {
                        field: field.name.clone(),
                        error: e.to_string(),
                    }
                })?;
                Some((pattern.clone(), regex))
            }
            None => None,
        };

        let cast_bound = |kind: ConstraintKind, raw: &JsonValue| {
            caster.cast(raw).map_err(|e| {
                SchemaError::invalid_constraint_value(&field.name, kind.as_str(), e.reason())
            })
        };

        let allowed_values = match &constraints.allowed_values {
            Some(values) => Some(
                values
                    .iter()
                    .map(|raw| cast_bound(ConstraintKind::Enum, raw))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        let minimum = constraints
            .minimum
            .as_ref()
            .map(|raw| cast_bound(ConstraintKind::Minimum, raw))
            .transpose()?;
        let maximum = constraints
            .maximum
            .as_ref()
            .map(|raw| cast_bound(ConstraintKind::Maximum, raw))
            .transpose()?;

        if let (Some(min), Some(max)) = (&minimum, &maximum) {
            if min.compare(max) == Some(Ordering::Greater) {
                warn!(
                    "Field '{}' declares minimum {} above maximum {}; no value can satisfy both",
                    field.name, min, max
                );
            }
        }

        Ok(Self {
            field: field.name.clone(),
            required: field.is_required(),
            pattern,
            allowed_values,
            minimum,
            maximum,
            min_length: constraints.min_length,
            max_length: constraints.max_length,
        })
    }

    /// Returns true if the field declares `required: true`.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Checks the `required` constraint against a missing value.
    pub fn check_required(&self, raw: &JsonValue) -> Option<FieldError> {
        self.required.then(|| {
            FieldError::violation(
                &self.field,
                ConstraintKind::Required,
                "a value",
                raw_repr(raw),
            )
        })
    }

    /// Checks every value constraint against a successfully cast value.
    ///
    /// All constraints are evaluated; the result holds one error per
    /// violated constraint, in declaration order.
    pub fn check(&self, raw: &JsonValue, value: &Value) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Some(err) = self.check_pattern(raw) {
            errors.push(err);
        }
        if let Some(err) = self.check_allowed_values(value) {
            errors.push(err);
        }
        if let Some(err) = self.check_bound(value, ConstraintKind::Minimum) {
            errors.push(err);
        }
        if let Some(err) = self.check_bound(value, ConstraintKind::Maximum) {
            errors.push(err);
        }
        if let Some(err) = self.check_length(value, ConstraintKind::MinLength) {
            errors.push(err);
        }
        if let Some(err) = self.check_length(value, ConstraintKind::MaxLength) {
            errors.push(err);
        }

        errors
    }

    /// Matches the pre-cast text, not the typed value.
    fn check_pattern(&self, raw: &JsonValue) -> Option<FieldError> {
        let (pattern, regex) = self.pattern.as_ref()?;
        let text = raw_repr(raw);

        if regex.is_match(&text) {
            None
        } else {
            Some(FieldError::violation(
                &self.field,
                ConstraintKind::Pattern,
                format!("a match for '{pattern}'"),
                text,
            ))
        }
    }

    fn check_allowed_values(&self, value: &Value) -> Option<FieldError> {
        let allowed = self.allowed_values.as_ref()?;

        if allowed.contains(value) {
            None
        } else {
            let listed = allowed
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Some(FieldError::violation(
                &self.field,
                ConstraintKind::Enum,
                format!("one of [{listed}]"),
                value.to_string(),
            ))
        }
    }

    fn check_bound(&self, value: &Value, kind: ConstraintKind) -> Option<FieldError> {
        let (bound, rejected, symbol) = match kind {
            ConstraintKind::Minimum => (self.minimum.as_ref()?, Ordering::Less, ">="),
            ConstraintKind::Maximum => (self.maximum.as_ref()?, Ordering::Greater, "<="),
            _ => return None,
        };

        if value.compare(bound) == Some(rejected) {
            Some(FieldError::violation(
                &self.field,
                kind,
                format!("{symbol} {bound}"),
                value.to_string(),
            ))
        } else {
            None
        }
    }

    fn check_length(&self, value: &Value, kind: ConstraintKind) -> Option<FieldError> {
        let length = value.length()?;
        let (limit, violated, symbol) = match kind {
            ConstraintKind::MinLength => {
                let limit = self.min_length?;
                (limit, length < limit, ">=")
            }
            ConstraintKind::MaxLength => {
                let limit = self.max_length?;
                (limit, length > limit, "<=")
            }
            _ => return None,
        };

        violated.then(|| {
            FieldError::violation(
                &self.field,
                kind,
                format!("length {symbol} {limit}"),
                format!("length {length}"),
            )
        })
    }
}

/// Textual form of a raw value: strings as-is, everything else as JSON.
fn raw_repr(raw: &JsonValue) -> String {
    match raw {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRegistry;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tableschema_core::FieldBuilder;

    fn compile(field: &FieldDefinition) -> Result<(TypeCaster, ConstraintValidator), SchemaError> {
        let caster = TypeRegistry::new().build(field)?;
        let validator = ConstraintValidator::compile(field, &caster)?;
        Ok((caster, validator))
    }

    fn check(field: FieldDefinition, raw: JsonValue) -> Vec<FieldError> {
        let (caster, validator) = compile(&field).unwrap();
        let value = caster.cast(&raw).unwrap();
        validator.check(&raw, &value)
    }

    #[test]
    fn test_allowed_values_valid() {
        let field = FieldBuilder::new("status", "string")
            .allowed_values(["active", "inactive"])
            .build();

        assert!(check(field, json!("active")).is_empty());
    }

    #[test]
    fn test_allowed_values_invalid() {
        let field = FieldBuilder::new("status", "string")
            .allowed_values(["active", "inactive"])
            .build();

        let errors = check(field, json!("pending"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].constraint(), Some(ConstraintKind::Enum));
    }

    #[test]
    fn test_allowed_values_compared_as_typed() {
        let field = FieldBuilder::new("ratio", "number")
            .allowed_values(["1.50", "2"])
            .build();

        assert!(check(field.clone(), json!("1.5")).is_empty());
        assert!(check(field, json!(2)).is_empty());
    }

    #[test]
    fn test_range_valid() {
        let field = FieldBuilder::new("age", "integer")
            .minimum(0)
            .maximum(120)
            .build();

        assert!(check(field.clone(), json!("0")).is_empty());
        assert!(check(field, json!("120")).is_empty());
    }

    #[test]
    fn test_range_invalid() {
        let field = FieldBuilder::new("age", "integer")
            .minimum(0)
            .maximum(120)
            .build();

        let errors = check(field.clone(), json!("150"));
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            FieldError::ConstraintViolation { constraint: ConstraintKind::Maximum, actual, .. }
                if actual == "150"
        ));

        let errors = check(field, json!("-1"));
        assert_eq!(errors[0].constraint(), Some(ConstraintKind::Minimum));
    }

    #[test]
    fn test_date_bounds() {
        let field = FieldBuilder::new("day", "date")
            .minimum("2020-01-01")
            .build();

        assert!(check(field.clone(), json!("2020-06-01")).is_empty());
        assert_eq!(check(field, json!("2019-12-31")).len(), 1);
    }

    #[test]
    fn test_pattern_valid() {
        let field = FieldBuilder::new("url", "string")
            .pattern(r"https?://.*")
            .build();

        assert!(check(field, json!("https://example.com")).is_empty());
    }

    #[test]
    fn test_pattern_requires_full_match() {
        let field = FieldBuilder::new("code", "string").pattern("[A-Z]{3}").build();

        assert!(check(field.clone(), json!("ABC")).is_empty());
        let errors = check(field, json!("xABCx"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].constraint(), Some(ConstraintKind::Pattern));
    }

    #[test]
    fn test_pattern_checks_raw_text() {
        // The typed value is 10 but the raw text is "10.0"
        let field = FieldBuilder::new("n", "integer").pattern(r"\d+").build();

        let errors = check(field, json!("10.0"));
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            FieldError::ConstraintViolation { actual, .. } if actual == "10.0"
        ));
    }

    #[test]
    fn test_length_bounds() {
        let field = FieldBuilder::new("code", "string")
            .min_length(2)
            .max_length(4)
            .build();

        assert!(check(field.clone(), json!("abc")).is_empty());
        assert_eq!(
            check(field.clone(), json!("a"))[0].constraint(),
            Some(ConstraintKind::MinLength)
        );
        assert_eq!(
            check(field, json!("abcde"))[0].constraint(),
            Some(ConstraintKind::MaxLength)
        );
    }

    #[test]
    fn test_array_length() {
        let field = FieldBuilder::new("tags", "array").max_length(1).build();
        assert_eq!(check(field, json!(["a", "b"])).len(), 1);
    }

    #[test]
    fn test_multiple_violations_reported() {
        let field = FieldBuilder::new("code", "string")
            .pattern("[a-z]+")
            .allowed_values(["abc"])
            .max_length(3)
            .build();

        let errors = check(field, json!("ABCD"));
        let kinds: Vec<_> = errors.iter().filter_map(FieldError::constraint).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::Pattern,
                ConstraintKind::Enum,
                ConstraintKind::MaxLength
            ]
        );
    }

    #[test]
    fn test_required() {
        let field = FieldBuilder::new("id", "string").required(true).build();
        let (_, validator) = compile(&field).unwrap();

        let err = validator.check_required(&json!("")).unwrap();
        assert_eq!(err.constraint(), Some(ConstraintKind::Required));

        let optional = FieldBuilder::new("id", "string").required(false).build();
        let (_, validator) = compile(&optional).unwrap();
        assert!(validator.check_required(&json!("")).is_none());
    }

    #[test]
    fn test_unsupported_constraint() {
        let field = FieldBuilder::new("flag", "boolean").minimum(0).build();

        assert!(matches!(
            compile(&field),
            Err(SchemaError::UnsupportedConstraint { constraint, .. }) if constraint == "minimum"
        ));
    }

    #[test]
    fn test_length_on_number_unsupported() {
        let field = FieldBuilder::new("n", "number").max_length(3).build();
        assert!(matches!(
            compile(&field),
            Err(SchemaError::UnsupportedConstraint { .. })
        ));
    }

    #[test]
    fn test_invalid_regex() {
        let field = FieldBuilder::new("test", "string")
            .pattern("[invalid(regex")
            .build();

        assert!(matches!(compile(&field), Err(SchemaError::InvalidPattern { .. })));
    }

    #[test]
    fn test_uncastable_bound() {
        let field = FieldBuilder::new("age", "integer").minimum("zero").build();

        assert!(matches!(
            compile(&field),
            Err(SchemaError::InvalidConstraintValue { constraint, .. }) if constraint == "minimum"
        ));
    }

    #[test]
    fn test_uncastable_enum_member() {
        let field = FieldBuilder::new("flag", "boolean")
            .allowed_values(["maybe"])
            .build();

        assert!(matches!(
            compile(&field),
            Err(SchemaError::InvalidConstraintValue { .. })
        ));
    }
}
