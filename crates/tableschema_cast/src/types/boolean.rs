use super::{BASE_CONSTRAINTS, Cast, CastResult, expect_format, not_a};
use crate::Value;
use serde_json::Value as JsonValue;
use tableschema_core::{
    ConstraintKind, DEFAULT_FALSE_VALUES, DEFAULT_TRUE_VALUES, FieldDefinition, SchemaError,
};

/// Casts configured true/false spellings to booleans.
///
/// Lookups are exact and case-sensitive; `trueValues` is consulted before
/// `falseValues`. Native booleans pass through.
#[derive(Debug, Clone)]
pub struct BooleanType {
    true_values: Vec<String>,
    false_values: Vec<String>,
}

impl BooleanType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "boolean", &["default"])?;

        let resolve = |configured: &Option<Vec<String>>, defaults: &[&str]| {
            configured
                .clone()
                .unwrap_or_else(|| defaults.iter().map(|v| v.to_string()).collect())
        };

        Ok(Self {
            true_values: resolve(&field.true_values, DEFAULT_TRUE_VALUES),
            false_values: resolve(&field.false_values, DEFAULT_FALSE_VALUES),
        })
    }

    fn lookup(&self, text: &str) -> Option<bool> {
        if self.true_values.iter().any(|v| v == text) {
            Some(true)
        } else if self.false_values.iter().any(|v| v == text) {
            Some(false)
        } else {
            None
        }
    }
}

impl Cast for BooleanType {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        BASE_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        let text = match raw {
            JsonValue::Bool(b) => return Ok(Value::Boolean(*b)),
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            _ => return Err(not_a(raw, self.name())),
        };

        self.lookup(&text)
            .map(Value::Boolean)
            .ok_or_else(|| not_a(raw, self.name()))
    }
}
