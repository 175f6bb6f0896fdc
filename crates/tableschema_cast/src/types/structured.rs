//! Structured and untyped casting.
//!
//! Arrays and objects must already be structured: text is never re-parsed
//! as JSON here. Reading cells into structured values is the job of whatever
//! produced the raw row.

use super::{BASE_CONSTRAINTS, Cast, CastResult, SIZED_CONSTRAINTS, expect_format, not_a};
use crate::Value;
use serde_json::Value as JsonValue;
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};

/// Accepts ordered sequences.
#[derive(Debug, Clone)]
pub struct ArrayType;

impl ArrayType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "array", &["default"])?;
        Ok(Self)
    }
}

impl Cast for ArrayType {
    fn name(&self) -> &'static str {
        "array"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        SIZED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        match raw {
            JsonValue::Array(items) => Ok(Value::Array(items.clone())),
            _ => Err(not_a(raw, self.name())),
        }
    }
}

/// Accepts structured mappings.
#[derive(Debug, Clone)]
pub struct ObjectType;

impl ObjectType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "object", &["default"])?;
        Ok(Self)
    }
}

impl Cast for ObjectType {
    fn name(&self) -> &'static str {
        "object"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        SIZED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        match raw {
            JsonValue::Object(map) => Ok(Value::Object(map.clone())),
            _ => Err(not_a(raw, self.name())),
        }
    }
}

/// Accepts anything, unchanged.
#[derive(Debug, Clone)]
pub struct AnyType;

impl AnyType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "any", &["default"])?;
        Ok(Self)
    }
}

impl Cast for AnyType {
    fn name(&self) -> &'static str {
        "any"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        BASE_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        Ok(Value::Any(raw.clone()))
    }
}
