//! The schema model.
//!
//! A `Schema` is an ordered list of field definitions plus the set of raw
//! values that stand for "no value". Row casting pairs raw cells with fields
//! by position, so field order is significant.

use crate::{FieldDefinition, Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw values treated as missing when a schema does not declare its own.
pub const DEFAULT_MISSING_VALUES: &[&str] =
    &["", "-", "null", "none", "nil", "nan", "NaN", "None", "NULL"];

fn default_missing_values() -> Vec<String> {
    DEFAULT_MISSING_VALUES.iter().map(|v| v.to_string()).collect()
}

/// Ordered field definitions for a table.
///
/// # Example
///
/// ```rust
/// use tableschema_core::Schema;
///
/// let schema = Schema::from_json_str(r#"{
///     "fields": [
///         {"name": "id", "type": "integer", "constraints": {"required": true}},
///         {"name": "label"}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(schema.headers(), vec!["id", "label"]);
/// assert_eq!(schema.required_headers(), vec!["id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Field definitions, in column order
    pub fields: Vec<FieldDefinition>,

    /// Raw strings cast to null
    #[serde(default = "default_missing_values")]
    pub missing_values: Vec<String>,
}

impl Schema {
    /// Creates a validated schema with the default missing values.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self> {
        let schema = Self {
            fields,
            missing_values: default_missing_values(),
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Deserializes and validates a schema from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Checks the structural rules every schema must satisfy.
    ///
    /// A schema needs at least one field and field names must be unique.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(SchemaError::NoFields);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(())
    }

    /// Returns the field definitions in column order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Returns the raw values treated as missing.
    pub fn missing_values(&self) -> &[String] {
        &self.missing_values
    }

    /// Returns the field names in column order.
    pub fn headers(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns the names of fields declaring `required: true`.
    pub fn required_headers(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Looks up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if a field with this name exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PEOPLE: &str = r#"{
        "fields": [
            {"name": "id", "type": "string", "constraints": {"required": true}},
            {"name": "height", "type": "number", "constraints": {"required": false}},
            {"name": "age", "type": "integer", "constraints": {"required": false}},
            {"name": "name", "type": "string", "constraints": {"required": true}},
            {"name": "occupation", "type": "string", "constraints": {"required": false}}
        ]
    }"#;

    #[test]
    fn test_headers() {
        let schema = Schema::from_json_str(PEOPLE).unwrap();
        assert_eq!(schema.headers().len(), 5);
        assert_eq!(schema.len(), 5);
    }

    #[test]
    fn test_required_headers() {
        let schema = Schema::from_json_str(PEOPLE).unwrap();
        assert_eq!(schema.required_headers(), vec!["id", "name"]);
    }

    #[test]
    fn test_field_presence() {
        let schema = Schema::from_json_str(PEOPLE).unwrap();
        assert!(schema.has_field("name"));
        assert!(!schema.has_field("religion"));
        assert_eq!(schema.field("age").unwrap().field_type, "integer");
    }

    #[test]
    fn test_defaults_applied() {
        let schema =
            Schema::from_json_str(r#"{"fields": [{"name": "id"}, {"name": "height"}]}"#).unwrap();

        assert!(schema.fields().iter().all(|f| f.field_type == "string"));
        assert!(schema.required_headers().is_empty());
        assert_eq!(schema.missing_values().len(), DEFAULT_MISSING_VALUES.len());
    }

    #[test]
    fn test_custom_missing_values() {
        let schema = Schema::from_json_str(
            r#"{"fields": [{"name": "id"}], "missingValues": ["", "n/a"]}"#,
        )
        .unwrap();

        assert_eq!(schema.missing_values(), &["".to_string(), "n/a".to_string()]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = Schema::new(vec![
            FieldDefinition::new("id", "string"),
            FieldDefinition::new("id", "integer"),
        ]);

        assert!(matches!(result, Err(SchemaError::DuplicateField(name)) if name == "id"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        assert!(matches!(Schema::new(vec![]), Err(SchemaError::NoFields)));
    }

    #[test]
    fn test_malformed_json() {
        let result = Schema::from_json_str(r#"{"fields": "#);
        assert!(matches!(result, Err(SchemaError::Serialization(_))));
    }
}
