//! Builder pattern for creating schemas.
//!
//! This module provides ergonomic builders for constructing schemas
//! and field definitions with a fluent API.

use crate::{Constraints, FieldDefinition, Result, Schema, schema::DEFAULT_MISSING_VALUES};
use serde_json::Value as JsonValue;

/// Builder for creating a `Schema`.
///
/// # Example
///
/// ```rust
/// use tableschema_core::{FieldBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .field(FieldBuilder::new("id", "integer").required(true).build())
///     .field(FieldBuilder::new("email", "string").format("email").build())
///     .missing_values(["", "n/a"])
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.headers(), vec!["id", "email"]);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDefinition>,
    missing_values: Option<Vec<String>>,
}

impl SchemaBuilder {
    /// Creates an empty schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the schema.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple fields to the schema.
    pub fn fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Replaces the raw values treated as missing.
    pub fn missing_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds and validates the schema.
    pub fn build(self) -> Result<Schema> {
        let schema = Schema {
            fields: self.fields,
            missing_values: self.missing_values.unwrap_or_else(|| {
                DEFAULT_MISSING_VALUES.iter().map(|v| v.to_string()).collect()
            }),
        };
        schema.validate()?;
        Ok(schema)
    }
}

/// Builder for creating a `FieldDefinition`.
///
/// # Example
///
/// ```rust
/// use tableschema_core::FieldBuilder;
///
/// let field = FieldBuilder::new("age", "integer")
///     .description("Age in years")
///     .required(true)
///     .minimum(0)
///     .build();
///
/// assert!(field.is_required());
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    field: FieldDefinition,
}

impl FieldBuilder {
    /// Creates a new field builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Field name
    /// * `field_type` - Logical type (e.g., "string", "integer", "date")
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field: FieldDefinition::new(name, field_type),
        }
    }

    /// Sets the field format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.field.format = format.into();
        self
    }

    /// Sets the field title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.field.title = Some(title.into());
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.field.description = Some(description.into());
        self
    }

    /// Replaces all constraints at once.
    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.field.constraints = constraints;
        self
    }

    /// Sets the `required` constraint.
    pub fn required(mut self, required: bool) -> Self {
        self.field.constraints.required = Some(required);
        self
    }

    /// Sets the `unique` constraint.
    pub fn unique(mut self, unique: bool) -> Self {
        self.field.constraints.unique = Some(unique);
        self
    }

    /// Sets the `pattern` constraint.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.field.constraints.pattern = Some(pattern.into());
        self
    }

    /// Sets the `enum` constraint.
    pub fn allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.field.constraints.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the `minimum` constraint.
    pub fn minimum(mut self, minimum: impl Into<JsonValue>) -> Self {
        self.field.constraints.minimum = Some(minimum.into());
        self
    }

    /// Sets the `maximum` constraint.
    pub fn maximum(mut self, maximum: impl Into<JsonValue>) -> Self {
        self.field.constraints.maximum = Some(maximum.into());
        self
    }

    /// Sets the `minLength` constraint.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.field.constraints.min_length = Some(min_length);
        self
    }

    /// Sets the `maxLength` constraint.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.field.constraints.max_length = Some(max_length);
        self
    }

    /// Sets the raw values cast to `true`.
    pub fn true_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field.true_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the raw values cast to `false`.
    pub fn false_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field.false_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the decimal separator.
    pub fn decimal_char(mut self, decimal_char: impl Into<String>) -> Self {
        self.field.decimal_char = Some(decimal_char.into());
        self
    }

    /// Sets the thousands separator.
    pub fn group_char(mut self, group_char: impl Into<String>) -> Self {
        self.field.group_char = Some(group_char.into());
        self
    }

    /// Sets whether numbers must be bare.
    pub fn bare_number(mut self, bare_number: bool) -> Self {
        self.field.bare_number = Some(bare_number);
        self
    }

    /// Builds the field.
    pub fn build(self) -> FieldDefinition {
        self.field
    }
}
