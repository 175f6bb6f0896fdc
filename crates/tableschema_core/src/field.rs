//! Field definitions and constraint declarations.
//!
//! A `FieldDefinition` describes one column of a table: its name, logical
//! type, format, constraints and the type-specific options casters read.
//! Definitions are plain data. They are never mutated by casting.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Type assigned to a field that does not declare one.
pub const DEFAULT_TYPE: &str = "string";

/// Format assigned to a field that does not declare one.
pub const DEFAULT_FORMAT: &str = "default";

/// Raw values recognized as `true` by boolean fields without `trueValues`.
pub const DEFAULT_TRUE_VALUES: &[&str] = &["true", "True", "TRUE", "1"];

/// Raw values recognized as `false` by boolean fields without `falseValues`.
pub const DEFAULT_FALSE_VALUES: &[&str] = &["false", "False", "FALSE", "0"];

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn is_default_format(format: &str) -> bool {
    format == DEFAULT_FORMAT
}

/// A single field definition in a schema.
///
/// Mirrors the Table Schema field descriptor, so it deserializes directly from
/// JSON such as `{"name": "age", "type": "integer", "constraints": {"minimum": 0}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Logical type (e.g., "string", "number", "date")
    #[serde(rename = "type", default = "default_type")]
    pub field_type: String,

    /// Type-specific format (e.g., "email", "any", "%d/%m/%Y")
    #[serde(default = "default_format", skip_serializing_if = "is_default_format")]
    pub format: String,

    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Validation constraints
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,

    /// Raw values cast to `true` (boolean fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_values: Option<Vec<String>>,

    /// Raw values cast to `false` (boolean fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_values: Option<Vec<String>>,

    /// Decimal separator (number fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_char: Option<String>,

    /// Thousands separator (number and integer fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_char: Option<String>,

    /// When false, leading and trailing non-numeric characters are stripped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bare_number: Option<bool>,
}

impl FieldDefinition {
    /// Creates a field with the given name and type and no constraints.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            format: default_format(),
            title: None,
            description: None,
            constraints: Constraints::default(),
            true_values: None,
            false_values: None,
            decimal_char: None,
            group_char: None,
            bare_number: None,
        }
    }

    /// Returns true if the field declares `required: true`.
    pub fn is_required(&self) -> bool {
        self.constraints.required.unwrap_or(false)
    }

    /// Returns true if the field declares `unique: true`.
    pub fn is_unique(&self) -> bool {
        self.constraints.unique.unwrap_or(false)
    }
}

/// Names of the constraints a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Value must not be missing
    Required,
    /// Value must not repeat across rows
    Unique,
    /// Textual form must fully match a regular expression
    Pattern,
    /// Value must be one of an allowed set
    Enum,
    /// Value must not be below a bound
    Minimum,
    /// Value must not be above a bound
    Maximum,
    /// Length must not be below a bound
    MinLength,
    /// Length must not be above a bound
    MaxLength,
}

impl ConstraintKind {
    /// Every constraint kind, in declaration order.
    pub const ALL: [ConstraintKind; 8] = [
        ConstraintKind::Required,
        ConstraintKind::Unique,
        ConstraintKind::Pattern,
        ConstraintKind::Enum,
        ConstraintKind::Minimum,
        ConstraintKind::Maximum,
        ConstraintKind::MinLength,
        ConstraintKind::MaxLength,
    ];

    /// Returns the constraint name as written in a schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Required => "required",
            ConstraintKind::Unique => "unique",
            ConstraintKind::Pattern => "pattern",
            ConstraintKind::Enum => "enum",
            ConstraintKind::Minimum => "minimum",
            ConstraintKind::Maximum => "maximum",
            ConstraintKind::MinLength => "minLength",
            ConstraintKind::MaxLength => "maxLength",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation constraints that can be declared on a field.
///
/// Bound and enum values are kept as raw JSON here; the casting engine
/// interprets them through the field's own type when the schema is compiled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Field must have a value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Values must be unique across rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    /// Regular expression the raw text must fully match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<JsonValue>>,

    /// Inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<JsonValue>,

    /// Inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<JsonValue>,

    /// Minimum length of strings, arrays and objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum length of strings, arrays and objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl Constraints {
    /// Returns true if no constraint is declared.
    pub fn is_empty(&self) -> bool {
        self.declared().is_empty()
    }

    /// Returns the kinds of every declared constraint, in declaration order.
    pub fn declared(&self) -> Vec<ConstraintKind> {
        ConstraintKind::ALL
            .into_iter()
            .filter(|kind| self.is_declared(*kind))
            .collect()
    }

    /// Returns true if the given constraint is present.
    pub fn is_declared(&self, kind: ConstraintKind) -> bool {
        match kind {
            ConstraintKind::Required => self.required.is_some(),
            ConstraintKind::Unique => self.unique.is_some(),
            ConstraintKind::Pattern => self.pattern.is_some(),
            ConstraintKind::Enum => self.allowed_values.is_some(),
            ConstraintKind::Minimum => self.minimum.is_some(),
            ConstraintKind::Maximum => self.maximum.is_some(),
            ConstraintKind::MinLength => self.min_length.is_some(),
            ConstraintKind::MaxLength => self.max_length.is_some(),
        }
    }
}
