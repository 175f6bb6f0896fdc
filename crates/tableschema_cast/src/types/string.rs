use super::{Cast, CastFailure, CastResult, SIZED_CONSTRAINTS, not_a};
use crate::Value;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value as JsonValue;
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringFormat {
    Default,
    Email,
    Uri,
    Binary,
    Uuid,
}

/// Casts text, checking it against the field's string format.
#[derive(Debug, Clone)]
pub struct StringType {
    format: StringFormat,
}

impl StringType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        let format = match field.format.as_str() {
            "default" => StringFormat::Default,
            "email" => StringFormat::Email,
            "uri" => StringFormat::Uri,
            "binary" => StringFormat::Binary,
            "uuid" => StringFormat::Uuid,
            other => return Err(SchemaError::unknown_format(&field.name, "string", other)),
        };
        Ok(Self { format })
    }

    fn check_format(&self, text: &str) -> Result<(), CastFailure> {
        let valid = match self.format {
            StringFormat::Default => true,
            StringFormat::Email => text.validate_email(),
            StringFormat::Uri => text.validate_url(),
            StringFormat::Binary => STANDARD.decode(text).is_ok(),
            StringFormat::Uuid => Uuid::parse_str(text).is_ok(),
        };

        if valid {
            Ok(())
        } else {
            let label = match self.format {
                StringFormat::Default => "string",
                StringFormat::Email => "email address",
                StringFormat::Uri => "URI",
                StringFormat::Binary => "base64 string",
                StringFormat::Uuid => "UUID",
            };
            Err(CastFailure::new(format!("'{text}' is not a valid {label}")))
        }
    }
}

impl Cast for StringType {
    fn name(&self) -> &'static str {
        "string"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        SIZED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        let JsonValue::String(text) = raw else {
            return Err(not_a(raw, self.name()));
        };

        self.check_format(text)?;
        Ok(Value::String(text.clone()))
    }
}
