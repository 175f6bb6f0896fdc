//! Type casters.
//!
//! One caster per logical type. Each is built once per field from its
//! `FieldDefinition`, at which point formats and options are resolved and
//! checked; after that a caster is an immutable, pure function from a raw
//! value to a typed `Value`.

mod boolean;
mod duration;
mod geo;
mod number;
mod string;
mod structured;
mod temporal;

pub use boolean::BooleanType;
pub use duration::DurationType;
pub use geo::{GeoJsonType, GeoPointType};
pub use number::{IntegerType, NumberType};
pub use string::StringType;
pub use structured::{AnyType, ArrayType, ObjectType};
pub use temporal::{DateTimeType, DateType, TimeType, YearMonthType, YearType};

use crate::Value;
use serde_json::Value as JsonValue;
use std::fmt;
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};

/// Result of casting one raw value.
pub type CastResult = std::result::Result<Value, CastFailure>;

/// Reason a raw value could not be interpreted as a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastFailure {
    reason: String,
}

impl CastFailure {
    /// Creates a new cast failure.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the failure reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for CastFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Capability shared by every type caster.
pub trait Cast {
    /// Type identifier as written in a schema.
    fn name(&self) -> &'static str;

    /// Constraints fields of this type may declare.
    fn supported_constraints(&self) -> &'static [ConstraintKind];

    /// Casts a raw, non-missing value.
    fn cast(&self, raw: &JsonValue) -> CastResult;
}

/// Constraints every type honors.
pub(crate) const BASE_CONSTRAINTS: &[ConstraintKind] = &[
    ConstraintKind::Required,
    ConstraintKind::Unique,
    ConstraintKind::Pattern,
    ConstraintKind::Enum,
];

/// Constraints honored by ordered types.
pub(crate) const ORDERED_CONSTRAINTS: &[ConstraintKind] = &[
    ConstraintKind::Required,
    ConstraintKind::Unique,
    ConstraintKind::Pattern,
    ConstraintKind::Enum,
    ConstraintKind::Minimum,
    ConstraintKind::Maximum,
];

/// Constraints honored by types with a length.
pub(crate) const SIZED_CONSTRAINTS: &[ConstraintKind] = &[
    ConstraintKind::Required,
    ConstraintKind::Unique,
    ConstraintKind::Pattern,
    ConstraintKind::Enum,
    ConstraintKind::MinLength,
    ConstraintKind::MaxLength,
];

/// A resolved caster for one field.
#[derive(Debug, Clone)]
pub enum TypeCaster {
    Any(AnyType),
    Array(ArrayType),
    Boolean(BooleanType),
    Date(DateType),
    DateTime(DateTimeType),
    Duration(DurationType),
    GeoJson(GeoJsonType),
    GeoPoint(GeoPointType),
    Integer(IntegerType),
    Number(NumberType),
    Object(ObjectType),
    String(StringType),
    Time(TimeType),
    Year(YearType),
    YearMonth(YearMonthType),
}

impl TypeCaster {
    fn inner(&self) -> &dyn Cast {
        match self {
            TypeCaster::Any(t) => t,
            TypeCaster::Array(t) => t,
            TypeCaster::Boolean(t) => t,
            TypeCaster::Date(t) => t,
            TypeCaster::DateTime(t) => t,
            TypeCaster::Duration(t) => t,
            TypeCaster::GeoJson(t) => t,
            TypeCaster::GeoPoint(t) => t,
            TypeCaster::Integer(t) => t,
            TypeCaster::Number(t) => t,
            TypeCaster::Object(t) => t,
            TypeCaster::String(t) => t,
            TypeCaster::Time(t) => t,
            TypeCaster::Year(t) => t,
            TypeCaster::YearMonth(t) => t,
        }
    }

    /// Returns true if fields of this type may declare the constraint.
    pub fn supports(&self, kind: ConstraintKind) -> bool {
        self.supported_constraints().contains(&kind)
    }
}

impl Cast for TypeCaster {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        self.inner().supported_constraints()
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        self.inner().cast(raw)
    }
}

/// Fails unless the field's format is one of `allowed`.
pub(crate) fn expect_format(
    field: &FieldDefinition,
    type_name: &str,
    allowed: &[&str],
) -> Result<(), SchemaError> {
    if allowed.contains(&field.format.as_str()) {
        Ok(())
    } else {
        Err(SchemaError::unknown_format(
            &field.name,
            type_name,
            &field.format,
        ))
    }
}

/// Builds the standard "not a <type>" failure for a raw value.
pub(crate) fn not_a(raw: &JsonValue, type_name: &str) -> CastFailure {
    CastFailure::new(format!("{} is not a {}", describe(raw), type_name))
}

/// Renders a raw value for error messages.
pub(crate) fn describe(raw: &JsonValue) -> String {
    match raw {
        JsonValue::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// Returns the raw value's text: strings as-is, numbers in their JSON form.
pub(crate) fn raw_text(raw: &JsonValue) -> Option<String> {
    match raw {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
