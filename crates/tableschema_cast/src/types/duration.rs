use super::{BASE_CONSTRAINTS, Cast, CastResult, expect_format, not_a};
use crate::{IsoDuration, Value};
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::str::FromStr;
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};

const ISO_DURATION: &str = r"^P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$";

fn count(caps: &Captures<'_>, i: usize) -> Option<u64> {
    caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
}

/// Casts ISO 8601 duration text (`P1Y2M10DT2H30M`).
#[derive(Debug, Clone)]
pub struct DurationType {
    pattern: Regex,
}

impl DurationType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "duration", &["default"])?;
        let pattern = Regex::new(ISO_DURATION).map_err(|e| SchemaError::InvalidPattern {
            field: field.name.clone(),
            error: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    fn parse(&self, text: &str) -> Option<IsoDuration> {
        // "P" and "P1DT" match the grammar but designate nothing
        if text == "P" || text.ends_with('T') {
            return None;
        }
        let caps = self.pattern.captures(text)?;

        let weeks = count(&caps, 3)?;
        let days = count(&caps, 4)?;
        let seconds = match caps.get(7) {
            Some(m) => Decimal::from_str(m.as_str()).ok()?,
            None => Decimal::ZERO,
        };

        Some(IsoDuration {
            years: count(&caps, 1)?,
            months: count(&caps, 2)?,
            days: weeks.checked_mul(7)?.checked_add(days)?,
            hours: count(&caps, 5)?,
            minutes: count(&caps, 6)?,
            seconds,
        })
    }
}

impl Cast for DurationType {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        BASE_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        raw.as_str()
            .and_then(|text| self.parse(text.trim()))
            .map(Value::Duration)
            .ok_or_else(|| not_a(raw, self.name()))
    }
}
