//! Number and integer casting.
//!
//! Both types share the same text normalization: optional stripping of
//! non-numeric decoration (`bareNumber: false` or the `currency` format),
//! removal of the grouping character, then mapping the decimal character
//! to `.`. Numbers become `Decimal`s, never floats.

use super::{
    Cast, CastFailure, CastResult, ORDERED_CONSTRAINTS, describe, expect_format, not_a, raw_text,
};
use crate::Value;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value as JsonValue;
use std::str::FromStr;
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};

#[derive(Debug, Clone)]
struct NumericText {
    decimal_char: String,
    group_char: Option<String>,
    strip_decoration: bool,
}

impl NumericText {
    fn from_field(field: &FieldDefinition, currency: bool) -> Self {
        Self {
            decimal_char: field
                .decimal_char
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| ".".to_string()),
            group_char: field.group_char.clone().filter(|c| !c.is_empty()),
            strip_decoration: currency || !field.bare_number.unwrap_or(true),
        }
    }

    fn normalize(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if self.strip_decoration {
            let decimal_lead = self.decimal_char.chars().next();
            text = text
                .trim_start_matches(|c: char| {
                    !(c.is_ascii_digit() || c == '-' || c == '+' || Some(c) == decimal_lead)
                })
                .trim_end_matches(|c: char| !c.is_ascii_digit())
                .to_string();
            text.retain(|c| !c.is_whitespace());
        }

        if let Some(group) = &self.group_char {
            text = text.replace(group.as_str(), "");
        }

        if self.decimal_char != "." {
            text = text.replace(self.decimal_char.as_str(), ".");
        }

        text
    }
}

/// Why a numeral could not become a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumeralError {
    /// Not a numeral at all
    Malformed,
    /// A numeral too large for `Decimal`
    OutOfRange,
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `[sign] digits [. digits] [(e|E) [sign] digits]` into its
/// mantissa and exponent, or returns `None` for anything else.
fn split_numeral(text: &str) -> Option<(&str, Option<&str>)> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(mantissa),
    };
    let exponent_ok = exponent.is_none_or(|e| is_digits(e.strip_prefix(['+', '-']).unwrap_or(e)));

    (mantissa_ok && exponent_ok).then_some((mantissa, exponent))
}

/// Parses a numeral into a `Decimal`.
///
/// Digits beyond `Decimal`'s 28 decimal places are rounded away, so very
/// small magnitudes survive; magnitudes above `Decimal::MAX` do not.
fn parse_decimal(text: &str) -> Result<Decimal, NumeralError> {
    let (mantissa, exponent) = split_numeral(text).ok_or(NumeralError::Malformed)?;

    let mut value = Decimal::from_str(mantissa).map_err(|_| NumeralError::OutOfRange)?;

    let exponent = match exponent {
        Some(e) => i64::from_str(e).map_err(|_| NumeralError::OutOfRange)?,
        None => 0,
    };
    if exponent > 0 {
        for _ in 0..exponent {
            if value.is_zero() {
                break;
            }
            value = value
                .checked_mul(Decimal::TEN)
                .ok_or(NumeralError::OutOfRange)?;
        }
    } else {
        for _ in exponent..0 {
            if value.is_zero() {
                break;
            }
            value = value
                .checked_div(Decimal::TEN)
                .ok_or(NumeralError::OutOfRange)?;
        }
    }

    Ok(if text.starts_with('-') { -value } else { value })
}

/// Casts text and JSON numbers to arbitrary-precision decimals.
#[derive(Debug, Clone)]
pub struct NumberType {
    text: NumericText,
}

impl NumberType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "number", &["default", "currency"])?;
        Ok(Self {
            text: NumericText::from_field(field, field.format == "currency"),
        })
    }
}

impl Cast for NumberType {
    fn name(&self) -> &'static str {
        "number"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        ORDERED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        let text = match raw {
            JsonValue::Number(n) => n.to_string(),
            JsonValue::String(s) => self.text.normalize(s),
            _ => return Err(not_a(raw, self.name())),
        };

        match parse_decimal(&text) {
            Ok(d) => Ok(Value::Number(d)),
            Err(NumeralError::Malformed) => Err(not_a(raw, self.name())),
            Err(NumeralError::OutOfRange) => Err(CastFailure::new(format!(
                "{} is out of number range",
                describe(raw)
            ))),
        }
    }
}

/// Casts text and JSON numbers to 64-bit integers.
///
/// A numeral with a fractional part is truncated toward zero; anything
/// else that is not numeric fails.
#[derive(Debug, Clone)]
pub struct IntegerType {
    text: NumericText,
}

impl IntegerType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "integer", &["default"])?;
        Ok(Self {
            text: NumericText::from_field(field, false),
        })
    }

    fn parse(&self, text: &str) -> Result<i64, CastFailure> {
        if let Ok(i) = i64::from_str(text) {
            return Ok(i);
        }

        let out_of_range = || CastFailure::new(format!("'{text}' is out of integer range"));
        let decimal = parse_decimal(text).map_err(|e| match e {
            NumeralError::Malformed => CastFailure::new(format!("'{text}' is not an integer")),
            NumeralError::OutOfRange => out_of_range(),
        })?;
        decimal.trunc().to_i64().ok_or_else(out_of_range)
    }
}

impl Cast for IntegerType {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        ORDERED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        if let Some(i) = raw.as_i64() {
            return Ok(Value::Integer(i));
        }

        let text = match raw {
            JsonValue::String(s) => self.text.normalize(s),
            JsonValue::Number(_) => raw_text(raw).unwrap_or_default(),
            _ => return Err(not_a(raw, self.name())),
        };

        self.parse(&text).map(Value::Integer)
    }
}
