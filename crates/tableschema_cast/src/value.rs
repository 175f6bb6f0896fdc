//! Typed values produced by casting.
//!
//! Raw input arrives as `serde_json::Value` (the shape CSV cells, JSON
//! records and spreadsheet readers all map onto). Casting turns it into a
//! `Value` whose variant is fixed by the field's declared type.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use std::fmt;

/// A cast value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value
    Null,
    /// Text
    String(String),
    /// Boolean
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Arbitrary-precision decimal
    Number(Decimal),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Instant, normalized to UTC
    DateTime(DateTime<Utc>),
    /// Calendar year
    Year(i32),
    /// Calendar year and month
    YearMonth(YearMonth),
    /// ISO 8601 duration
    Duration(IsoDuration),
    /// Ordered sequence
    Array(Vec<JsonValue>),
    /// Structured mapping
    Object(Map<String, JsonValue>),
    /// Longitude/latitude pair
    GeoPoint(GeoPoint),
    /// GeoJSON or TopoJSON document
    GeoJson(JsonValue),
    /// Untyped passthrough
    Any(JsonValue),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::Year(_) => "year",
            Value::YearMonth(_) => "yearmonth",
            Value::Duration(_) => "duration",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::GeoPoint(_) => "geopoint",
            Value::GeoJson(_) => "geojson",
            Value::Any(_) => "any",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Number(d) => Some(*d),
            Value::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    /// Returns the length used by `minLength`/`maxLength`.
    ///
    /// Strings count characters, arrays and objects count entries.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Orders two values of the same ordered type.
    ///
    /// Returns `None` for unordered types and for mismatched variants.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Year(a), Value::Year(b)) => Some(a.cmp(b)),
            (Value::YearMonth(a), Value::YearMonth(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Returns a key that is equal for equal values of the same type.
    pub fn unique_key(&self) -> String {
        match self {
            Value::Number(d) => format!("number:{}", d.normalize()),
            other => format!("{}:{}", other.type_name(), other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Number(d) => write!(f, "{d}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Year(y) => write!(f, "{y:04}"),
            Value::YearMonth(ym) => write!(f, "{ym}"),
            Value::Duration(d) => write!(f, "{d}"),
            Value::Array(items) => write!(f, "{}", JsonValue::Array(items.clone())),
            Value::Object(map) => write!(f, "{}", JsonValue::Object(map.clone())),
            Value::GeoPoint(p) => write!(f, "{p}"),
            Value::GeoJson(v) | Value::Any(v) => write!(f, "{v}"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// A calendar year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Year
    pub year: i32,
    /// Month, 1 through 12
    pub month: u32,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// An ISO 8601 duration (`PnYnMnDTnHnMnS`).
///
/// Calendar components are kept separate because months and years have no
/// fixed length; weeks are folded into days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IsoDuration {
    /// Years
    pub years: u64,
    /// Months
    pub months: u64,
    /// Days (including weeks)
    pub days: u64,
    /// Hours
    pub hours: u64,
    /// Minutes
    pub minutes: u64,
    /// Seconds, possibly fractional
    pub seconds: Decimal,
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("P")?;
        if self.years > 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months > 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        let has_time = self.hours > 0 || self.minutes > 0 || !self.seconds.is_zero();
        if has_time {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if !self.seconds.is_zero() {
                write!(f, "{}S", self.seconds.normalize())?;
            }
        } else if self.years == 0 && self.months == 0 && self.days == 0 {
            f.write_str("T0S")?;
        }
        Ok(())
    }
}

/// A geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude, -180 through 180
    pub lon: f64,
    /// Latitude, -90 through 90
    pub lat: f64,
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lon, self.lat)
    }
}
