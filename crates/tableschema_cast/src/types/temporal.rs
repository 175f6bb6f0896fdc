//! Date, time, datetime, year and yearmonth casting.
//!
//! Date-like types accept three kinds of format: `default` (ISO 8601),
//! `any` (a fixed list of common layouts tried in order), or an explicit
//! strftime pattern. Patterns must contain at least one `%` directive; the
//! legacy `fmt:` prefix is accepted and stripped.

use super::{Cast, CastResult, ORDERED_CONSTRAINTS, expect_format, not_a};
use crate::{Value, YearMonth};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};

const ANY_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%Y%m%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

const ANY_TIME_FORMATS: &[&str] = &[
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%H%M%S",
];

const ANY_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemporalFormat {
    Default,
    Any,
    Pattern(String),
}

impl TemporalFormat {
    fn from_field(field: &FieldDefinition, type_name: &str) -> Result<Self, SchemaError> {
        match field.format.as_str() {
            "default" => Ok(TemporalFormat::Default),
            "any" => Ok(TemporalFormat::Any),
            other => {
                let pattern = other.strip_prefix("fmt:").unwrap_or(other);
                if pattern.contains('%') {
                    Ok(TemporalFormat::Pattern(pattern.to_string()))
                } else {
                    Err(SchemaError::unknown_format(&field.name, type_name, other))
                }
            }
        }
    }
}

fn parse_rfc3339(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn first_match<T>(
    text: &str,
    formats: &[&str],
    parse: impl Fn(&str, &str) -> Option<T>,
) -> Option<T> {
    formats.iter().find_map(|fmt| parse(text, fmt))
}

/// Casts ISO, common or patterned text to a calendar date.
#[derive(Debug, Clone)]
pub struct DateType {
    format: TemporalFormat,
}

impl DateType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        Ok(Self {
            format: TemporalFormat::from_field(field, "date")?,
        })
    }

    fn parse(&self, text: &str) -> Option<NaiveDate> {
        let parse = |t: &str, f: &str| NaiveDate::parse_from_str(t, f).ok();
        match &self.format {
            TemporalFormat::Default => parse(text, "%Y-%m-%d"),
            TemporalFormat::Any => first_match(text, ANY_DATE_FORMATS, parse)
                .or_else(|| parse_rfc3339(text).map(|dt| dt.date_naive())),
            TemporalFormat::Pattern(pattern) => parse(text, pattern),
        }
    }
}

impl Cast for DateType {
    fn name(&self) -> &'static str {
        "date"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        ORDERED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        raw.as_str()
            .and_then(|text| self.parse(text.trim()))
            .map(Value::Date)
            .ok_or_else(|| not_a(raw, self.name()))
    }
}

/// Casts ISO, common or patterned text to a time of day.
#[derive(Debug, Clone)]
pub struct TimeType {
    format: TemporalFormat,
}

impl TimeType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        Ok(Self {
            format: TemporalFormat::from_field(field, "time")?,
        })
    }

    fn parse(&self, text: &str) -> Option<NaiveTime> {
        let parse = |t: &str, f: &str| NaiveTime::parse_from_str(t, f).ok();
        match &self.format {
            TemporalFormat::Default => first_match(text, &["%H:%M:%S", "%H:%M:%S%.f"], parse),
            TemporalFormat::Any => first_match(text, ANY_TIME_FORMATS, parse),
            TemporalFormat::Pattern(pattern) => parse(text, pattern),
        }
    }
}

impl Cast for TimeType {
    fn name(&self) -> &'static str {
        "time"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        ORDERED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        raw.as_str()
            .and_then(|text| self.parse(text.trim()))
            .map(Value::Time)
            .ok_or_else(|| not_a(raw, self.name()))
    }
}

/// Casts ISO, common or patterned text to a UTC instant.
///
/// Text without an offset is taken to be UTC.
#[derive(Debug, Clone)]
pub struct DateTimeType {
    format: TemporalFormat,
}

impl DateTimeType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        Ok(Self {
            format: TemporalFormat::from_field(field, "datetime")?,
        })
    }

    fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        let naive = |t: &str, f: &str| {
            NaiveDateTime::parse_from_str(t, f)
                .ok()
                .map(|dt| dt.and_utc())
        };
        match &self.format {
            TemporalFormat::Default => parse_rfc3339(text),
            TemporalFormat::Any => parse_rfc3339(text)
                .or_else(|| first_match(text, ANY_DATETIME_FORMATS, naive))
                .or_else(|| {
                    DateTime::parse_from_rfc2822(text)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                }),
            TemporalFormat::Pattern(pattern) => DateTime::parse_from_str(text, pattern)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|| naive(text, pattern)),
        }
    }
}

impl Cast for DateTimeType {
    fn name(&self) -> &'static str {
        "datetime"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        ORDERED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        raw.as_str()
            .and_then(|text| self.parse(text.trim()))
            .map(Value::DateTime)
            .ok_or_else(|| not_a(raw, self.name()))
    }
}

fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Casts a four-digit year.
#[derive(Debug, Clone)]
pub struct YearType;

impl YearType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "year", &["default"])?;
        Ok(Self)
    }
}

impl Cast for YearType {
    fn name(&self) -> &'static str {
        "year"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        ORDERED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        let year = match raw {
            JsonValue::String(s) => parse_year(s),
            JsonValue::Number(n) => n
                .as_i64()
                .filter(|y| (0..=9999).contains(y))
                .and_then(|y| i32::try_from(y).ok()),
            _ => None,
        };

        year.map(Value::Year)
            .ok_or_else(|| not_a(raw, self.name()))
    }
}

/// Casts `YYYY-MM` text or a `[year, month]` pair.
#[derive(Debug, Clone)]
pub struct YearMonthType;

impl YearMonthType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        expect_format(field, "yearmonth", &["default"])?;
        Ok(Self)
    }

    fn from_parts(year: Option<i32>, month: Option<u32>) -> Option<YearMonth> {
        let (year, month) = (year?, month?);
        (1..=12).contains(&month).then_some(YearMonth { year, month })
    }
}

impl Cast for YearMonthType {
    fn name(&self) -> &'static str {
        "yearmonth"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        ORDERED_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        let parsed = match raw {
            JsonValue::String(s) => s.trim().split_once('-').and_then(|(y, m)| {
                let month = (m.len() == 2).then(|| m.parse().ok()).flatten();
                Self::from_parts(parse_year(y), month)
            }),
            JsonValue::Array(parts) if parts.len() == 2 => Self::from_parts(
                parts[0]
                    .as_i64()
                    .filter(|y| (0..=9999).contains(y))
                    .and_then(|y| i32::try_from(y).ok()),
                parts[1].as_u64().and_then(|m| u32::try_from(m).ok()),
            ),
            _ => None,
        };

        parsed
            .map(Value::YearMonth)
            .ok_or_else(|| not_a(raw, self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tableschema_core::FieldBuilder;

    fn field(type_name: &str, format: &str) -> FieldDefinition {
        FieldBuilder::new("t", type_name).format(format).build()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_default() {
        let caster = DateType::new(&field("date", "default")).unwrap();

        assert_eq!(caster.cast(&json!("2019-01-31")), Ok(Value::Date(ymd(2019, 1, 31))));
        assert!(caster.cast(&json!("31/01/2019")).is_err());
        assert!(caster.cast(&json!("2019-02-30")).is_err());
        assert!(caster.cast(&json!(20190131)).is_err());
    }

    #[test]
    fn test_date_any() {
        let caster = DateType::new(&field("date", "any")).unwrap();

        assert_eq!(caster.cast(&json!("2019/01/31")), Ok(Value::Date(ymd(2019, 1, 31))));
        assert_eq!(caster.cast(&json!("31 January 2019")), Ok(Value::Date(ymd(2019, 1, 31))));
        assert_eq!(
            caster.cast(&json!("2019-01-31T10:00:00Z")),
            Ok(Value::Date(ymd(2019, 1, 31)))
        );
        assert!(caster.cast(&json!("someday")).is_err());
    }

    #[test]
    fn test_date_pattern() {
        let caster = DateType::new(&field("date", "%d/%m/%y")).unwrap();
        assert_eq!(caster.cast(&json!("21/11/06")), Ok(Value::Date(ymd(2006, 11, 21))));

        let legacy = DateType::new(&field("date", "fmt:%d/%m/%Y")).unwrap();
        assert_eq!(legacy.cast(&json!("21/11/2006")), Ok(Value::Date(ymd(2006, 11, 21))));
    }

    #[test]
    fn test_date_unknown_format() {
        assert!(matches!(
            DateType::new(&field("date", "dd/mm/yyyy")),
            Err(SchemaError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_time_default() {
        let caster = TimeType::new(&field("time", "default")).unwrap();

        let time = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(caster.cast(&json!("06:00:00")), Ok(Value::Time(time)));

        match caster.cast(&json!("06:00:00.250")) {
            Ok(Value::Time(t)) => assert_eq!(t.nanosecond(), 250_000_000),
            other => panic!("Expected time, got {:?}", other),
        }

        assert!(caster.cast(&json!("3 am")).is_err());
    }

    #[test]
    fn test_time_any() {
        let caster = TimeType::new(&field("time", "any")).unwrap();
        let time = NaiveTime::from_hms_opt(15, 30, 0).unwrap();

        assert_eq!(caster.cast(&json!("15:30")), Ok(Value::Time(time)));
        assert_eq!(caster.cast(&json!("03:30 PM")), Ok(Value::Time(time)));
    }

    #[test]
    fn test_datetime_default() {
        let caster = DateTimeType::new(&field("datetime", "default")).unwrap();
        let expected = Utc.with_ymd_and_hms(2019, 1, 1, 6, 0, 0).unwrap();

        assert_eq!(caster.cast(&json!("2019-01-01T06:00:00Z")), Ok(Value::DateTime(expected)));
        assert_eq!(
            caster.cast(&json!("2019-01-01T08:00:00+02:00")),
            Ok(Value::DateTime(expected))
        );
        assert!(caster.cast(&json!("2019-01-01 06:00:00")).is_err());
    }

    #[test]
    fn test_datetime_any() {
        let caster = DateTimeType::new(&field("datetime", "any")).unwrap();
        let expected = Utc.with_ymd_and_hms(2019, 1, 1, 6, 0, 0).unwrap();

        assert_eq!(caster.cast(&json!("2019-01-01 06:00:00")), Ok(Value::DateTime(expected)));
        assert_eq!(
            caster.cast(&json!("Tue, 1 Jan 2019 06:00:00 +0000")),
            Ok(Value::DateTime(expected))
        );
    }

    #[test]
    fn test_datetime_pattern() {
        let caster = DateTimeType::new(&field("datetime", "%d/%m/%y %H:%M")).unwrap();
        let expected = Utc.with_ymd_and_hms(2006, 11, 21, 16, 30, 0).unwrap();

        assert_eq!(caster.cast(&json!("21/11/06 16:30")), Ok(Value::DateTime(expected)));
    }

    #[test]
    fn test_year() {
        let caster = YearType::new(&field("year", "default")).unwrap();

        assert_eq!(caster.cast(&json!("2000")), Ok(Value::Year(2000)));
        assert_eq!(caster.cast(&json!(1999)), Ok(Value::Year(1999)));
        assert!(caster.cast(&json!("20000")).is_err());
        assert!(caster.cast(&json!("-1")).is_err());
        assert!(caster.cast(&json!("year")).is_err());
        assert!(caster.cast(&json!("1")).is_err());
        assert!(caster.cast(&json!("0")).is_err());
        assert!(caster.cast(&json!("999")).is_err());
        assert_eq!(caster.cast(&json!("0999")), Ok(Value::Year(999)));
    }

    #[test]
    fn test_yearmonth() {
        let caster = YearMonthType::new(&field("yearmonth", "default")).unwrap();
        let expected = Value::YearMonth(YearMonth { year: 2000, month: 5 });

        assert_eq!(caster.cast(&json!("2000-05")), Ok(expected.clone()));
        assert_eq!(caster.cast(&json!([2000, 5])), Ok(expected));
        assert!(caster.cast(&json!("2000-13")).is_err());
        assert!(caster.cast(&json!("2000-5-1")).is_err());
        assert!(caster.cast(&json!([2000])).is_err());
        assert!(caster.cast(&json!("1-05")).is_err());
    }
}
