//! Date and time display for timestamp-like values.
//!
//! Accepts the stored `{seconds, nanoseconds}` shape and ISO 8601 strings
//! (RFC 3339 instants, naive datetimes, plain dates). Naive values are taken
//! to be wall-clock time in the display offset.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use reg_model::Timestamp;

use crate::day::normalize_day_token;
use crate::format::{DisplayFormat, PLACEHOLDER};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A parsed timestamp-like value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    /// An absolute instant.
    Instant(DateTime<Utc>),
    /// Wall-clock datetime without offset.
    Local(NaiveDateTime),
    /// Calendar date without time.
    Date(NaiveDate),
}

impl DateValue {
    /// Wall-clock datetime in the display offset.
    pub fn to_local(&self, format: &DisplayFormat) -> NaiveDateTime {
        match self {
            Self::Instant(at) => at.with_timezone(&format.offset).naive_local(),
            Self::Local(naive) => *naive,
            Self::Date(date) => date.and_time(chrono::NaiveTime::MIN),
        }
    }

    /// Absolute instant, reading naive values in the display offset.
    pub fn to_utc(&self, format: &DisplayFormat) -> Option<DateTime<Utc>> {
        match self {
            Self::Instant(at) => Some(*at),
            Self::Local(_) | Self::Date(_) => self
                .to_local(format)
                .and_local_timezone(format.offset)
                .single()
                .map(|at| at.with_timezone(&Utc)),
        }
    }
}

/// Parses a timestamp-like value, `None` for anything unrecognized.
pub fn parse_date_value(value: &Value) -> Option<DateValue> {
    match value {
        Value::Object(_) => Timestamp::from_value(value)
            .and_then(|ts| ts.to_utc())
            .map(DateValue::Instant),
        Value::String(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<DateValue> {
    if text.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(DateValue::Instant(at.with_timezone(&Utc)));
    }
    for pattern in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(DateValue::Local(naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(DateValue::Date)
}

/// Long localized date (`17 Ekim 2025`), or [`PLACEHOLDER`].
pub fn format_date(value: &Value, format: &DisplayFormat) -> String {
    long_date_of(value, format).unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub(crate) fn long_date_of(value: &Value, format: &DisplayFormat) -> Option<String> {
    parse_date_value(value).map(|parsed| long_date(&parsed.to_local(format), format))
}

/// Hour and minute (`14:30`), or [`PLACEHOLDER`].
pub fn format_time(value: &Value, format: &DisplayFormat) -> String {
    match parse_date_value(value) {
        Some(parsed) => parsed.to_local(format).format("%H:%M").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Long date followed by time (`17 Ekim 2025 14:30`), or [`PLACEHOLDER`].
pub fn format_date_time(value: &Value, format: &DisplayFormat) -> String {
    match parse_date_value(value) {
        Some(parsed) => {
            let local = parsed.to_local(format);
            format!("{} {}", long_date(&local, format), local.format("%H:%M"))
        }
        None => PLACEHOLDER.to_string(),
    }
}

/// Display text for a date-valued field such as `birthDate`.
///
/// Timestamp-like and ISO values become long dates. Any other value goes
/// through [`normalize_day_token`], so free text typed into a date field is
/// kept. Absent or unusable values yield `None`.
pub fn normalize_date_field(value: &Value, format: &DisplayFormat) -> Option<String> {
    if value.is_null() {
        return None;
    }
    long_date_of(value, format).or_else(|| normalize_day_token(value, format))
}

fn long_date(local: &NaiveDateTime, format: &DisplayFormat) -> String {
    format.long_date(local.day(), local.month(), local.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_variants() {
        assert!(matches!(
            parse_date_value(&json!("2025-10-17T11:30:00Z")),
            Some(DateValue::Instant(_))
        ));
        assert!(matches!(
            parse_date_value(&json!("2025-10-17T11:30")),
            Some(DateValue::Local(_))
        ));
        assert!(matches!(
            parse_date_value(&json!("2025-10-17")),
            Some(DateValue::Date(_))
        ));
        assert!(matches!(
            parse_date_value(&json!({"seconds": 1760700600, "nanoseconds": 0})),
            Some(DateValue::Instant(_))
        ));
        assert!(parse_date_value(&json!("Oct 17")).is_none());
        assert!(parse_date_value(&json!(1760700600)).is_none());
    }

    #[test]
    fn test_to_utc_reads_naive_in_offset() {
        let format = DisplayFormat::default();
        let parsed = parse_date_value(&json!("2025-10-17T14:30")).unwrap();
        let at = parsed.to_utc(&format).unwrap();
        assert_eq!(at.to_rfc3339(), "2025-10-17T11:30:00+00:00");
    }
}
