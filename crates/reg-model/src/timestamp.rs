//! Stored timestamp shape.
//!
//! The document store serializes native timestamps as an object with integer
//! `seconds` and `nanoseconds` members. Exports produced by the admin SDK use
//! the underscore-prefixed variants (`_seconds`, `_nanoseconds`); both are
//! accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A point in time as stored by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second part, `0..1_000_000_000`.
    pub nanoseconds: u32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanoseconds: at.timestamp_subsec_nanos(),
        }
    }

    /// Recognizes the stored timestamp shape.
    ///
    /// Requires an integer `seconds` (or `_seconds`) member; the nanosecond
    /// member is optional and defaults to zero. Anything else yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let seconds = integer_member(map, "seconds", "_seconds")?;
        let nanoseconds = match map.get("nanoseconds").or_else(|| map.get("_nanoseconds")) {
            None | Some(Value::Null) => 0,
            Some(v) => u32::try_from(v.as_i64()?).ok()?,
        };
        Some(Self::new(seconds, nanoseconds))
    }

    /// Returns true if the value has the stored timestamp shape.
    pub fn is_timestamp_like(value: &Value) -> bool {
        Self::from_value(value).is_some()
    }

    /// Converts to a UTC datetime, `None` when out of range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }

    /// Serializes back into the stored shape.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "seconds": self.seconds,
            "nanoseconds": self.nanoseconds,
        })
    }
}

fn integer_member(map: &Map<String, Value>, name: &str, alt: &str) -> Option<i64> {
    map.get(name).or_else(|| map.get(alt))?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_variants() {
        assert_eq!(
            Timestamp::from_value(&json!({"seconds": 1760700000, "nanoseconds": 5})),
            Some(Timestamp::new(1_760_700_000, 5))
        );
        assert_eq!(
            Timestamp::from_value(&json!({"_seconds": 10, "_nanoseconds": 0})),
            Some(Timestamp::new(10, 0))
        );
        assert_eq!(
            Timestamp::from_value(&json!({"seconds": 10})),
            Some(Timestamp::new(10, 0))
        );
    }

    #[test]
    fn test_from_value_rejects_other_shapes() {
        assert!(Timestamp::from_value(&json!("2025-10-17")).is_none());
        assert!(Timestamp::from_value(&json!({"seconds": "10"})).is_none());
        assert!(Timestamp::from_value(&json!({"seconds": 1.5})).is_none());
        assert!(Timestamp::from_value(&json!({"seconds": 1, "nanoseconds": -1})).is_none());
        assert!(Timestamp::from_value(&json!({"label": "Oct 17"})).is_none());
    }

    #[test]
    fn test_value_roundtrip() {
        let ts = Timestamp::new(1_760_700_000, 250);
        assert_eq!(Timestamp::from_value(&ts.to_value()), Some(ts));
    }

    #[test]
    fn test_to_utc() {
        let at = Timestamp::new(0, 0).to_utc().unwrap();
        assert_eq!(at.to_rfc3339(), "1970-01-01T00:00:00+00:00");
        assert!(Timestamp::new(0, 2_000_000_000).to_utc().is_none());
    }
}
