//! Participation day normalization.
//!
//! The day field has been stored as a list, a comma-separated string, an
//! index map (`{"0": "Oct 17"}`), a label→selected map (`{"Oct 17": true}`),
//! a single timestamp, and under several legacy names. All of them resolve to
//! a deduplicated list of display labels.

use std::collections::HashSet;

use serde_json::{Map, Value};

use reg_model::{SubmissionRecord, Timestamp, is_truthy, ordered_entries, value_to_string};

use crate::datetime::long_date_of;
use crate::format::DisplayFormat;

/// Day field names, current first. The first one holding a non-null value wins.
pub const DAY_FIELDS: &[&str] = &[
    "selectedDays",
    "participationDay",
    "participationDays",
    "days",
    "day",
    "selectedDay",
];

/// A map is treated as label→flag when at least this share of its values are booleans.
const BOOLEAN_MAP_RATIO: f64 = 0.6;

/// Leftovers of flag maps that must never show up as labels.
const FLAG_RESIDUE: &[&str] = &["true", "false", "0", "1"];

/// Members that carry the label of a wrapped day object, in priority order.
const LABEL_MEMBERS: &[&str] = &["label", "name", "day"];

/// Normalizes one raw day token into a display label.
///
/// Returns `None` for values that carry no label: `null`, booleans, flag
/// residue, single-character numbers, and shapes with no usable text.
pub fn normalize_day_token(token: &Value, format: &DisplayFormat) -> Option<String> {
    match token {
        Value::Null | Value::Bool(_) => None,
        Value::Number(_) => {
            let text = value_to_string(token);
            // Stray 0/1 flags sometimes arrive as numbers
            if text.chars().count() > 1 {
                Some(text)
            } else {
                None
            }
        }
        Value::String(s) => clean_label(s),
        Value::Object(map) => normalize_object_token(token, map, format),
        Value::Array(_) => {
            let coerced = clean_label(&value_to_string(token));
            if coerced.is_none() {
                tracing::trace!("Dropping day token with no text");
            }
            coerced
        }
    }
}

fn normalize_object_token(
    token: &Value,
    map: &Map<String, Value>,
    format: &DisplayFormat,
) -> Option<String> {
    if Timestamp::is_timestamp_like(token) {
        return long_date_of(token, format);
    }

    for member in LABEL_MEMBERS {
        if let Some(inner) = map.get(*member).filter(|v| is_truthy(v)) {
            return match inner {
                Value::Object(_) | Value::Array(_) => normalize_day_token(inner, format),
                scalar => clean_label(&value_to_string(scalar)),
            };
        }
    }

    if map.len() == 1
        && let Some((_, inner)) = map.iter().next()
    {
        return normalize_day_token(inner, format);
    }

    tracing::trace!(members = map.len(), "Unrecognized day token shape");
    None
}

fn clean_label(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || FLAG_RESIDUE.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extracts the raw day tokens of a record, before normalization.
///
/// Resolves the first non-null field of [`DAY_FIELDS`], falling back to the
/// whole record, then flattens the value:
///
/// - arrays are used as-is
/// - label→flag maps keep the keys whose flag is truthy
/// - other maps keep their values
/// - strings are split on commas
/// - any other scalar becomes a one-element list
pub fn extract_day_tokens(fields: &Map<String, Value>) -> Vec<Value> {
    let candidate = DAY_FIELDS
        .iter()
        .find_map(|name| fields.get(*name).filter(|v| !v.is_null()));

    match candidate {
        Some(value) => tokens_of(value),
        None => tokens_of_map(fields),
    }
}

fn tokens_of(value: &Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.clone(),
        // A single stored timestamp is one token, not a map of parts
        Value::Object(_) if Timestamp::is_timestamp_like(value) => vec![value.clone()],
        Value::Object(map) => tokens_of_map(map),
        Value::String(s) => s
            .split(',')
            .map(|piece| Value::String(piece.trim().to_string()))
            .collect(),
        other => vec![other.clone()],
    }
}

fn tokens_of_map(map: &Map<String, Value>) -> Vec<Value> {
    let entries = ordered_entries(map);
    if entries.is_empty() {
        return Vec::new();
    }

    let boolean_count = entries.iter().filter(|(_, v)| v.is_boolean()).count();
    let ratio = boolean_count as f64 / entries.len() as f64;

    if ratio >= BOOLEAN_MAP_RATIO {
        entries
            .into_iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(key, _)| Value::String(key.to_string()))
            .collect()
    } else {
        entries.into_iter().map(|(_, v)| v.clone()).collect()
    }
}

/// Participation day labels of a record, deduplicated in first-seen order.
pub fn participation_days(record: &SubmissionRecord, format: &DisplayFormat) -> Vec<String> {
    participation_days_from_fields(record.fields(), format)
}

/// Same as [`participation_days`] for a bare field map.
pub fn participation_days_from_fields(
    fields: &Map<String, Value>,
    format: &DisplayFormat,
) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_day_tokens(fields)
        .iter()
        .filter_map(|token| normalize_day_token(token, format))
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fmt() -> DisplayFormat {
        DisplayFormat::default()
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_normalize_scalars() {
        assert_eq!(normalize_day_token(&json!(null), &fmt()), None);
        assert_eq!(normalize_day_token(&json!(true), &fmt()), None);
        assert_eq!(normalize_day_token(&json!(1), &fmt()), None);
        assert_eq!(normalize_day_token(&json!(17), &fmt()), Some("17".to_string()));
        assert_eq!(normalize_day_token(&json!(" Oct 17 "), &fmt()), Some("Oct 17".to_string()));
        assert_eq!(normalize_day_token(&json!("false"), &fmt()), None);
        assert_eq!(normalize_day_token(&json!("   "), &fmt()), None);
    }

    #[test]
    fn test_normalize_objects() {
        assert_eq!(
            normalize_day_token(&json!({"label": "Day 1", "name": "ignored"}), &fmt()),
            Some("Day 1".to_string())
        );
        assert_eq!(
            normalize_day_token(&json!({"label": "", "day": "Oct 18"}), &fmt()),
            Some("Oct 18".to_string())
        );
        assert_eq!(
            normalize_day_token(&json!({"x": {"y": "Oct 19"}}), &fmt()),
            Some("Oct 19".to_string())
        );
        assert_eq!(normalize_day_token(&json!({"a": "x", "b": "y"}), &fmt()), None);
    }

    #[test]
    fn test_scalar_label_members_are_coerced() {
        assert_eq!(
            normalize_day_token(&json!({"label": 5}), &fmt()),
            Some("5".to_string())
        );
        assert_eq!(
            normalize_day_token(&json!({"day": 17, "selected": true}), &fmt()),
            Some("17".to_string())
        );
        assert_eq!(
            normalize_day_token(&json!({"name": {"label": "Oct 20"}}), &fmt()),
            Some("Oct 20".to_string())
        );
    }

    #[test]
    fn test_normalize_timestamp() {
        // 2025-10-17T09:00:00Z is 12:00 in Türkiye
        let token = json!({"seconds": 1760691600, "nanoseconds": 0});
        assert_eq!(normalize_day_token(&token, &fmt()), Some("17 Ekim 2025".to_string()));
    }

    #[test]
    fn test_extract_prefers_first_present_field() {
        let record = fields(json!({
            "selectedDays": null,
            "participationDay": "Oct 17, Oct 18",
            "days": ["ignored"],
        }));
        assert_eq!(
            extract_day_tokens(&record),
            vec![json!("Oct 17"), json!("Oct 18")]
        );
    }

    #[test]
    fn test_extract_boolean_map() {
        let record = fields(json!({
            "selectedDays": {"Oct 17": true, "Oct 18": false, "Oct 19": true}
        }));
        assert_eq!(
            extract_day_tokens(&record),
            vec![json!("Oct 17"), json!("Oct 19")]
        );
    }

    #[test]
    fn test_extract_index_map_in_numeric_order() {
        let record = fields(json!({
            "selectedDays": {"10": "K", "2": "C", "0": "A"}
        }));
        assert_eq!(
            extract_day_tokens(&record),
            vec![json!("A"), json!("C"), json!("K")]
        );
    }

    #[test]
    fn test_extract_mixed_map_below_ratio_keeps_values() {
        let record = fields(json!({
            "days": {"a": true, "b": "Oct 18", "c": "Oct 19"}
        }));
        assert_eq!(
            extract_day_tokens(&record),
            vec![json!(true), json!("Oct 18"), json!("Oct 19")]
        );
    }

    #[test]
    fn test_extract_scalar_and_timestamp() {
        let record = fields(json!({"day": 18}));
        assert_eq!(extract_day_tokens(&record), vec![json!(18)]);

        let ts = json!({"seconds": 1760691600, "nanoseconds": 0});
        let record = fields(json!({"participationDay": ts.clone()}));
        assert_eq!(extract_day_tokens(&record), vec![ts]);
    }

    #[test]
    fn test_participation_days_dedupes() {
        let record = fields(json!({"selectedDays": ["Oct 17", "Oct 17", "october 17"]}));
        assert_eq!(
            participation_days_from_fields(&record, &fmt()),
            vec!["Oct 17", "october 17"]
        );
    }
}
