//! JSON value helpers.
//!
//! Stored documents carry whatever shape the form that wrote them produced.
//! These helpers give the rest of the workspace one consistent way to coerce
//! such values to text and to walk object members.

use serde_json::{Map, Number, Value};

/// Converts a JSON value to its display text.
///
/// Returns an empty string for `null` and for objects, formats numbers
/// without trailing zeros, and joins arrays with commas.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use reg_model::value_to_string;
///
/// assert_eq!(value_to_string(&json!(null)), "");
/// assert_eq!(value_to_string(&json!(42)), "42");
/// assert_eq!(value_to_string(&json!(17.0)), "17");
/// assert_eq!(value_to_string(&json!("hello")), "hello");
/// assert_eq!(value_to_string(&json!(["a", 2])), "a,2");
/// ```
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        // No meaningful text for an arbitrary mapping
        Value::Object(_) => String::new(),
    }
}

/// Converts a value to trimmed text, returning `None` if the result is empty.
pub fn value_to_string_non_empty(value: &Value) -> Option<String> {
    let s = value_to_string(value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Integers print as-is. Floats use `f64`'s shortest display, which drops
/// a zero fraction (`17.0` prints as `17`).
fn number_text(n: &Number) -> String {
    if let Some(v) = n.as_i64() {
        v.to_string()
    } else if let Some(v) = n.as_u64() {
        v.to_string()
    } else if let Some(v) = n.as_f64() {
        v.to_string()
    } else {
        n.to_string()
    }
}

/// Truthiness as the form runtime sees it.
///
/// `null`, `false`, `0`, `NaN` and the empty string are falsy; everything
/// else, including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns object members in enumeration order.
///
/// Array-index keys (`"0"`, `"1"`, `"10"`) come first in ascending numeric
/// order, followed by the remaining keys in document order.
pub fn ordered_entries(map: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut indexed: Vec<(u32, &str, &Value)> = Vec::new();
    let mut named: Vec<(&str, &Value)> = Vec::new();

    for (key, value) in map {
        match array_index(key) {
            Some(idx) => indexed.push((idx, key.as_str(), value)),
            None => named.push((key.as_str(), value)),
        }
    }

    indexed.sort_by_key(|(idx, _, _)| *idx);
    indexed
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .chain(named)
        .collect()
}

/// Parses a canonical array index: digits only, no leading zeros, below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|idx| *idx != u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_string_scalars() {
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(-3)), "-3");
        assert_eq!(value_to_string(&json!(2.50)), "2.5");
        assert_eq!(value_to_string(&json!({"a": 1})), "");
    }

    #[test]
    fn test_number_text() {
        assert_eq!(value_to_string(&json!(40.0)), "40");
        assert_eq!(value_to_string(&json!(0.0)), "0");
        assert_eq!(value_to_string(&json!(1.25)), "1.25");
        assert_eq!(value_to_string(&json!(u64::MAX)), u64::MAX.to_string());
        assert_eq!(value_to_string(&json!(i64::MIN)), i64::MIN.to_string());
    }

    #[test]
    fn test_value_to_string_non_empty() {
        assert_eq!(value_to_string_non_empty(&json!("  x ")), Some("x".to_string()));
        assert_eq!(value_to_string_non_empty(&json!("   ")), None);
        assert_eq!(value_to_string_non_empty(&json!(null)), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(2)));
    }

    #[test]
    fn test_ordered_entries_index_keys_first() {
        let value = json!({"label": "x", "10": "c", "2": "b", "0": "a", "01": "d"});
        let map = value.as_object().unwrap();
        let keys: Vec<&str> = ordered_entries(map).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "2", "10", "label", "01"]);
    }
}
