//! Tests for date and time display.

use serde_json::json;

use reg_normalization::{
    DisplayFormat, Locale, PLACEHOLDER, format_date, format_date_time, format_time,
    normalize_date_field,
};

fn tr() -> DisplayFormat {
    DisplayFormat::default()
}

#[test]
fn stored_timestamp_in_display_offset() {
    // 2025-10-17T11:30:00Z
    let ts = json!({"seconds": 1760700600, "nanoseconds": 0});
    assert_eq!(format_date(&ts, &tr()), "17 Ekim 2025");
    assert_eq!(format_time(&ts, &tr()), "14:30");
    assert_eq!(format_date_time(&ts, &tr()), "17 Ekim 2025 14:30");
}

#[test]
fn offset_can_cross_midnight() {
    // 2025-10-17T22:30:00Z is already the 18th in Türkiye
    let ts = json!({"_seconds": 1760740200, "_nanoseconds": 0});
    assert_eq!(format_date(&ts, &tr()), "18 Ekim 2025");
    let utc = tr().with_offset_minutes(0);
    assert_eq!(format_date(&ts, &utc), "17 Ekim 2025");
}

#[test]
fn iso_strings() {
    assert_eq!(format_date(&json!("2025-10-17T11:30:00Z"), &tr()), "17 Ekim 2025");
    assert_eq!(format_time(&json!("2025-10-17T11:30:00+03:00"), &tr()), "11:30");
    assert_eq!(format_time(&json!("2025-10-17T09:05"), &tr()), "09:05");
    assert_eq!(format_date(&json!("1990-05-12"), &tr()), "12 Mayıs 1990");
    assert_eq!(format_time(&json!("1990-05-12"), &tr()), "00:00");
}

#[test]
fn english_locale() {
    let en = tr().with_locale(Locale::English);
    assert_eq!(format_date(&json!("2025-02-01"), &en), "1 February 2025");
}

#[test]
fn malformed_values_fall_back_to_placeholder() {
    for value in [
        json!(null),
        json!(""),
        json!("not a date"),
        json!("2025-13-40"),
        json!(17),
        json!(true),
        json!({"seconds": "x"}),
        json!([1, 2]),
    ] {
        assert_eq!(format_date(&value, &tr()), PLACEHOLDER, "{value}");
        assert_eq!(format_time(&value, &tr()), PLACEHOLDER, "{value}");
        assert_eq!(format_date_time(&value, &tr()), PLACEHOLDER, "{value}");
    }
}

#[test]
fn date_field_keeps_free_text() {
    assert_eq!(
        normalize_date_field(&json!("1990-05-12"), &tr()).as_deref(),
        Some("12 Mayıs 1990")
    );
    assert_eq!(
        normalize_date_field(&json!(" 12/05/1990 "), &tr()).as_deref(),
        Some("12/05/1990")
    );
    assert_eq!(normalize_date_field(&json!(null), &tr()), None);
    assert_eq!(normalize_date_field(&json!(""), &tr()), None);
}
