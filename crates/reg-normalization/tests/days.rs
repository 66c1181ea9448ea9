//! Tests for participation day normalization.

use serde_json::{Value, json};

use reg_model::{SourceCollection, SubmissionRecord};
use reg_normalization::{DisplayFormat, Locale, participation_days};

fn record(fields: Value) -> SubmissionRecord {
    SubmissionRecord::from_value("r1", SourceCollection::Participant, fields)
}

fn days(fields: Value) -> Vec<String> {
    participation_days(&record(fields), &DisplayFormat::default())
}

#[test]
fn array_of_labels() {
    assert_eq!(
        days(json!({"selectedDays": ["October 17", "October 18"]})),
        vec!["October 17", "October 18"]
    );
}

#[test]
fn index_map() {
    assert_eq!(days(json!({"selectedDays": {"0": "October 17"}})), vec!["October 17"]);
}

#[test]
fn comma_string_drops_empty_pieces() {
    assert_eq!(
        days(json!({"participationDay": "Oct 17, , Oct 18,"})),
        vec!["Oct 17", "Oct 18"]
    );
}

#[test]
fn boolean_map_keeps_selected_keys() {
    assert_eq!(
        days(json!({"participationDays": {"Oct 17": true, "Oct 18": false, "Oct 19": true}})),
        vec!["Oct 17", "Oct 19"]
    );
}

#[test]
fn legacy_field_names_in_priority_order() {
    assert_eq!(days(json!({"days": ["A"], "day": "B"})), vec!["A"]);
    assert_eq!(days(json!({"day": "B"})), vec!["B"]);
    assert_eq!(days(json!({"selectedDay": "C"})), vec!["C"]);
}

#[test]
fn wrapped_objects_and_flags() {
    assert_eq!(
        days(json!({"selectedDays": [{"label": "Oct 17"}, {"name": "Oct 18"}, true, 0, "1"]})),
        vec!["Oct 17", "Oct 18"]
    );
}

#[test]
fn timestamp_day_uses_locale() {
    let ts = json!({"seconds": 1760691600, "nanoseconds": 0});
    let format = DisplayFormat::default().with_locale(Locale::English);
    let labels = participation_days(&record(json!({"participationDay": ts})), &format);
    assert_eq!(labels, vec!["17 October 2025"]);
}

#[test]
fn duplicates_collapse_on_exact_match() {
    assert_eq!(days(json!({"selectedDays": ["Oct 17", "Oct 17"]})), vec!["Oct 17"]);
    assert_eq!(
        days(json!({"selectedDays": ["Oct 17", " Oct 17 ", "october 17"]})),
        vec!["Oct 17", "october 17"]
    );
}

#[test]
fn idempotent_on_clean_lists() {
    let first = days(json!({"selectedDays": {"0": " Oct 17", "1": "Oct 18", "2": "Oct 17"}}));
    let second = days(json!({"selectedDays": first.clone()}));
    assert_eq!(first, second);
}

#[test]
fn whole_record_fallback() {
    assert_eq!(
        days(json!({"Oct 17": true, "Oct 18": true, "Oct 19": false})),
        vec!["Oct 17", "Oct 18"]
    );
    assert!(days(json!({})).is_empty());
}

#[test]
fn stable_across_calls() {
    let fields = json!({"selectedDays": {"b": "Oct 18", "a": "Oct 17", "c": null}});
    assert_eq!(days(fields.clone()), days(fields));
}
