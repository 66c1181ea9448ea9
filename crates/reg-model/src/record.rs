//! Submission records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields;
use crate::source::SourceCollection;
use crate::value::value_to_string_non_empty;

/// Identifies one record: ids are only unique within their collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub source: SourceCollection,
    pub id: String,
}

impl RecordKey {
    pub fn new(source: SourceCollection, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.id)
    }
}

/// One form submission as loaded from the document store.
///
/// The identifier and source tag are fixed at load time. Everything else is
/// kept as the loosely typed document the form wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    id: String,
    source: SourceCollection,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl SubmissionRecord {
    pub fn new(id: impl Into<String>, source: SourceCollection, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            source,
            fields,
        }
    }

    /// Builds a record from a JSON object; non-object values give an empty field map.
    pub fn from_value(id: impl Into<String>, source: SourceCollection, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, source, fields)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> SourceCollection {
        self.source
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.source, self.id.clone())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the field value, treating an explicit `null` as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Returns the field as trimmed, non-empty text.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(value_to_string_non_empty)
    }

    /// Returns the raw string value of a field without coercion.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Sets a field and returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    /// `firstName lastName`, with missing parts left empty.
    pub fn full_name(&self) -> String {
        let first = self.text(fields::FIRST_NAME).unwrap_or_default();
        let last = self.text(fields::LAST_NAME).unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }

    pub fn photo_url(&self) -> Option<String> {
        self.text(fields::PHOTO_URL)
    }

    pub fn passport_photo_url(&self) -> Option<String> {
        self.text(fields::PASSPORT_PHOTO_URL)
    }

    /// The field map as a single JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SubmissionRecord {
        SubmissionRecord::from_value(
            "a1",
            SourceCollection::Participant,
            json!({
                "firstName": "Ada",
                "lastName": null,
                "email": "  ",
                "photoUrl": "photos/a1.jpg",
            }),
        )
    }

    #[test]
    fn test_accessors() {
        let record = sample();
        assert_eq!(record.id(), "a1");
        assert_eq!(record.source(), SourceCollection::Participant);
        assert_eq!(record.key().to_string(), "participant/a1");
        assert!(record.get("lastName").is_none());
        assert!(record.text("email").is_none());
        assert_eq!(record.full_name(), "Ada");
        assert_eq!(record.photo_url().as_deref(), Some("photos/a1.jpg"));
        assert!(record.passport_photo_url().is_none());
    }

    #[test]
    fn test_set_and_remove() {
        let mut record = sample();
        assert!(record.set("adminNote", json!("called")).is_none());
        assert_eq!(record.str_field("adminNote"), Some("called"));
        assert_eq!(record.remove("adminNote"), Some(json!("called")));
        assert!(record.get("adminNote").is_none());
    }

    #[test]
    fn test_from_non_object() {
        let record = SubmissionRecord::from_value("x", SourceCollection::Csb, json!("oops"));
        assert!(record.fields().is_empty());
    }

    #[test]
    fn test_serde_flattens_fields() {
        let record = sample();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!("a1"));
        assert_eq!(value["source"], json!("participant"));
        assert_eq!(value["firstName"], json!("Ada"));
    }
}
