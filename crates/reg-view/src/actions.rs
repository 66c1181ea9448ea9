//! Admin actions that write to the stores: notes and deletion.

use serde_json::{Map, Value};

use reg_model::{RecordKey, SubmissionRecord, Timestamp, fields};

use crate::error::{Notice, Result, ViewError};
use crate::store::{DocumentStore, ObjectStore};

/// Author recorded when none is given.
pub const DEFAULT_NOTE_AUTHOR: &str = "Admin";

/// An admin note as written to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub note: String,
    pub author: String,
    pub at: Timestamp,
}

impl Annotation {
    /// Builds a note stamped with the current time.
    pub fn new(note: impl Into<String>, author: Option<&str>) -> Self {
        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_NOTE_AUTHOR);
        Self {
            note: note.into(),
            author: author.to_string(),
            at: Timestamp::now(),
        }
    }

    /// The three annotation fields as a partial update.
    pub fn to_patch(&self) -> Map<String, Value> {
        let mut patch = Map::new();
        patch.insert(fields::ADMIN_NOTE.to_string(), Value::String(self.note.clone()));
        patch.insert(fields::NOTE_BY.to_string(), Value::String(self.author.clone()));
        patch.insert(fields::NOTE_DATE.to_string(), self.at.to_value());
        patch
    }

    /// Applies the annotation fields to a loaded record.
    pub fn apply_to(&self, record: &mut SubmissionRecord) {
        for (name, value) in self.to_patch() {
            record.set(name, value);
        }
    }
}

/// Writes an admin note to the record's backing document.
///
/// Only `adminNote`, `noteBy` and `noteDate` are touched. The last write wins.
pub async fn update_annotation(
    store: &dyn DocumentStore,
    key: &RecordKey,
    annotation: &Annotation,
) -> Result<()> {
    store
        .update(key.source.storage_name(), &key.id, annotation.to_patch())
        .await
        .map_err(|e| ViewError::AnnotationWrite {
            key: key.clone(),
            source: e,
        })?;
    tracing::info!(record = %key, author = %annotation.author, "Saved admin note");
    Ok(())
}

/// Result of a successful delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Object URLs that were removed.
    pub removed_objects: Vec<String>,
    /// Object URLs whose delete failed and that are now unreferenced.
    pub orphaned_objects: Vec<String>,
}

impl DeleteOutcome {
    pub fn notice(&self) -> Notice {
        if self.orphaned_objects.is_empty() {
            Notice::success("Submission deleted.")
        } else {
            Notice::warning(format!(
                "Submission deleted, but {} photo(s) could not be removed.",
                self.orphaned_objects.len()
            ))
        }
    }
}

/// Object URLs referenced by a record: photo then passport photo.
pub fn referenced_objects(record: &SubmissionRecord) -> Vec<String> {
    [record.photo_url(), record.passport_photo_url()]
        .into_iter()
        .flatten()
        .collect()
}

/// Deletes a record's document, then its referenced objects.
///
/// If the document delete fails nothing else is touched. Object deletes are
/// best-effort: failures are logged and listed in the outcome.
pub async fn delete_record(
    documents: &dyn DocumentStore,
    objects: &dyn ObjectStore,
    key: &RecordKey,
    object_urls: &[String],
) -> Result<DeleteOutcome> {
    documents
        .delete(key.source.storage_name(), &key.id)
        .await
        .map_err(|e| ViewError::Delete {
            key: key.clone(),
            source: e,
        })?;
    tracing::info!(record = %key, "Deleted submission");

    let mut outcome = DeleteOutcome::default();
    for url in object_urls {
        match objects.delete(url).await {
            Ok(()) => outcome.removed_objects.push(url.clone()),
            Err(err) => {
                tracing::warn!(record = %key, url = %url, error = %err, "Orphaned object after delete");
                outcome.orphaned_objects.push(url.clone());
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_author() {
        assert_eq!(Annotation::new("x", None).author, "Admin");
        assert_eq!(Annotation::new("x", Some("  ")).author, "Admin");
        assert_eq!(Annotation::new("x", Some("Zeynep")).author, "Zeynep");
    }

    #[test]
    fn test_patch_fields() {
        let patch = Annotation::new("VIP guest", Some("Zeynep")).to_patch();
        let keys: Vec<_> = patch.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["adminNote", "noteBy", "noteDate"]);
        assert!(Timestamp::is_timestamp_like(&patch["noteDate"]));
    }
}
