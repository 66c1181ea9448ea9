//! Error types for store access and admin view operations.
//!
//! Collaborator failures are [`StoreError`]s. The operations of this crate
//! wrap them into [`ViewError`]s that say which operation failed, and every
//! [`ViewError`] converts into a user-facing [`Notice`].

use std::path::PathBuf;

use reg_model::{RecordKey, SourceCollection};
use thiserror::Error;

/// Failure reported by the document store or object store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the request.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    /// No document with this id exists in the collection.
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// No object exists at this URL.
    #[error("object not found: {url}")]
    ObjectNotFound { url: String },

    /// The URL does not point inside the object store.
    #[error("invalid object url: {url}")]
    InvalidUrl { url: String },

    /// File I/O error in a file-backed store.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file is not valid JSON or has an unexpected layout.
    #[error("malformed collection file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {message}")]
    Task { message: String },
}

/// Failure of an admin view operation.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Loading a collection failed.
    #[error("failed to load {collection}")]
    Fetch {
        collection: SourceCollection,
        #[source]
        source: StoreError,
    },

    /// Deleting a document failed; nothing was removed.
    #[error("failed to delete {key}")]
    Delete {
        key: RecordKey,
        #[source]
        source: StoreError,
    },

    /// Writing an admin note failed.
    #[error("failed to save note for {key}")]
    AnnotationWrite {
        key: RecordKey,
        #[source]
        source: StoreError,
    },

    /// The record is not part of the loaded working set.
    #[error("record {key} is not loaded")]
    UnknownRecord { key: RecordKey },
}

impl ViewError {
    /// Short message suitable for a dismissible notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch { collection, .. } => format!(
                "{} could not be loaded. Please try again.",
                collection.label()
            ),
            Self::Delete { .. } => "The submission could not be deleted.".to_string(),
            Self::AnnotationWrite { .. } => {
                "The note could not be saved; the previous note was restored.".to_string()
            }
            Self::UnknownRecord { .. } => {
                "The submission is no longer in the list. Refresh and try again.".to_string()
            }
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::error(self.user_message())
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A user-facing notification produced at an operation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;

/// Result type for store collaborators.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ViewError::Fetch {
            collection: SourceCollection::Csb,
            source: StoreError::Unavailable {
                message: "timeout".to_string(),
            },
        };
        assert_eq!(err.to_string(), "failed to load csb");
        assert_eq!(err.user_message(), "CSB could not be loaded. Please try again.");
        assert_eq!(err.notice().level, NoticeLevel::Error);
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = ViewError::Delete {
            key: RecordKey::new(SourceCollection::Artist, "a1"),
            source: StoreError::NotFound {
                collection: "artist".to_string(),
                id: "a1".to_string(),
            },
        };
        assert_eq!(err.to_string(), "failed to delete artist/a1");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("document artist/a1 not found"));
    }
}
