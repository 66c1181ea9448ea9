//! Collaborator ports: the document store and the object store.
//!
//! The admin view only needs ordered reads, single-document patch/delete and
//! object deletion. Adapters for a managed backend implement these traits;
//! this module ships an in-memory pair for tests and a file-backed pair for
//! working against exported data.

mod json_dir;
mod local_objects;
mod memory;

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use reg_model::value_to_string;
use reg_normalization::{DisplayFormat, parse_date_value};

use crate::error::StoreResult;

pub use json_dir::JsonDirStore;
pub use local_objects::LocalObjectStore;
pub use memory::{InMemoryDocumentStore, InMemoryObjectStore};

/// Sort direction of an ordered query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// A stored document: its id plus the untyped field map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Schemaless document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection ordered by one field.
    async fn query(
        &self,
        collection: &str,
        order_by: &str,
        direction: SortDirection,
    ) -> StoreResult<Vec<Document>>;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Merge `patch` into an existing document. Fails if the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Map<String, Value>)
    -> StoreResult<()>;

    /// Delete a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
}

/// Binary object storage addressed by opaque URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes at `path` and return the URL to save in a record.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> StoreResult<String>;

    async fn delete(&self, url: &str) -> StoreResult<()>;
}

/// Ordering key of a field value: timestamps by instant, everything else by text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Instant(DateTime<Utc>),
    Text(String),
}

fn sort_key(value: Option<&Value>, format: &DisplayFormat) -> Option<SortKey> {
    let value = value.filter(|v| !v.is_null())?;
    if let Some(at) = parse_date_value(value).and_then(|p| p.to_utc(format)) {
        return Some(SortKey::Instant(at));
    }
    Some(SortKey::Text(value_to_string(value)))
}

/// Compares two documents by a field; documents missing the field sort last
/// in either direction. Naive datetimes are read in `format`'s offset.
pub(crate) fn compare_by_field(
    a: &Map<String, Value>,
    b: &Map<String, Value>,
    field: &str,
    direction: SortDirection,
    format: &DisplayFormat,
) -> Ordering {
    match (sort_key(a.get(field), format), sort_key(b.get(field), format)) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.cmp(&y),
            SortDirection::Descending => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
