//! Document store backed by one JSON file per collection.
//!
//! `<dir>/<collection>.json` holds either an array of objects carrying an
//! `id` member, or an object keyed by document id. Writes keep the layout
//! the file was read with and replace the file atomically.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use tokio::sync::Mutex;

use reg_normalization::DisplayFormat;

use super::{Document, DocumentStore, SortDirection, compare_by_field};
use crate::error::{StoreError, StoreResult};

const ID_MEMBER: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    List,
    Keyed,
}

#[derive(Debug)]
struct CollectionFile {
    layout: Layout,
    documents: Vec<Document>,
    /// List entries whose `id` member was a JSON number.
    numeric_ids: HashMap<String, Number>,
}

/// File-backed [`DocumentStore`] over a directory of collection exports.
#[derive(Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
    format: DisplayFormat,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
            format: DisplayFormat::default(),
        }
    }

    /// Offset used to order naive datetimes in queries.
    #[must_use]
    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn read(&self, collection: &str) -> StoreResult<CollectionFile> {
        let path = self.collection_path(collection);
        blocking(move || read_collection(&path)).await
    }

    async fn write(&self, collection: &str, file: CollectionFile) -> StoreResult<()> {
        let path = self.collection_path(collection);
        blocking(move || write_collection(&path, &file)).await
    }
}

#[async_trait]
impl DocumentStore for JsonDirStore {
    async fn query(
        &self,
        collection: &str,
        order_by: &str,
        direction: SortDirection,
    ) -> StoreResult<Vec<Document>> {
        let mut documents = self.read(collection).await?.documents;
        documents.sort_by(|a, b| compare_by_field(&a.data, &b.data, order_by, direction, &self.format));
        tracing::debug!(collection, count = documents.len(), "Read collection file");
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let file = self.read(collection).await?;
        Ok(file.documents.into_iter().find(|doc| doc.id == id))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read(collection).await?;
        let doc = file
            .documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        doc.data.extend(patch);
        self.write(collection, file).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read(collection).await?;
        let before = file.documents.len();
        file.documents.retain(|doc| doc.id != id);
        if file.documents.len() == before {
            tracing::debug!(collection, id, "Delete of missing document");
            return Ok(());
        }
        self.write(collection, file).await
    }
}

async fn blocking<T, F>(task: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| StoreError::Task {
            message: e.to_string(),
        })?
}

fn read_collection(path: &Path) -> StoreResult<CollectionFile> {
    if !path.exists() {
        return Ok(CollectionFile {
            layout: Layout::List,
            documents: Vec::new(),
            numeric_ids: HashMap::new(),
        });
    }

    let bytes = fs::read(path).map_err(|e| StoreError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    let malformed = |reason: String| StoreError::Malformed {
        path: path.to_path_buf(),
        reason,
    };
    let root: Value = serde_json::from_slice(&bytes).map_err(|e| malformed(e.to_string()))?;

    match root {
        Value::Array(items) => {
            let mut documents = Vec::with_capacity(items.len());
            let mut numeric_ids = HashMap::new();
            for (index, item) in items.into_iter().enumerate() {
                let (document, number) = document_from_item(index, item).map_err(&malformed)?;
                if let Some(number) = number {
                    numeric_ids.insert(document.id.clone(), number);
                }
                documents.push(document);
            }
            Ok(CollectionFile {
                layout: Layout::List,
                documents,
                numeric_ids,
            })
        }
        Value::Object(entries) => {
            let documents = entries
                .into_iter()
                .map(|(id, data)| match data {
                    Value::Object(map) => Ok(Document::new(id, map)),
                    _ => Err(malformed(format!("document {id} is not an object"))),
                })
                .collect::<StoreResult<Vec<_>>>()?;
            Ok(CollectionFile {
                layout: Layout::Keyed,
                documents,
                numeric_ids: HashMap::new(),
            })
        }
        _ => Err(malformed("expected an array or an object".to_string())),
    }
}

/// Splits a list entry into its document and, when the id was numeric,
/// the original number.
fn document_from_item(index: usize, item: Value) -> Result<(Document, Option<Number>), String> {
    let Value::Object(mut map) = item else {
        return Err(format!("entry {index} is not an object"));
    };
    let (id, number) = match map.shift_remove(ID_MEMBER) {
        Some(Value::String(id)) if !id.is_empty() => (id, None),
        Some(Value::Number(n)) => (n.to_string(), Some(n)),
        _ => return Err(format!("entry {index} has no id")),
    };
    Ok((Document::new(id, map), number))
}

fn write_collection(path: &Path, file: &CollectionFile) -> StoreResult<()> {
    let root = match file.layout {
        Layout::List => Value::Array(
            file.documents
                .iter()
                .map(|doc| {
                    let mut map = Map::with_capacity(doc.data.len() + 1);
                    let id = match file.numeric_ids.get(&doc.id) {
                        Some(number) => Value::Number(number.clone()),
                        None => Value::String(doc.id.clone()),
                    };
                    map.insert(ID_MEMBER.to_string(), id);
                    map.extend(doc.data.clone());
                    Value::Object(map)
                })
                .collect(),
        ),
        Layout::Keyed => Value::Object(
            file.documents
                .iter()
                .map(|doc| (doc.id.clone(), Value::Object(doc.data.clone())))
                .collect(),
        ),
    };
    let bytes = serde_json::to_vec_pretty(&root).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Write to a temp file first, then rename for atomicity
    let temp_path = path.with_extension("json.tmp");
    let mut temp = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    temp.write_all(&bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    temp.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    fs::rename(&temp_path, path).map_err(|e| StoreError::Io {
        operation: "replace",
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "Rewrote collection file");
    Ok(())
}
