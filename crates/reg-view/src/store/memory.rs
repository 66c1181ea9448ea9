//! In-memory stores with failure injection.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use reg_normalization::DisplayFormat;

use super::{Document, DocumentStore, ObjectStore, SortDirection, compare_by_field};
use crate::error::{StoreError, StoreResult};

fn lock<T>(mutex: &Mutex<T>) -> StoreResult<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| StoreError::Unavailable {
        message: "in-memory store lock poisoned".to_string(),
    })
}

/// Document store held in memory.
///
/// Collections can be switched into a failing state to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    format: DisplayFormat,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset used to order naive datetimes in queries.
    #[must_use]
    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    /// Inserts or replaces a document. Non-object values are stored as empty documents.
    pub fn insert(&self, collection: &str, id: &str, data: Value) {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Ok(mut collections) = lock(&self.collections) {
            let docs = collections.entry(collection.to_string()).or_default();
            docs.retain(|doc| doc.id != id);
            docs.push(Document::new(id, data));
        }
    }

    /// Makes every operation on `collection` fail until [`Self::recover`] is called.
    pub fn fail_collection(&self, collection: &str) {
        if let Ok(mut failing) = lock(&self.failing) {
            failing.insert(collection.to_string());
        }
    }

    pub fn recover(&self, collection: &str) {
        if let Ok(mut failing) = lock(&self.failing) {
            failing.remove(collection);
        }
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        lock(&self.collections)
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn check(&self, collection: &str) -> StoreResult<()> {
        if lock(&self.failing)?.contains(collection) {
            return Err(StoreError::Unavailable {
                message: format!("injected failure for {collection}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn query(
        &self,
        collection: &str,
        order_by: &str,
        direction: SortDirection,
    ) -> StoreResult<Vec<Document>> {
        self.check(collection)?;
        let mut docs = lock(&self.collections)?
            .get(collection)
            .cloned()
            .unwrap_or_default();
        docs.sort_by(|a, b| compare_by_field(&a.data, &b.data, order_by, direction, &self.format));
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.check(collection)?;
        Ok(lock(&self.collections)?
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<()> {
        self.check(collection)?;
        let mut collections = lock(&self.collections)?;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        doc.data.extend(patch);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.check(collection)?;
        if let Some(docs) = lock(&self.collections)?.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }
        Ok(())
    }
}

/// Object store held in memory. URLs have the form `mem://<path>`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryObjectStore {
    const SCHEME: &'static str = "mem://";

    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every delete fail while set.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn contains(&self, url: &str) -> bool {
        lock(&self.objects)
            .map(|objects| objects.contains_key(url))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> StoreResult<String> {
        let url = format!("{}{}", Self::SCHEME, path.trim_start_matches('/'));
        lock(&self.objects)?.insert(url.clone(), bytes);
        Ok(url)
    }

    async fn delete(&self, url: &str) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "injected object store failure".to_string(),
            });
        }
        if !url.starts_with(Self::SCHEME) {
            return Err(StoreError::InvalidUrl {
                url: url.to_string(),
            });
        }
        match lock(&self.objects)?.remove(url) {
            Some(_) => Ok(()),
            None => Err(StoreError::ObjectNotFound {
                url: url.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_query_orders_newest_first() {
        let store = InMemoryDocumentStore::new();
        store.insert("csb", "old", json!({"createdAt": "2025-09-01T00:00:00Z"}));
        store.insert("csb", "none", json!({}));
        store.insert("csb", "new", json!({"createdAt": "2025-10-01T00:00:00Z"}));

        let docs = store
            .query("csb", "createdAt", SortDirection::Descending)
            .await
            .unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "none"]);
    }

    #[tokio::test]
    async fn test_update_merges_and_requires_document() {
        let store = InMemoryDocumentStore::new();
        store.insert("artist", "a1", json!({"firstName": "Ada"}));

        let mut patch = Map::new();
        patch.insert("adminNote".to_string(), json!("VIP"));
        store.update("artist", "a1", patch.clone()).await.unwrap();

        let doc = store.get("artist", "a1").await.unwrap().unwrap();
        assert_eq!(doc.data["firstName"], "Ada");
        assert_eq!(doc.data["adminNote"], "VIP");

        let err = store.update("artist", "missing", patch).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryDocumentStore::new();
        store.fail_collection("csb");
        assert!(
            store
                .query("csb", "createdAt", SortDirection::Descending)
                .await
                .is_err()
        );
        store.recover("csb");
        assert!(
            store
                .query("csb", "createdAt", SortDirection::Descending)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_delete_missing_document_succeeds() {
        let store = InMemoryDocumentStore::new();
        store.delete("csb", "nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_object_round_trip() {
        let objects = InMemoryObjectStore::new();
        let url = objects.upload("photos/a.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(url, "mem://photos/a.jpg");
        assert!(objects.contains(&url));

        objects.delete(&url).await.unwrap();
        assert!(!objects.contains(&url));
        assert!(matches!(
            objects.delete(&url).await,
            Err(StoreError::ObjectNotFound { .. })
        ));
    }
}
