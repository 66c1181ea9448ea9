//! Object store backed by a local directory.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::ObjectStore;
use crate::error::{StoreError, StoreResult};

/// Stores objects as files under a root directory.
///
/// URLs are `file://` URLs of the stored file. Deletes only touch files
/// inside the root.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    const SCHEME: &'static str = "file://";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve_relative(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative.trim_start_matches('/'));
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        (safe && !relative.as_os_str().is_empty()).then(|| self.root.join(relative))
    }

    fn resolve_url(&self, url: &str) -> Option<PathBuf> {
        match url.strip_prefix(Self::SCHEME) {
            Some(absolute) => {
                let path = PathBuf::from(absolute);
                let relative = path.strip_prefix(&self.root).ok()?;
                self.resolve_relative(relative.to_str()?)
            }
            None => self.resolve_relative(url),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> StoreResult<String> {
        let target = self
            .resolve_relative(path)
            .ok_or_else(|| StoreError::InvalidUrl {
                url: path.to_string(),
            })?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io {
                    operation: "create directory",
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| StoreError::Io {
                operation: "write",
                path: target.clone(),
                source: e,
            })?;
        Ok(format!("{}{}", Self::SCHEME, target.display()))
    }

    async fn delete(&self, url: &str) -> StoreResult<()> {
        let target = self.resolve_url(url).ok_or_else(|| StoreError::InvalidUrl {
            url: url.to_string(),
        })?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::ObjectNotFound {
                    url: url.to_string(),
                })
            }
            Err(e) => Err(StoreError::Io {
                operation: "remove",
                path: target,
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_upload_then_delete() {
        let dir = tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());

        let url = store.upload("photos/p1.jpg", vec![0xff]).await.unwrap();
        assert!(url.starts_with("file://"));
        assert!(dir.path().join("photos/p1.jpg").exists());

        store.delete(&url).await.unwrap();
        assert!(!dir.path().join("photos/p1.jpg").exists());
        assert!(matches!(
            store.delete(&url).await,
            Err(StoreError::ObjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_paths_outside_root() {
        let dir = tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path());
        assert!(matches!(
            store.delete("../secret.txt").await,
            Err(StoreError::InvalidUrl { .. })
        ));
        assert!(matches!(
            store.delete("file:///etc/passwd").await,
            Err(StoreError::InvalidUrl { .. })
        ));
        assert!(matches!(
            store.upload("a/../../b", vec![]).await,
            Err(StoreError::InvalidUrl { .. })
        ));
    }
}
