//! In-process document store
//!
//! Documents live in a `BTreeMap` behind a tokio `RwLock`. Writes replace the
//! whole document under the write lock, so concurrent writers to one path
//! end with exactly one of their payloads. When a snapshot path is set, the
//! map is loaded from that JSON file at startup and rewritten on each write;
//! a write only becomes visible once the snapshot has been replaced.

use crate::adapters::database::traits::{ensure_object, DocumentSnapshot, DocumentStore};
use crate::core::query::{eval, Query};
use crate::domain::{CookbookError, DocumentPath, Result, StoreError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// In-memory [`DocumentStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<DocumentPath, Value>>,
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    /// Creates an empty, non-persistent store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store backed by a JSON snapshot file
    ///
    /// A missing file starts an empty store; the file is created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub async fn with_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let documents = if tokio::fs::try_exists(&path).await? {
            let contents = tokio::fs::read_to_string(&path).await?;
            parse_snapshot(&contents).map_err(|e| {
                CookbookError::Store(StoreError::SetupFailed(format!(
                    "Invalid snapshot {}: {}",
                    path.display(),
                    e
                )))
            })?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            snapshot = %path.display(),
            documents = documents.len(),
            "Loaded memory store snapshot"
        );

        Ok(Self {
            documents: RwLock::new(documents),
            snapshot: Some(path),
        })
    }

    /// Number of stored documents across all collections
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    async fn persist(&self, documents: &BTreeMap<DocumentPath, Value>) -> Result<()> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };

        let snapshot: Map<String, Value> = documents
            .iter()
            .map(|(path, data)| (path.to_string(), data.clone()))
            .collect();
        let contents = serde_json::to_string_pretty(&snapshot)?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, contents).await.map_err(|e| {
            StoreError::WriteFailed(format!("Failed to write snapshot {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            StoreError::WriteFailed(format!("Failed to replace snapshot {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}

fn parse_snapshot(contents: &str) -> Result<BTreeMap<DocumentPath, Value>> {
    let raw: Map<String, Value> = serde_json::from_str(contents)?;
    raw.into_iter()
        .map(|(path, data)| {
            let path = DocumentPath::parse(&path)?;
            ensure_object(&path, &data)?;
            Ok((path, data))
        })
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_storage_exists(&self) -> Result<()> {
        if let Some(path) = &self.snapshot {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::SetupFailed(format!(
                        "Failed to create snapshot directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Value>> {
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn set(&self, path: &DocumentPath, data: Value) -> Result<()> {
        ensure_object(path, &data)?;
        let mut documents = self.documents.write().await;
        if self.snapshot.is_none() {
            documents.insert(path.clone(), data);
            return Ok(());
        }

        let mut next = documents.clone();
        next.insert(path.clone(), data);
        self.persist(&next).await?;
        *documents = next;
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<()> {
        let mut documents = self.documents.write().await;
        if !documents.contains_key(path) {
            return Ok(());
        }
        if self.snapshot.is_none() {
            documents.remove(path);
            return Ok(());
        }

        let mut next = documents.clone();
        next.remove(path);
        self.persist(&next).await?;
        *documents = next;
        Ok(())
    }

    async fn query(&self, query: &Query) -> Result<Vec<DocumentSnapshot>> {
        let collection = query.collection_path();
        let candidates: Vec<DocumentSnapshot> = self
            .documents
            .read()
            .await
            .iter()
            .filter(|(path, _)| &path.collection() == collection)
            .map(|(path, data)| DocumentSnapshot::new(path.clone(), data.clone()))
            .collect();

        Ok(eval::evaluate(query, candidates, |snapshot| &snapshot.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{build_query, Filter, OrderBy};
    use crate::domain::CollectionPath;
    use serde_json::json;
    use tempfile::TempDir;

    fn path(raw: &str) -> DocumentPath {
        DocumentPath::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryStore::new();
        store.set(&path("RECIPES/r1"), json!({"title": "Tarte"})).await.unwrap();

        assert_eq!(
            store.get(&path("RECIPES/r1")).await.unwrap(),
            Some(json!({"title": "Tarte"}))
        );

        store.delete(&path("RECIPES/r1")).await.unwrap();
        assert_eq!(store.get(&path("RECIPES/r1")).await.unwrap(), None);

        // Deleting again is not an error
        store.delete(&path("RECIPES/r1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_replaces_without_merge() {
        let store = MemoryStore::new();
        let p = path("USERS/u1");
        store.set(&p, json!({"email": "a@b.c", "displayName": "A"})).await.unwrap();
        store.set(&p, json!({"email": "a@b.c"})).await.unwrap();

        assert_eq!(store.get(&p).await.unwrap(), Some(json!({"email": "a@b.c"})));
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let store = MemoryStore::new();
        let err = store.set(&path("RECIPES/r1"), json!([1])).await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_query_scoped_to_collection() {
        let store = MemoryStore::new();
        store.set(&path("RECIPES/r1"), json!({"author": "Bob", "title": "Tarte"})).await.unwrap();
        store.set(&path("RECIPES/r2"), json!({"author": "Bob", "title": "Crepes"})).await.unwrap();
        store.set(&path("USERS/u1"), json!({"author": "Bob"})).await.unwrap();
        store
            .set(&path("RECIPES/r1/NOTES/n1"), json!({"author": "Bob"}))
            .await
            .unwrap();

        let recipes = CollectionPath::parse("RECIPES").unwrap();
        let query = build_query(&recipes, &[Filter::eq("author", "Bob")], Some(&OrderBy::from("title")))
            .unwrap();
        let ids: Vec<String> = store
            .query(&query)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, vec!["r2", "r1"]);

        assert_eq!(store.list(&recipes).await.unwrap().len(), 2);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_snapshot_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("store.json");

        let store = MemoryStore::with_snapshot(&file).await.unwrap();
        store.ensure_storage_exists().await.unwrap();
        store.set(&path("INGREDIENTS/i1"), json!({"id": "i1", "name": "Farine"})).await.unwrap();
        store.set(&path("INGREDIENTS/i2"), json!({"id": "i2", "name": "Sel"})).await.unwrap();
        store.delete(&path("INGREDIENTS/i2")).await.unwrap();
        drop(store);

        let reopened = MemoryStore::with_snapshot(&file).await.unwrap();
        assert_eq!(reopened.len().await, 1);
        assert_eq!(
            reopened.get(&path("INGREDIENTS/i1")).await.unwrap(),
            Some(json!({"id": "i1", "name": "Farine"}))
        );
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("store.json");
        let store = MemoryStore::with_snapshot(&file).await.unwrap();
        store.set(&path("RECIPES/r1"), json!({"title": "Tarte"})).await.unwrap();

        // Removing the directory makes every later snapshot write fail
        std::fs::remove_dir_all(dir.path()).unwrap();

        let err = store
            .set(&path("RECIPES/r2"), json!({"title": "Crumble"}))
            .await
            .unwrap_err();
        assert!(matches!(err, CookbookError::Store(StoreError::WriteFailed(_))));
        assert_eq!(store.get(&path("RECIPES/r2")).await.unwrap(), None);

        assert!(store
            .set(&path("RECIPES/r1"), json!({"title": "Tarte fine"}))
            .await
            .is_err());
        assert!(store.delete(&path("RECIPES/r1")).await.is_err());
        assert_eq!(
            store.get(&path("RECIPES/r1")).await.unwrap(),
            Some(json!({"title": "Tarte"}))
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("missing_dir").join("store.json");
        let store = MemoryStore::with_snapshot(&file).await.unwrap();

        assert!(store.set(&path("RECIPES/r1"), json!({"title": "Tarte"})).await.is_err());
        assert!(store.is_empty().await);

        store.ensure_storage_exists().await.unwrap();
        store.set(&path("RECIPES/r1"), json!({"title": "Tarte"})).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_snapshot_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("store.json");
        std::fs::write(&file, r#"{"RECIPES": {"title": "no id segment"}}"#).unwrap();

        assert!(MemoryStore::with_snapshot(&file).await.is_err());
    }
}
