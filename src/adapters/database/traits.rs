//! Document store abstraction
//!
//! This module defines the trait every document store backend implements.
//! Backends store schemaless JSON objects addressed by [`DocumentPath`] and
//! evaluate [`Query`] values built by the query builder.

use crate::core::query::Query;
use crate::domain::{CollectionPath, CookbookError, DocumentPath, Result};
use async_trait::async_trait;
use serde_json::Value;

/// A stored document together with its path
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub path: DocumentPath,
    pub data: Value,
}

impl DocumentSnapshot {
    pub fn new(path: DocumentPath, data: Value) -> Self {
        Self { path, data }
    }

    /// Document id (last path segment)
    pub fn id(&self) -> &str {
        self.path.id()
    }
}

/// Document store client
///
/// Every operation is a single round trip. Backends add no retry; platform
/// failures are mapped to [`crate::domain::StoreError`] and returned as-is.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in logs and status output
    fn backend(&self) -> &'static str;

    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Create the backing container/table when it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be created or accessed.
    async fn ensure_storage_exists(&self) -> Result<()>;

    /// Fetch one document
    ///
    /// Returns `Ok(None)` when nothing is stored at `path`.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Value>>;

    /// Create or fully replace the document at `path`
    ///
    /// `data` must be a JSON object. The previous document, if any, is
    /// replaced without merging.
    async fn set(&self, path: &DocumentPath, data: Value) -> Result<()>;

    /// Remove the document at `path`
    ///
    /// Deleting a missing document succeeds.
    async fn delete(&self, path: &DocumentPath) -> Result<()>;

    /// Run a composed query against its collection
    async fn query(&self, query: &Query) -> Result<Vec<DocumentSnapshot>>;

    /// Every document of `collection`, in the store's default order
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<DocumentSnapshot>> {
        self.query(&Query::collection(collection.clone())).await
    }
}

/// Rejects documents that are not JSON objects
pub fn ensure_object(path: &DocumentPath, data: &Value) -> Result<()> {
    if data.is_object() {
        Ok(())
    } else {
        Err(CookbookError::InvalidArgument(format!(
            "Document {path} must be a JSON object"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_object() {
        let path = DocumentPath::parse("RECIPES/r1").unwrap();
        assert!(ensure_object(&path, &json!({"title": "Tarte"})).is_ok());
        assert!(ensure_object(&path, &json!([1, 2])).unwrap_err().is_invalid_argument());
        assert!(ensure_object(&path, &json!("Tarte")).is_err());
    }

    #[test]
    fn test_snapshot_id() {
        let snapshot = DocumentSnapshot::new(DocumentPath::parse("USERS/u1").unwrap(), json!({}));
        assert_eq!(snapshot.id(), "u1");
    }
}
