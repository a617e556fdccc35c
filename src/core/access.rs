//! Typed document access
//!
//! [`DocumentAccess`] is the single entry point services use to read and
//! write documents. Paths are plain strings (`"RECIPES/r1"`,
//! `"RECIPES/r1/NOTES/n1"`) validated before any store call; documents are
//! decoded with serde at this boundary.

use crate::adapters::database::traits::{DocumentSnapshot, DocumentStore};
use crate::core::query::{build_query, Filter, OrderBy};
use crate::domain::{CollectionPath, CookbookError, DocumentPath, Result};
use crate::log_store_call;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Generic typed CRUD over a [`DocumentStore`]
///
/// Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct DocumentAccess {
    store: Arc<dyn DocumentStore + Send + Sync>,
}

fn decode<T: DeserializeOwned>(snapshot: DocumentSnapshot) -> Result<T> {
    decode_keyed(snapshot).map(|(_, value)| value)
}

fn decode_keyed<T: DeserializeOwned>(snapshot: DocumentSnapshot) -> Result<(DocumentPath, T)> {
    match serde_json::from_value(snapshot.data) {
        Ok(value) => Ok((snapshot.path, value)),
        Err(e) => Err(CookbookError::decode(snapshot.path.to_string(), e)),
    }
}

impl DocumentAccess {
    pub fn new(store: Arc<dyn DocumentStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Fetch and decode one document
    ///
    /// Returns `Ok(None)` when nothing is stored at `path`.
    ///
    /// # Errors
    ///
    /// [`CookbookError::InvalidArgument`] for a malformed path,
    /// [`CookbookError::Decode`] when the stored document does not match `T`.
    pub async fn get_document<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let path = DocumentPath::parse(path)?;
        log_store_call!("get", path);

        match self.store.get(&path).await? {
            Some(data) => decode(DocumentSnapshot::new(path, data)).map(Some),
            None => Ok(None),
        }
    }

    /// Create or fully replace the document at `path`
    ///
    /// `value` must serialize to a JSON object.
    pub async fn set_document<T: Serialize + ?Sized>(&self, path: &str, value: &T) -> Result<()> {
        let path = DocumentPath::parse(path)?;
        let data = serde_json::to_value(value)
            .map_err(|e| CookbookError::Serialization(format!("Failed to encode {path}: {e}")))?;
        log_store_call!("set", path);

        self.store.set(&path, data).await
    }

    /// Remove the document at `path`; a missing document is not an error
    pub async fn delete_document(&self, path: &str) -> Result<()> {
        let path = DocumentPath::parse(path)?;
        log_store_call!("delete", path);

        self.store.delete(&path).await
    }

    /// Every document of `collection`
    pub async fn get_all_documents<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        Ok(self
            .list_documents(collection)
            .await?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    /// Every document of `collection` with the path it is stored at
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<(DocumentPath, T)>> {
        let collection = CollectionPath::parse(collection)?;
        let snapshots = self.store.list(&collection).await?;
        log_store_call!("list", collection, snapshots.len());

        snapshots.into_iter().map(decode_keyed).collect()
    }

    /// Documents of `collection` matching every filter, optionally ordered
    ///
    /// # Errors
    ///
    /// [`CookbookError::InvalidArgument`] for malformed fields or operator
    /// arguments, before the store is called.
    pub async fn get_documents_where<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> Result<Vec<T>> {
        Ok(self
            .query_documents(collection, filters, order)
            .await?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    /// Like [`DocumentAccess::get_documents_where`], keeping each path
    pub async fn query_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<&OrderBy>,
    ) -> Result<Vec<(DocumentPath, T)>> {
        let collection = CollectionPath::parse(collection)?;
        let query = build_query(&collection, filters, order)?;
        let snapshots = self.store.query(&query).await?;
        log_store_call!("query", collection, snapshots.len());

        snapshots.into_iter().map(decode_keyed).collect()
    }
}
