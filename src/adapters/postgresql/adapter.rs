//! PostgreSQL document store
//!
//! Implements [`DocumentStore`] over a single `documents` table keyed by
//! `(collection, id)` with a JSONB body.

use super::client::PostgreSQLClient;
use super::models::DocumentRow;
use super::sql::build_select;
use crate::adapters::database::traits::{ensure_object, DocumentSnapshot, DocumentStore};
use crate::core::query::Query;
use crate::domain::{DocumentPath, Result, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

const SELECT_ONE: &str = "SELECT id, data FROM documents WHERE collection = $1 AND id = $2";

const UPSERT: &str = "INSERT INTO documents (collection, id, data, updated_at) \
     VALUES ($1, $2, $3, NOW()) \
     ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()";

const DELETE: &str = "DELETE FROM documents WHERE collection = $1 AND id = $2";

/// PostgreSQL implementation of [`DocumentStore`]
pub struct PostgreSQLStore {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLStore {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl DocumentStore for PostgreSQLStore {
    fn backend(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_storage_exists(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Value>> {
        let collection = path.collection().to_string();
        let id = path.id().to_string();
        let rows = self.client.query(SELECT_ONE, &[&collection, &id]).await?;

        match rows.first() {
            Some(row) => Ok(Some(DocumentRow::try_from(row)?.data)),
            None => Ok(None),
        }
    }

    async fn set(&self, path: &DocumentPath, data: Value) -> Result<()> {
        ensure_object(path, &data)?;
        let collection = path.collection().to_string();
        let id = path.id().to_string();
        self.client
            .execute(UPSERT, &[&collection, &id, &data], StoreError::WriteFailed)
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<()> {
        let collection = path.collection().to_string();
        let id = path.id().to_string();
        let removed = self
            .client
            .execute(DELETE, &[&collection, &id], StoreError::DeleteFailed)
            .await?;
        tracing::debug!(path = %path, removed, "Deleted document");
        Ok(())
    }

    async fn query(&self, query: &Query) -> Result<Vec<DocumentSnapshot>> {
        let collection = query.collection_path();
        let statement = build_select(query);
        tracing::debug!(sql = %statement.sql, "Running PostgreSQL query");

        let rows = self
            .client
            .query(&statement.sql, &statement.param_refs())
            .await?;

        rows.iter()
            .map(|row| {
                let row = DocumentRow::try_from(row)?;
                Ok(DocumentSnapshot::new(collection.doc(&row.id)?, row.data))
            })
            .collect()
    }
}
