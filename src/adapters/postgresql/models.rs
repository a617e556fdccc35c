//! PostgreSQL row models

use crate::domain::{Result, StoreError};
use serde_json::Value;
use tokio_postgres::Row;

/// `(id, data)` projection of the `documents` table
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    pub id: String,
    pub data: Value,
}

impl TryFrom<&Row> for DocumentRow {
    type Error = crate::domain::CookbookError;

    fn try_from(row: &Row) -> Result<Self> {
        let id = row
            .try_get::<_, String>("id")
            .map_err(|e| StoreError::ReadFailed(format!("Missing id column: {e}")))?;
        let data = row
            .try_get::<_, Value>("data")
            .map_err(|e| StoreError::ReadFailed(format!("Invalid data for {id}: {e}")))?;
        Ok(Self { id, data })
    }
}
