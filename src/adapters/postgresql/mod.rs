//! PostgreSQL integration
//!
//! Documents live in one JSONB table keyed by collection path and id;
//! queries are translated to parameterized SQL.

pub mod adapter;
pub mod client;
pub mod models;
pub mod sql;

pub use adapter::PostgreSQLStore;
pub use client::PostgreSQLClient;
