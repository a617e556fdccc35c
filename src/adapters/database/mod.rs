//! Document store abstraction layer
//!
//! A trait-based abstraction over the document store so the access layer
//! works unchanged against Cosmos DB, PostgreSQL or the in-memory store.

pub mod factory;
pub mod traits;

pub use factory::create_document_store;
pub use traits::{ensure_object, DocumentSnapshot, DocumentStore};
