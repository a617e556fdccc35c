//! In-process backends
//!
//! [`MemoryStore`] and [`MemoryAuth`] implement the store and auth seams
//! without any external service, for local development and tests.

pub mod auth;
pub mod store;

pub use auth::MemoryAuth;
pub use store::MemoryStore;
