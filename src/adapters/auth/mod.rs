//! Authentication provider integration
//!
//! The [`AuthClient`] trait is implemented by [`IdentityToolkitClient`]
//! (REST) and by [`crate::adapters::memory::MemoryAuth`].

pub mod factory;
pub mod identity_toolkit;
pub mod traits;

pub use factory::create_auth_client;
pub use identity_toolkit::IdentityToolkitClient;
pub use traits::{AuthClient, AuthSession, SessionState};
