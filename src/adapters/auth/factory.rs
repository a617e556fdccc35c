//! Auth client factory

use super::identity_toolkit::IdentityToolkitClient;
use super::traits::AuthClient;
use crate::adapters::memory::MemoryAuth;
use crate::config::schema::{AuthTarget, PlatformConfig};
use std::sync::Arc;

/// Create the auth client selected by `target`
///
/// `http` is the shared client owned by the application handle.
pub fn create_auth_client(
    target: AuthTarget,
    platform: &PlatformConfig,
    http: reqwest::Client,
) -> Arc<dyn AuthClient + Send + Sync> {
    match target {
        AuthTarget::Memory => {
            tracing::info!("Creating in-memory auth provider");
            Arc::new(MemoryAuth::new())
        }
        AuthTarget::IdentityToolkit => {
            tracing::info!(endpoint = %platform.identity_endpoint, "Creating Identity Toolkit client");
            Arc::new(IdentityToolkitClient::new(http, platform))
        }
    }
}
