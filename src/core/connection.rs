//! Connection management
//!
//! [`Connections`] owns one application handle, one document store and one
//! auth client per configuration. Each is built on first use and memoized;
//! concurrent first calls share a single construction.

use crate::adapters::auth::{create_auth_client, AuthClient};
use crate::adapters::database::{create_document_store, DocumentStore};
use crate::config::{CookbookConfig, PlatformConfig, SecretString};
use crate::core::access::DocumentAccess;
use crate::domain::{CookbookError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Validated platform identity plus the shared HTTP client
#[derive(Debug, Clone)]
pub struct AppHandle {
    pub api_key: SecretString,
    pub project_id: String,
    pub auth_domain: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: Option<String>,
    http: reqwest::Client,
}

impl AppHandle {
    fn from_platform(platform: &PlatformConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(platform.request_timeout_seconds))
            .user_agent(concat!("cookbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CookbookError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: platform.api_key.clone(),
            project_id: platform.project_id.clone(),
            auth_domain: platform.auth_domain.clone(),
            storage_bucket: platform.storage_bucket.clone(),
            messaging_sender_id: platform.messaging_sender_id.clone(),
            app_id: platform.app_id.clone(),
            measurement_id: platform.measurement_id.clone(),
            http,
        })
    }

    /// HTTP client shared by every platform call
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Memoized connections derived from one [`CookbookConfig`]
pub struct Connections {
    config: CookbookConfig,
    app: OnceCell<Arc<AppHandle>>,
    store: OnceCell<Arc<dyn DocumentStore + Send + Sync>>,
    auth: OnceCell<Arc<dyn AuthClient + Send + Sync>>,
}

impl Connections {
    /// Nothing is constructed until first use
    pub fn new(config: CookbookConfig) -> Self {
        Self {
            config,
            app: OnceCell::new(),
            store: OnceCell::new(),
            auth: OnceCell::new(),
        }
    }

    /// Connections over an already constructed store and auth client
    pub fn with_clients(
        config: CookbookConfig,
        store: Arc<dyn DocumentStore + Send + Sync>,
        auth: Arc<dyn AuthClient + Send + Sync>,
    ) -> Self {
        Self {
            config,
            app: OnceCell::new(),
            store: OnceCell::new_with(Some(store)),
            auth: OnceCell::new_with(Some(auth)),
        }
    }

    pub fn config(&self) -> &CookbookConfig {
        &self.config
    }

    /// The application handle
    ///
    /// # Errors
    ///
    /// Returns [`CookbookError::Configuration`] when the platform section is
    /// invalid.
    pub async fn app(&self) -> Result<Arc<AppHandle>> {
        self.app
            .get_or_try_init(|| async {
                self.config.validate().map_err(CookbookError::Configuration)?;
                tracing::debug!(project_id = %self.config.platform.project_id, "Initializing application handle");
                AppHandle::from_platform(&self.config.platform).map(Arc::new)
            })
            .await
            .cloned()
    }

    /// The document store selected by `database_target`
    pub async fn store(&self) -> Result<Arc<dyn DocumentStore + Send + Sync>> {
        self.store
            .get_or_try_init(|| async {
                self.app().await?;
                create_document_store(&self.config).await
            })
            .await
            .cloned()
    }

    /// The auth client selected by `auth_target`
    pub async fn auth(&self) -> Result<Arc<dyn AuthClient + Send + Sync>> {
        self.auth
            .get_or_try_init(|| async {
                let app = self.app().await?;
                Ok(create_auth_client(
                    self.config.auth_target,
                    &self.config.platform,
                    app.http().clone(),
                ))
            })
            .await
            .cloned()
    }

    /// Typed document access over [`Connections::store`]
    pub async fn documents(&self) -> Result<DocumentAccess> {
        Ok(DocumentAccess::new(self.store().await?))
    }
}
