//! Authentication provider abstraction
//!
//! This module defines the `AuthClient` trait implemented by the Identity
//! Toolkit REST client and the in-memory provider. Providers own the
//! credential handling; callers only see sessions.

use crate::config::SecretString;
use crate::domain::{Result, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// An authenticated session issued by the provider
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Provider subject id, also the key of the user profile document
    pub uid: UserId,

    pub email: String,

    /// Bearer token for platform calls
    pub id_token: SecretString,

    pub refresh_token: Option<SecretString>,

    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Authentication provider client
///
/// Successful `register` and `sign_in` calls become the current session and
/// are published to every subscriber; `sign_out` publishes `None`.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Short provider name used in logs and status output
    fn provider(&self) -> &'static str;

    /// Create an email/password account and sign it in
    async fn register(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Authenticate with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Clear the current session
    async fn sign_out(&self) -> Result<()>;

    /// Delete the account behind the current session and clear the session
    ///
    /// Succeeds without a call when nobody is signed in.
    async fn delete_account(&self) -> Result<()>;

    /// The current session, if any
    fn current_session(&self) -> Option<AuthSession>;

    /// Current-session-changed notifications
    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>>;
}

/// Current-session cell shared by provider implementations
#[derive(Debug)]
pub struct SessionState {
    tx: watch::Sender<Option<AuthSession>>,
}

impl SessionState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replaces the current session and notifies subscribers
    pub fn publish(&self, session: Option<AuthSession>) {
        self.tx.send_replace(session);
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.tx.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
