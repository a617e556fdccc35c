//! In-process authentication provider
//!
//! Accounts are kept in memory with a salted SHA-256 password digest. Meant
//! for development and tests; configuration rejects it in production.

use crate::adapters::auth::traits::{AuthClient, AuthSession, SessionState};
use crate::config::secret_string;
use crate::domain::{AuthError, Result, UserId};
use crate::log_auth_event;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;
const SESSION_TTL_SECONDS: i64 = 3600;

#[derive(Debug, Clone)]
struct Account {
    uid: UserId,
    email: String,
    salt: String,
    password_digest: String,
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// In-memory [`AuthClient`]
#[derive(Debug, Default)]
pub struct MemoryAuth {
    /// Accounts keyed by lowercased email
    accounts: RwLock<HashMap<String, Account>>,
    session: SessionState,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(account: &Account) -> AuthSession {
        AuthSession {
            uid: account.uid.clone(),
            email: account.email.clone(),
            id_token: secret_string(Uuid::new_v4().to_string()),
            refresh_token: Some(secret_string(Uuid::new_v4().to_string())),
            expires_at: Utc::now() + Duration::seconds(SESSION_TTL_SECONDS),
        }
    }
}

#[async_trait]
impl AuthClient for MemoryAuth {
    fn provider(&self) -> &'static str {
        "memory"
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthSession> {
        let key = email.trim().to_lowercase();
        if !key.contains('@') {
            return Err(AuthError::Rejected {
                status: 400,
                message: "INVALID_EMAIL".to_string(),
            }
            .into());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            ))
            .into());
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailExists(email.to_string()).into());
        }

        let uid = UserId::new(Uuid::new_v4().simple().to_string())
            .map_err(AuthError::InvalidResponse)?;
        let salt = Uuid::new_v4().to_string();
        let account = Account {
            uid,
            email: email.trim().to_string(),
            password_digest: digest(&salt, password),
            salt,
        };
        let session = Self::issue(&account);
        accounts.insert(key, account);
        drop(accounts);

        log_auth_event!("register", session.uid);
        self.session.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let key = email.trim().to_lowercase();
        let session = {
            let accounts = self.accounts.read().await;
            let account = accounts.get(&key).ok_or(AuthError::InvalidCredentials)?;
            if digest(&account.salt, password) != account.password_digest {
                return Err(AuthError::InvalidCredentials.into());
            }
            Self::issue(account)
        };

        log_auth_event!("sign_in", session.uid);
        self.session.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        self.session.publish(None);
        Ok(())
    }

    async fn delete_account(&self) -> Result<()> {
        let Some(session) = self.session.current() else {
            return Ok(());
        };

        self.accounts
            .write()
            .await
            .retain(|_, account| account.uid != session.uid);
        log_auth_event!("delete_account", session.uid);
        self.session.publish(None);
        Ok(())
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.current()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.session.subscribe()
    }
}
