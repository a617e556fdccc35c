//! Identity Toolkit REST client
//!
//! Email/password accounts through `accounts:signUp`,
//! `accounts:signInWithPassword` and `accounts:delete`. Every request carries the platform API key
//! as `?key=`; provider error codes are mapped onto [`AuthError`].

use super::traits::{AuthClient, AuthSession, SessionState};
use crate::config::{secret_string, secret_string_opt, PlatformConfig, SecretString};
use crate::domain::{AuthError, Result, UserId};
use crate::log_auth_event;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Request body shared by sign-up and sign-in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Successful token response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Identity Toolkit implementation of [`AuthClient`]
pub struct IdentityToolkitClient {
    http: Client,
    endpoint: String,
    api_key: SecretString,
    session: SessionState,
}

impl IdentityToolkitClient {
    /// Creates a client over the shared HTTP client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cookbook::adapters::auth::IdentityToolkitClient;
    /// use cookbook::config::load_config;
    ///
    /// # fn example() -> cookbook::domain::Result<()> {
    /// let config = load_config("cookbook.toml")?;
    /// let client = IdentityToolkitClient::new(reqwest::Client::new(), &config.platform);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(http: Client, platform: &PlatformConfig) -> Self {
        Self {
            http,
            endpoint: platform.identity_endpoint.trim_end_matches('/').to_string(),
            api_key: platform.api_key.clone(),
            session: SessionState::new(),
        }
    }

    async fn password_call(&self, action: &str, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/v1/accounts:{}", self.endpoint, action);
        tracing::debug!(action = action, email = %email, "Calling identity provider");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.expose_secret().as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| AuthError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error(status.as_u16(), &body, email).into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        let uid = UserId::new(token.local_id)
            .map_err(|e| AuthError::InvalidResponse(format!("localId: {e}")))?;
        let expires_in = token
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(3600);

        Ok(AuthSession {
            uid,
            email: token.email.unwrap_or_else(|| email.to_string()),
            id_token: secret_string(token.id_token),
            refresh_token: secret_string_opt(token.refresh_token),
            expires_at: Utc::now() + Duration::seconds(expires_in),
        })
    }
}

/// Maps a provider error body onto [`AuthError`]
///
/// Messages look like `"EMAIL_EXISTS"` or
/// `"WEAK_PASSWORD : Password should be at least 6 characters"`.
fn map_error(status: u16, body: &str, email: &str) -> AuthError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    let (code, detail) = match message.split_once(':') {
        Some((code, detail)) => (code.trim(), detail.trim()),
        None => (message.trim(), ""),
    };

    match code {
        "EMAIL_EXISTS" => AuthError::EmailExists(email.to_string()),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "USER_DISABLED" => AuthError::UserDisabled,
        "WEAK_PASSWORD" => AuthError::WeakPassword(detail.to_string()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        _ => AuthError::Rejected {
            status,
            message: message.clone(),
        },
    }
}

#[async_trait]
impl AuthClient for IdentityToolkitClient {
    fn provider(&self) -> &'static str {
        "identity_toolkit"
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session = self.password_call("signUp", email, password).await?;
        log_auth_event!("register", session.uid);
        self.session.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session = self
            .password_call("signInWithPassword", email, password)
            .await?;
        log_auth_event!("sign_in", session.uid);
        self.session.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.session.current() {
            log_auth_event!("sign_out", session.uid);
        }
        self.session.publish(None);
        Ok(())
    }

    async fn delete_account(&self) -> Result<()> {
        let Some(session) = self.session.current() else {
            return Ok(());
        };

        let url = format!("{}/v1/accounts:delete", self.endpoint);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.expose_secret().as_str())])
            .json(&DeleteRequest {
                id_token: session.id_token.expose_secret().as_str(),
            })
            .send()
            .await
            .map_err(|e| AuthError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error(status.as_u16(), &body, &session.email).into());
        }

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
