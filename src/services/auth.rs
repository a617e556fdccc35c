//! Account service
//!
//! Couples the auth provider with the `USERS` profiles: a session only
//! becomes the current user once its profile is loaded.

use super::users::UserService;
use crate::adapters::auth::AuthClient;
use crate::domain::{AuthError, Result, User};
use crate::log_auth_event;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthClient + Send + Sync>,
    users: UserService,
    current: Arc<watch::Sender<Option<User>>>,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthClient + Send + Sync>, users: UserService) -> Self {
        let (current, _rx) = watch::channel(None);
        Self {
            auth,
            users,
            current: Arc::new(current),
        }
    }

    /// Creates the account and its profile, then makes it the current user
    ///
    /// When the profile cannot be stored the new account is deleted again,
    /// so the email stays free and no provider session is left behind.
    pub async fn register(&self, email: &str, password: &str, display_name: &str) -> Result<User> {
        let session = self.auth.register(email, password).await?;
        let user = User::new(session.uid, email.trim(), display_name);

        if let Err(e) = self.users.create(&user).await {
            self.discard_account().await;
            return Err(e);
        }
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn discard_account(&self) {
        if let Err(e) = self.auth.delete_account().await {
            tracing::warn!(error = %e, "Failed to delete account without profile");
            if let Err(e) = self.auth.sign_out().await {
                tracing::warn!(error = %e, "Failed to clear provider session");
            }
        }
    }

    /// Authenticates and loads the profile
    ///
    /// # Errors
    ///
    /// [`AuthError::UserNotFound`] when the account has no profile; the
    /// provider session is cleared in that case.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let session = self.auth.sign_in(email, password).await?;

        match self.users.get_by_uid(session.uid.as_str()).await? {
            Some(user) => {
                self.current.send_replace(Some(user.clone()));
                Ok(user)
            }
            None => {
                tracing::warn!(uid = %session.uid, "Signed in account has no profile");
                self.auth.sign_out().await?;
                Err(AuthError::UserNotFound(session.uid.to_string()).into())
            }
        }
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await?;
        if let Some(user) = self.current.send_replace(None) {
            if let Some(uid) = user.uid {
                log_auth_event!("sign_out", uid);
            }
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    /// Current-user-changed notifications
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }
}
