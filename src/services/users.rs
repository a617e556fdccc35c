//! User profile service over the `USERS` collection

use crate::core::access::DocumentAccess;
use crate::domain::{CookbookError, Result, User, UserId};

/// Profiles keyed by auth subject id
pub const USERS: &str = "USERS";

#[derive(Clone)]
pub struct UserService {
    documents: DocumentAccess,
}

impl UserService {
    pub fn new(documents: DocumentAccess) -> Self {
        Self { documents }
    }

    /// `None` for a blank uid (without calling the store) or a missing profile
    pub async fn get_by_uid(&self, uid: &str) -> Result<Option<User>> {
        if uid.trim().is_empty() {
            return Ok(None);
        }
        let uid = UserId::new(uid).map_err(CookbookError::InvalidArgument)?;
        self.documents.get_document(&format!("{USERS}/{uid}")).await
    }

    /// Stores the profile under its uid
    ///
    /// # Errors
    ///
    /// [`CookbookError::InvalidArgument`] when the user has no uid.
    pub async fn create(&self, user: &User) -> Result<()> {
        let uid = user.uid.as_ref().ok_or_else(|| {
            CookbookError::InvalidArgument("Cannot create a user without a uid".to_string())
        })?;

        self.documents
            .set_document(&format!("{USERS}/{uid}"), user)
            .await?;
        tracing::info!(uid = %uid, "User profile created");
        Ok(())
    }
}
