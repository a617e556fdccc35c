//! User profile domain model

use super::ids::UserId;
use serde::{Deserialize, Serialize};

/// A user profile stored under `USERS/<uid>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Authentication subject id; required before the profile is stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<UserId>,

    pub email: String,

    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl User {
    pub fn new(uid: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: Some(uid),
            email: email.into(),
            display_name: display_name.into(),
            photo_url: None,
        }
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }
}
