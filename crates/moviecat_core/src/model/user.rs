//! User record, author of reviews.

use serde::{Deserialize, Serialize};

/// Stable identifier for a user.
pub type UserId = u64;

/// Fully populated user record.
///
/// `password` is stored opaque and is never consulted by the core; real
/// authentication is explicitly out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Catalog-assigned stable ID.
    pub id: UserId,
    pub username: String,
    pub fullname: Option<String>,
    pub password: String,
}

impl User {
    /// Builds a user record from a draft and a freshly assigned ID.
    pub fn from_draft(id: UserId, draft: &UserDraft) -> Self {
        Self {
            id,
            username: draft.username.clone(),
            fullname: draft.fullname.clone(),
            password: draft.password.clone(),
        }
    }
}

/// Create payload for a user: `{username, fullname?, password}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    #[serde(default)]
    pub fullname: Option<String>,
    pub password: String,
}
