//! User Models
//!
//! Local account records for the mock credential store.

use serde::{Deserialize, Serialize};

/// Signed-in user, as kept under the `session` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
}

/// Registered account, as kept under the `users` key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    /// Base64 salt used for the password hash
    pub password_salt: String,
    /// Base64 PBKDF2-HMAC-SHA256 digest
    pub password_hash: String,
}

impl StoredUser {
    /// Whether `identifier` names this account by username or email
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.user.username.eq_ignore_ascii_case(identifier)
            || self.user.email.eq_ignore_ascii_case(identifier)
    }
}
