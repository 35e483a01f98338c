//! Local Accounts
//!
//! A mock credential store kept in the durable store. Registered accounts live
//! under `users`, the signed-in user under `session`. Passwords are stored as
//! salted PBKDF2-HMAC-SHA256 digests.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::models::user::{StoredUser, User};
use crate::storage::{keys, DurableStore};
use crate::utils::error::{AppError, AppResult};

const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_SIZE: usize = 16;
const HASH_SIZE: usize = 32;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const USERNAME_TAKEN: &str = "Username already taken";
pub const EMAIL_REGISTERED: &str = "Email already registered";

fn hash_password(password: &str, salt: &[u8]) -> [u8; HASH_SIZE] {
    let mut out = [0u8; HASH_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut out);
    out
}

fn verify_password(stored: &StoredUser, password: &str) -> bool {
    let (Ok(salt), Ok(expected)) = (
        BASE64.decode(&stored.password_salt),
        BASE64.decode(&stored.password_hash),
    ) else {
        return false;
    };
    hash_password(password, &salt).as_slice() == expected.as_slice()
}

/// Registration, sign-in and session persistence
#[derive(Debug, Clone)]
pub struct AuthService {
    store: DurableStore,
}

impl AuthService {
    pub fn new(store: DurableStore) -> Self {
        Self { store }
    }

    fn users(&self) -> Vec<StoredUser> {
        self.store.load(keys::USERS).unwrap_or_default()
    }

    /// The signed-in user. A session blob that fails to parse is removed.
    pub fn current_user(&self) -> Option<User> {
        let user = self.store.load::<User>(keys::SESSION);
        if user.is_none() && self.store.contains(keys::SESSION) {
            tracing::warn!("removing unreadable session");
            if let Err(e) = self.store.remove(keys::SESSION) {
                tracing::warn!(error = %e, "failed to remove session");
            }
        }
        user
    }

    /// Create an account and sign it in.
    pub fn register(
        &self,
        name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<User> {
        let (name, username, email) = (name.trim(), username.trim(), email.trim());
        if name.is_empty() || username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::auth("All fields are required"));
        }

        let mut users = self.users();
        if users
            .iter()
            .any(|u| u.user.username.eq_ignore_ascii_case(username))
        {
            return Err(AppError::auth(USERNAME_TAKEN));
        }
        if users.iter().any(|u| u.user.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::auth(EMAIL_REGISTERED));
        }

        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
        };
        users.push(StoredUser {
            user: user.clone(),
            password_salt: BASE64.encode(salt),
            password_hash: BASE64.encode(hash_password(password, &salt)),
        });

        self.store.save(keys::USERS, &users)?;
        self.store.save(keys::SESSION, &user)?;
        tracing::info!(username = %user.username, "account registered");
        Ok(user)
    }

    /// Sign in by username or email (case-insensitive).
    pub fn login(&self, identifier: &str, password: &str) -> AppResult<User> {
        let user = self
            .users()
            .into_iter()
            .find(|u| u.matches_identifier(identifier) && verify_password(u, password))
            .map(|u| u.user)
            .ok_or_else(|| AppError::auth(INVALID_CREDENTIALS))?;

        self.store.save(keys::SESSION, &user)?;
        tracing::info!(username = %user.username, "signed in");
        Ok(user)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.store.remove(keys::SESSION)
    }
}
