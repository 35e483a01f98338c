//! Durable Store Adapter
//!
//! JSON (de)serialization over a string key/value backend. This is the only
//! path from services to persistent storage.
//!
//! Each `save` is an independent full overwrite of one key. Writes to
//! different keys are not atomic with respect to each other.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::error::AppResult;

/// Well-known storage keys
pub mod keys {
    /// Recent history, newest first
    pub const HISTORY: &str = "history";
    /// Saved items, newest saved first
    pub const SAVED: &str = "saved";
    /// Signed-in user
    pub const SESSION: &str = "session";
    /// Selected theme id
    pub const THEME: &str = "theme";
    /// Registered local accounts
    pub const USERS: &str = "users";
}

/// Raw string storage the adapter sits on.
pub trait KeyValueBackend: Send + Sync {
    /// Read the raw value for `key`, `None` if never written or removed
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrite the raw value for `key`
    fn write(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key` entirely
    fn delete(&self, key: &str) -> AppResult<()>;
}

/// Typed JSON store over a [`KeyValueBackend`].
#[derive(Clone)]
pub struct DurableStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl DurableStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Serialize `value` and write it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.backend.write(key, &json)
    }

    /// Load and deserialize the value under `key`.
    ///
    /// Missing keys, unreadable storage, and corrupt blobs all come back as
    /// `None`; the latter two are logged and never surfaced.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read persisted value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "persisted value is corrupt, treating as absent");
                None
            }
        }
    }

    /// Delete the entry under `key`.
    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.backend.delete(key)
    }

    /// Whether a raw entry exists under `key`, regardless of whether it parses.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.backend.read(key), Ok(Some(_)))
    }
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableStore").finish_non_exhaustive()
    }
}
