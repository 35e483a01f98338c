//! Secret Storage
//!
//! API keys per provider, kept in `~/.promptsmith/secrets.json`.
//!
//! Values are base64 encoded so they do not show up in a casual `cat`, but
//! they are NOT encrypted: anyone who can read the file can read the keys.
//! Protection comes from the file mode, which is owner read/write only
//! (0600) on Unix.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{ensure_dir, secrets_path};

/// Entry holding the proxy password
pub const PROXY_PASSWORD_KEY: &str = "proxy";

/// On-disk layout of the secrets file
#[derive(Debug, Default, Serialize, Deserialize)]
struct SecretsFile {
    /// name -> base64 secret
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// File-backed secret storage for provider API keys
pub struct KeyringService {
    path: PathBuf,
}

impl KeyringService {
    /// Open the secret store at the default location
    pub fn new() -> AppResult<Self> {
        Self::open(secrets_path()?)
    }

    /// Open (or create) the secret store at `path`.
    ///
    /// An existing file is tightened to owner-only permissions.
    pub fn open(path: PathBuf) -> AppResult<Self> {
        match Self::read_file(&path)? {
            Some(_) => restrict_permissions(&path)?,
            None => Self::write_file(&path, &SecretsFile::default())?,
        }
        Ok(Self { path })
    }

    fn read_file(path: &Path) -> AppResult<Option<SecretsFile>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let file = serde_json::from_str(&content)
            .map_err(|e| AppError::keyring(format!("Secrets file is unreadable: {}", e)))?;
        Ok(Some(file))
    }

    fn write_file(path: &Path, file: &SecretsFile) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let content = serde_json::to_string_pretty(file)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut handle = options.open(path)?;
        // mode() only applies on creation
        restrict_permissions(path)?;
        handle.write_all(content.as_bytes())?;
        Ok(())
    }

    fn load(&self) -> AppResult<SecretsFile> {
        Self::read_file(&self.path)?
            .ok_or_else(|| AppError::keyring("Secrets file is missing"))
    }

    fn decode(encoded: &str) -> AppResult<String> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| AppError::keyring(format!("Base64 decode failed: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::keyring(format!("Stored secret is not valid UTF-8: {}", e)))
    }

    /// Store an API key for a provider
    pub fn set_api_key(&self, provider: &str, key: &str) -> AppResult<()> {
        let mut file = self.load()?;
        file.entries
            .insert(provider.to_string(), BASE64.encode(key.as_bytes()));
        Self::write_file(&self.path, &file)
    }

    /// Retrieve an API key for a provider
    pub fn get_api_key(&self, provider: &str) -> AppResult<Option<String>> {
        let file = self.load()?;
        file.entries
            .get(provider)
            .map(|encoded| Self::decode(encoded))
            .transpose()
    }

    /// Delete an API key for a provider
    pub fn delete_api_key(&self, provider: &str) -> AppResult<()> {
        let mut file = self.load()?;
        if file.entries.remove(provider).is_some() {
            Self::write_file(&self.path, &file)?;
        }
        Ok(())
    }

    /// List all providers that have stored API keys
    pub fn list_providers(&self) -> AppResult<Vec<String>> {
        Ok(self.load()?.entries.into_keys().collect())
    }

    /// Check if an API key exists for a provider
    pub fn has_api_key(&self, provider: &str) -> AppResult<bool> {
        Ok(self.load()?.entries.contains_key(provider))
    }

    /// Check if the secrets file is present and readable
    pub fn is_healthy(&self) -> bool {
        self.load().is_ok()
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}

impl std::fmt::Debug for KeyringService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringService")
            .field("path", &self.path)
            .finish()
    }
}
