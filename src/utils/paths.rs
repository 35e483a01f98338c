//! Cross-Platform Path Utilities
//!
//! Resolves the PromptSmith data directory (~/.promptsmith/) and the files in it.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the PromptSmith directory (~/.promptsmith/)
pub fn promptsmith_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".promptsmith"))
}

/// Get the config file path (~/.promptsmith/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(promptsmith_dir()?.join("config.json"))
}

/// Get the database file path (~/.promptsmith/data.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(promptsmith_dir()?.join("data.db"))
}

/// Get the secrets file path (~/.promptsmith/secrets.json)
pub fn secrets_path() -> AppResult<PathBuf> {
    Ok(promptsmith_dir()?.join("secrets.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the PromptSmith directory, creating if it doesn't exist
pub fn ensure_promptsmith_dir() -> AppResult<PathBuf> {
    let path = promptsmith_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
