//! JSON Configuration Management
//!
//! Handles reading and writing the application configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_dir};

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Create a new config service at the default location, loading existing
    /// config or creating defaults
    pub fn new() -> AppResult<Self> {
        Self::open(config_path()?)
    }

    /// Load or create the config file at `config_path`
    pub fn open(config_path: PathBuf) -> AppResult<Self> {
        if let Some(parent) = config_path.parent() {
            ensure_dir(parent)?;
        }

        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            tracing::info!(path = %config_path.display(), "created default config");
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::config)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> AppConfig {
        self.config.clone()
    }

    /// Update the configuration with a partial update.
    ///
    /// An update that fails validation leaves both memory and disk untouched.
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut next = self.config.clone();
        next.apply_update(update);
        Self::save_to_file(&self.config_path, &next)?;
        self.config = next;
        Ok(self.config.clone())
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = AppConfig::default();
        self.save()?;
        Ok(())
    }

    /// Check if the config service is healthy
    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            config: AppConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptsmith_llm::ProviderType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config_file() -> (NamedTempFile, PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        let config = AppConfig::default();
        let content = serde_json::to_string_pretty(&config).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = file.path().to_path_buf();
        (file, path)
    }

    #[test]
    fn test_load_config_from_file() {
        let (_file, path) = create_test_config_file();
        let config = ConfigService::load_from_file(&path).unwrap();
        assert_eq!(config.provider, ProviderType::Gemini);
    }

    #[test]
    fn test_open_creates_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let service = ConfigService::open(path.clone()).unwrap();
        assert!(path.exists());
        assert!(service.is_healthy());
        assert_eq!(service.get_config(), &AppConfig::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"provider":"gemini","model":"gemini-2.5-flash","history_limit":0}"#,
        )
        .unwrap();

        let err = ConfigService::open(path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_config_update() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut service = ConfigService::open(path.clone()).unwrap();

        let update = SettingsUpdate {
            history_limit: Some(5),
            ..Default::default()
        };

        let updated = service.update_config(update).unwrap();
        assert_eq!(updated.history_limit, 5);

        let reopened = ConfigService::open(path).unwrap();
        assert_eq!(reopened.get_config().history_limit, 5);
    }

    #[test]
    fn test_rejected_update_keeps_previous_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut service = ConfigService::open(path).unwrap();

        let update = SettingsUpdate {
            progress_interval_ms: Some(1),
            ..Default::default()
        };
        assert!(service.update_config(update).is_err());
        assert_eq!(service.get_config().progress_interval_ms, 800);
    }

    #[test]
    fn test_reset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut service = ConfigService::open(path).unwrap();
        service
            .update_config(SettingsUpdate {
                temperature: Some(1.5),
                ..Default::default()
            })
            .unwrap();

        service.reset().unwrap();
        service.reload().unwrap();
        assert_eq!(service.get_config(), &AppConfig::default());
    }
}
