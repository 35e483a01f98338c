//! Settings Models
//!
//! Application configuration and settings data structures.

use promptsmith_core::ProxyConfig;
use promptsmith_llm::{ProviderConfig, ProviderType};
use serde::{Deserialize, Serialize};

/// Largest accepted history cap
pub const MAX_HISTORY_LIMIT: usize = 200;

/// Smallest accepted progress interval in milliseconds
pub const MIN_PROGRESS_INTERVAL_MS: u64 = 50;

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote model provider
    pub provider: ProviderType,
    /// Model name for the provider
    pub model: String,
    /// Endpoint override for self-hosted or compatible APIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Output token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Number of generations kept in Recent History
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Delay between progress stages
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
    /// Outbound proxy for provider calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_history_limit() -> usize {
    20
}

fn default_progress_interval_ms() -> u64 {
    800
}

impl Default for AppConfig {
    fn default() -> Self {
        let provider = ProviderType::default();
        Self {
            provider,
            model: provider.default_model().to_string(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            history_limit: default_history_limit(),
            progress_interval_ms: default_progress_interval_ms(),
            proxy: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub provider: Option<ProviderType>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub history_limit: Option<usize>,
    pub progress_interval_ms: Option<u64>,
    pub proxy: Option<ProxyConfig>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(provider) = update.provider {
            // Switching provider without naming a model picks that provider's default
            if provider != self.provider && update.model.is_none() {
                self.model = provider.default_model().to_string();
            }
            self.provider = provider;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = if base_url.trim().is_empty() {
                None
            } else {
                Some(base_url)
            };
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(limit) = update.history_limit {
            self.history_limit = limit;
        }
        if let Some(interval) = update.progress_interval_ms {
            self.progress_interval_ms = interval;
        }
        if let Some(proxy) = update.proxy {
            self.proxy = Some(proxy);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Invalid temperature: {}. Must be between 0.0 and 2.0",
                self.temperature
            ));
        }

        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }

        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(format!(
                "history_limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            ));
        }

        if self.progress_interval_ms < MIN_PROGRESS_INTERVAL_MS {
            return Err(format!(
                "progress_interval_ms must be at least {}",
                MIN_PROGRESS_INTERVAL_MS
            ));
        }

        if let Some(ref proxy) = self.proxy {
            proxy.validate()?;
        }

        Ok(())
    }

    /// Build the provider configuration for a call, attaching the resolved key
    pub fn to_provider_config(&self, api_key: Option<String>) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider,
            api_key,
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            proxy: self.proxy.clone(),
        }
    }
}
