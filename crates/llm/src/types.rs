//! LLM Types
//!
//! Request, response, configuration and error types for provider calls.

use promptsmith_core::ProxyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported LLM provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Gemini,
    OpenAI,
}

impl ProviderType {
    /// Default model for the provider
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini-2.5-flash",
            ProviderType::OpenAI => "gpt-4o-mini",
        }
    }

    /// Provider-specific environment variable holding an API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "GEMINI_API_KEY",
            ProviderType::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Gemini => write!(f, "gemini"),
            ProviderType::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderType::Gemini),
            "openai" => Ok(ProviderType::OpenAI),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// Configuration for an LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The provider type
    pub provider: ProviderType,
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Optional outbound proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::Gemini,
            api_key: None,
            base_url: None,
            model: ProviderType::Gemini.default_model().to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            proxy: None,
        }
    }
}

/// A single-turn completion request.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// System instruction
    pub system: String,
    /// User message
    pub user: String,
    /// JSON schema the response must follow; requests JSON output when set
    pub response_schema: Option<serde_json::Value>,
    /// Overrides `ProviderConfig::temperature`
    pub temperature: Option<f32>,
}

/// Token counts reported by the provider, zero when it reports none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl UsageStats {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Reply to a completion request
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Concatenated text parts; `None` when the provider returned no text
    pub content: Option<String>,
    pub usage: UsageStats,
    /// Model name as echoed back by the provider
    pub model: String,
}

impl LlmResponse {
    /// Build a text-only response
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            usage: UsageStats::default(),
            model: model.into(),
        }
    }
}

/// Failure of a provider call, classified so callers can react to the cause
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        /// Seconds, when the provider sends `Retry-After`
        retry_after: Option<u32>,
    },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Server error{}: {message}", status_suffix(.status))]
    ServerError { message: String, status: Option<u16> },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// The body arrived but was not in the expected shape
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    #[error("Error: {message}")]
    Other { message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;
