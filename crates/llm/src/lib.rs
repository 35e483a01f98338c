//! PromptSmith LLM
//!
//! Provides a unified interface for the remote models that refine prompts:
//! - Google Gemini (default)
//! - OpenAI and OpenAI-compatible chat-completions endpoints
//!
//! Also includes the HTTP client factory and a provider factory keyed on
//! [`ProviderType`].

pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

use std::sync::Arc;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use types::*;

/// Create the provider selected by `config.provider`.
pub fn create_provider(config: ProviderConfig) -> Arc<dyn LlmProvider> {
    match config.provider {
        ProviderType::Gemini => Arc::new(GeminiProvider::new(config)),
        ProviderType::OpenAI => Arc::new(OpenAIProvider::new(config)),
    }
}
