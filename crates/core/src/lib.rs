//! PromptSmith Core
//!
//! Domain types and error types shared by the PromptSmith workspace. This crate
//! has no dependency on storage, HTTP, or the application shell.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `category` - Prompt categories and the suggested tone list
//! - `prompt` - Generation request, model payload, and `PromptResult`
//! - `proxy` - Proxy configuration shared with the LLM crate

pub mod category;
pub mod error;
pub mod prompt;
pub mod proxy;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Domain Model ───────────────────────────────────────────────────────
pub use category::{PromptCategory, DEFAULT_TONE, NEUTRAL_TONE, TONE_OPTIONS};
pub use prompt::{GeneratedPromptData, PromptRequest, PromptResult};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
