//! PromptSmith - Backend Library
//!
//! Turns rough task ideas into refined prompts for large language models and
//! keeps a local history and a saved-items collection. It includes:
//! - Business logic services (generation session, validator, collections)
//! - Storage layer (SQLite key/value store, secrets file, JSON config)
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::settings::{AppConfig, SettingsUpdate};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
