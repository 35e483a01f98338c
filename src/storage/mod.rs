//! Storage Layer
//!
//! Handles all data persistence: the SQLite key/value table behind the
//! durable store, the API key secrets file, and JSON config.

pub mod config;
pub mod database;
pub mod keyring;
pub mod store;

pub use config::*;
pub use database::*;
pub use keyring::*;
pub use store::*;
