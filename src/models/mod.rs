//! Data Models
//!
//! Application-level data structures. Prompt domain types live in
//! `promptsmith-core`.

pub mod settings;
pub mod theme;
pub mod user;

pub use settings::*;
pub use theme::*;
pub use user::*;
