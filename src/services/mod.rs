//! Services
//!
//! Business logic for the application. The shell talks to these through
//! [`crate::state::AppState`].

pub mod auth;
pub mod collections;
pub mod generation;
pub mod progress;
pub mod session;
pub mod theme;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use auth::AuthService;
pub use collections::{CollectionKind, CollectionStore, UpdateOutcome, DEFAULT_HISTORY_LIMIT};
pub use generation::GenerationClient;
pub use progress::{ProgressHandle, ProgressIndicator, PROGRESS_STAGES};
pub use session::{
    CompletedGeneration, CompletionOutcome, FailureKind, GenerationSession, GenerationStatus,
    PendingGeneration, SessionError,
};
pub use theme::ThemeService;
pub use validator::validate_refined_prompt;
