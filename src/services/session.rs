//! Generation Session Controller
//!
//! Owns the current result slot and the input fields, drives one generation at
//! a time through `Idle -> Submitting -> {Succeeded, Failed}`, and fans
//! successful results out into the collection store.
//!
//! Every in-flight call carries the token that was current when it started.
//! A completion whose token no longer matches (because of a reset or a newer
//! submission) is discarded without touching any state.

use promptsmith_core::{GeneratedPromptData, PromptCategory, PromptRequest, PromptResult};

use crate::services::collections::{CollectionStore, UpdateOutcome};
use crate::services::generation::GenerationClient;
use crate::services::progress::{ProgressHandle, ProgressIndicator};
use crate::services::validator::validate_refined_prompt;
use crate::utils::error::{AppError, AppResult};

/// Fallback message when a failure carries no text of its own
pub const GENERIC_FAILURE: &str =
    "Something went wrong while generating the prompt. Please try again.";

/// Lifecycle state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Why the last generation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Remote call failed or returned an incomplete payload
    Generation,
    /// Structured-data output did not parse
    Validation,
}

/// User-visible failure of the last generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: FailureKind,
    pub message: String,
}

impl SessionError {
    fn from_app_error(err: &AppError) -> Self {
        let kind = match err {
            AppError::Validation(_) => FailureKind::Validation,
            _ => FailureKind::Generation,
        };
        let message = err.to_string();
        Self {
            kind,
            message: if message.trim().is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                message
            },
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// How a completion was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Succeeded(PromptResult),
    Failed(SessionError),
    /// The completion belonged to a superseded request
    Discarded,
}

/// A request that has entered `Submitting` and still has to be executed.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    token: u64,
    request: PromptRequest,
}

impl PendingGeneration {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn request(&self) -> &PromptRequest {
        &self.request
    }

    /// Run the remote call. Holds no reference to the controller.
    pub async fn execute(self, client: &GenerationClient) -> CompletedGeneration {
        let result = client.generate(&self.request).await;
        CompletedGeneration {
            token: self.token,
            request: self.request,
            result,
        }
    }
}

/// Raw result of a remote call, not yet validated or applied.
#[derive(Debug)]
pub struct CompletedGeneration {
    token: u64,
    request: PromptRequest,
    result: AppResult<GeneratedPromptData>,
}

impl CompletedGeneration {
    /// Build a completion directly, for callers that perform the remote call
    /// themselves.
    pub fn new(
        pending: PendingGeneration,
        result: AppResult<GeneratedPromptData>,
    ) -> Self {
        Self {
            token: pending.token,
            request: pending.request,
            result,
        }
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

/// The request lifecycle state machine
#[derive(Debug)]
pub struct GenerationSession {
    collections: CollectionStore,
    input: PromptRequest,
    status: GenerationStatus,
    current: Option<PromptResult>,
    error: Option<SessionError>,
    token: u64,
    indicator: ProgressIndicator,
    progress: Option<ProgressHandle>,
}

impl GenerationSession {
    pub fn new(collections: CollectionStore, indicator: ProgressIndicator) -> Self {
        Self {
            collections,
            input: PromptRequest::default(),
            status: GenerationStatus::Idle,
            current: None,
            error: None,
            token: 0,
            indicator,
            progress: None,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn current(&self) -> Option<&PromptResult> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn input(&self) -> &PromptRequest {
        &self.input
    }

    pub fn collections(&self) -> &CollectionStore {
        &self.collections
    }

    pub fn history(&self) -> &[PromptResult] {
        self.collections.history()
    }

    pub fn saved(&self) -> &[PromptResult] {
        self.collections.saved()
    }

    /// Token of the most recent request
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Progress of the in-flight request, if any
    pub fn progress(&self) -> Option<&ProgressHandle> {
        self.progress.as_ref()
    }

    /// Current stage label while `Submitting`
    pub fn stage_label(&self) -> Option<&'static str> {
        self.progress.as_ref().map(ProgressHandle::label)
    }

    // ── Input fields ───────────────────────────────────────────────────

    pub fn set_input(&mut self, raw_input: impl Into<String>) {
        self.input.raw_input = raw_input.into();
    }

    pub fn set_category(&mut self, category: PromptCategory) {
        self.input.category = category;
    }

    pub fn set_tone(&mut self, tone: impl Into<String>) {
        self.input.tone = tone.into();
    }

    pub fn set_request(&mut self, request: PromptRequest) {
        self.input = request;
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Enter `Submitting` for the current input.
    ///
    /// Returns `None` without any transition when the input is blank or a
    /// request is already in flight.
    pub fn begin(&mut self) -> Option<PendingGeneration> {
        if self.status == GenerationStatus::Submitting {
            tracing::warn!(token = self.token, "submit ignored, a request is already in flight");
            return None;
        }
        if self.input.is_blank() {
            tracing::debug!("submit ignored, input is empty");
            return None;
        }

        self.token += 1;
        self.current = None;
        self.error = None;
        self.status = GenerationStatus::Submitting;
        self.progress = Some(self.indicator.start());

        tracing::debug!(
            token = self.token,
            category = self.input.category.slug(),
            "state -> submitting"
        );

        Some(PendingGeneration {
            token: self.token,
            request: self.input.clone(),
        })
    }

    /// Apply a finished remote call.
    pub fn complete(&mut self, completed: CompletedGeneration) -> CompletionOutcome {
        if completed.token != self.token || self.status != GenerationStatus::Submitting {
            tracing::warn!(
                token = completed.token,
                current = self.token,
                "discarding stale generation response"
            );
            return CompletionOutcome::Discarded;
        }

        self.stop_progress();

        let CompletedGeneration {
            request, result, ..
        } = completed;

        match result.and_then(|data| Self::validate(data, &request)) {
            Ok(data) => {
                let item = PromptResult::from_generation(data, &request);
                self.current = Some(item.clone());
                self.collections.append(item.clone());
                self.status = GenerationStatus::Succeeded;
                tracing::info!(id = item.id(), category = request.category.slug(), "generation succeeded");
                CompletionOutcome::Succeeded(item)
            }
            Err(e) => {
                let error = SessionError::from_app_error(&e);
                tracing::warn!(error = %e, "generation failed");
                self.error = Some(error.clone());
                self.status = GenerationStatus::Failed;
                CompletionOutcome::Failed(error)
            }
        }
    }

    fn validate(
        mut data: GeneratedPromptData,
        request: &PromptRequest,
    ) -> AppResult<GeneratedPromptData> {
        data.refined_prompt = validate_refined_prompt(&data.refined_prompt, request.category)?;
        Ok(data)
    }

    /// Submit the current input and wait for the outcome.
    pub async fn submit(&mut self, client: &GenerationClient) -> Option<CompletionOutcome> {
        let pending = self.begin()?;
        let completed = pending.execute(client).await;
        Some(self.complete(completed))
    }

    /// Like [`begin`](Self::begin), but first restores the input that produced
    /// the current result. Without a current result the input fields are used
    /// as they stand.
    pub fn begin_regenerate(&mut self) -> Option<PendingGeneration> {
        if let Some(ref current) = self.current {
            self.input = current.to_request();
        }
        self.begin()
    }

    /// Submit again with the input that produced the current result.
    pub async fn regenerate(&mut self, client: &GenerationClient) -> Option<CompletionOutcome> {
        let pending = self.begin_regenerate()?;
        let completed = pending.execute(client).await;
        Some(self.complete(completed))
    }

    /// Return to `Idle`, invalidating any in-flight request.
    pub fn reset(&mut self) {
        self.token += 1;
        self.stop_progress();
        self.status = GenerationStatus::Idle;
        self.current = None;
        self.error = None;
        tracing::debug!(token = self.token, "state -> idle");
    }

    fn stop_progress(&mut self) {
        if let Some(handle) = self.progress.take() {
            handle.cancel();
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ── Current result and collections ─────────────────────────────────

    /// Show `item` and restore the input fields that produced it.
    pub fn select(&mut self, item: &PromptResult) {
        self.input = item.to_request();
        self.current = Some(item.clone());
    }

    /// Select a history or saved item by id. Returns whether it was found.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        match self.collections.find(id).cloned() {
            Some(item) => {
                self.select(&item);
                true
            }
            None => false,
        }
    }

    /// Edit the refined prompt of the current result everywhere it is held.
    ///
    /// Returns `None` when `id` is not the current result.
    pub fn update_refined_prompt(&mut self, id: &str, text: &str) -> Option<UpdateOutcome> {
        let current = self.current.as_mut().filter(|c| c.id() == id)?;
        current.set_refined_prompt(text);
        let outcome = self.collections.update(id, text);
        tracing::debug!(id, history = outcome.history, saved = outcome.saved, "refined prompt edited");
        Some(outcome)
    }

    /// Toggle the current result in Saved Items.
    ///
    /// Returns whether it is saved afterwards, `None` without a current result.
    pub fn toggle_saved(&mut self) -> Option<bool> {
        let current = self.current.as_ref()?;
        Some(self.collections.toggle_saved(current))
    }

    pub fn is_current_saved(&self) -> bool {
        self.current
            .as_ref()
            .map(|c| self.collections.is_saved(c.id()))
            .unwrap_or(false)
    }

    pub fn clear_history(&mut self) {
        self.collections.clear_history();
    }

    pub fn clear_saved(&mut self) {
        self.collections.clear_saved();
    }
}
