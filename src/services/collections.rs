//! Collection Store
//!
//! Recent History (newest first, capped) and Saved Items (newest saved first,
//! uncapped). Every mutation is mirrored to the durable store; a failed write
//! leaves the in-memory collections correct and is only logged.

use promptsmith_core::PromptResult;

use crate::storage::{keys, DurableStore};

/// Default Recent History capacity
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Which collections an in-place edit touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub history: bool,
    pub saved: bool,
}

impl UpdateOutcome {
    pub fn any(&self) -> bool {
        self.history || self.saved
    }
}

/// Which collection a bulk clear targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    History,
    Saved,
}

impl CollectionKind {
    fn key(&self) -> &'static str {
        match self {
            CollectionKind::History => keys::HISTORY,
            CollectionKind::Saved => keys::SAVED,
        }
    }
}

/// History and saved items, mirrored to durable storage
#[derive(Debug)]
pub struct CollectionStore {
    store: DurableStore,
    history: Vec<PromptResult>,
    saved: Vec<PromptResult>,
    history_limit: usize,
}

impl CollectionStore {
    /// Load both collections. Missing or corrupt blobs start empty.
    pub fn load(store: DurableStore, history_limit: usize) -> Self {
        let history_limit = history_limit.max(1);
        let mut history: Vec<PromptResult> = store.load(keys::HISTORY).unwrap_or_default();
        if history.len() > history_limit {
            history.truncate(history_limit);
        }
        let saved: Vec<PromptResult> = store.load(keys::SAVED).unwrap_or_default();

        tracing::debug!(
            history = history.len(),
            saved = saved.len(),
            "loaded collections"
        );

        Self {
            store,
            history,
            saved,
            history_limit,
        }
    }

    pub fn history(&self) -> &[PromptResult] {
        &self.history
    }

    pub fn saved(&self) -> &[PromptResult] {
        &self.saved
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Whether an item with `id` is in Saved Items
    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.iter().any(|item| item.id() == id)
    }

    /// Look an item up by id, history first
    pub fn find(&self, id: &str) -> Option<&PromptResult> {
        self.history
            .iter()
            .chain(self.saved.iter())
            .find(|item| item.id() == id)
    }

    /// Prepend to Recent History, evicting the oldest entries past the cap.
    pub fn append(&mut self, item: PromptResult) {
        self.history.insert(0, item);
        if self.history.len() > self.history_limit {
            let evicted = self.history.len() - self.history_limit;
            self.history.truncate(self.history_limit);
            tracing::debug!(evicted, "history cap reached");
        }
        self.persist(CollectionKind::History);
    }

    /// Remove `item` from Saved Items if present by id, else prepend it.
    ///
    /// Returns whether the item is saved afterwards.
    pub fn toggle_saved(&mut self, item: &PromptResult) -> bool {
        let before = self.saved.len();
        self.saved.retain(|saved| saved.id() != item.id());
        let now_saved = if self.saved.len() == before {
            self.saved.insert(0, item.clone());
            true
        } else {
            false
        };
        self.persist(CollectionKind::Saved);
        now_saved
    }

    /// Replace `refined_prompt` on every stored copy of `id`.
    ///
    /// Only collections that contained `id` are modified and persisted.
    pub fn update(&mut self, id: &str, text: &str) -> UpdateOutcome {
        let outcome = UpdateOutcome {
            history: Self::update_in(&mut self.history, id, text),
            saved: Self::update_in(&mut self.saved, id, text),
        };
        if outcome.history {
            self.persist(CollectionKind::History);
        }
        if outcome.saved {
            self.persist(CollectionKind::Saved);
        }
        outcome
    }

    fn update_in(items: &mut [PromptResult], id: &str, text: &str) -> bool {
        match items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.set_refined_prompt(text);
                true
            }
            None => false,
        }
    }

    /// Empty a collection and remove its persisted key.
    pub fn clear(&mut self, kind: CollectionKind) {
        match kind {
            CollectionKind::History => self.history.clear(),
            CollectionKind::Saved => self.saved.clear(),
        }
        if let Err(e) = self.store.remove(kind.key()) {
            tracing::warn!(key = kind.key(), error = %e, "failed to remove persisted collection");
        } else {
            tracing::info!(key = kind.key(), "collection cleared");
        }
    }

    pub fn clear_history(&mut self) {
        self.clear(CollectionKind::History);
    }

    pub fn clear_saved(&mut self) {
        self.clear(CollectionKind::Saved);
    }

    fn persist(&self, kind: CollectionKind) {
        let items = match kind {
            CollectionKind::History => &self.history,
            CollectionKind::Saved => &self.saved,
        };
        if let Err(e) = self.store.save(kind.key(), items) {
            tracing::warn!(key = kind.key(), error = %e, "failed to persist collection");
        }
    }
}
