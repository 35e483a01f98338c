//! Theme Selection
//!
//! Persists the chosen theme id under the `theme` key.

use crate::models::theme::{Theme, ThemeId};
use crate::storage::{keys, DurableStore};
use crate::utils::error::AppResult;

#[derive(Debug, Clone)]
pub struct ThemeService {
    store: DurableStore,
}

impl ThemeService {
    pub fn new(store: DurableStore) -> Self {
        Self { store }
    }

    /// Stored theme, or the default when unset or unknown
    pub fn current(&self) -> ThemeId {
        match self.store.load::<String>(keys::THEME) {
            Some(id) => id.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "unknown stored theme, using default");
                ThemeId::default()
            }),
            None => ThemeId::default(),
        }
    }

    pub fn current_theme(&self) -> &'static Theme {
        self.current().theme()
    }

    pub fn set(&self, id: ThemeId) -> AppResult<()> {
        self.store.save(keys::THEME, id.as_str())
    }
}
