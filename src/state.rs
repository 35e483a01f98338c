//! Application State
//!
//! Owns every service for the lifetime of the process. The shell creates one
//! `AppState`, calls `initialize` once, and goes through it for everything.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use promptsmith_core::PromptRequest;
use promptsmith_llm::{create_provider, ProviderConfig, ProviderType};
use tokio::sync::RwLock;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::{
    AuthService, CollectionStore, CompletionOutcome, GenerationClient, GenerationSession,
    PendingGeneration, ProgressIndicator, ThemeService,
};
use crate::storage::{ConfigService, Database, DurableStore, KeyringService, PROXY_PASSWORD_KEY};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_promptsmith_dir;

/// Environment variables consulted for an API key, after the secret store
const API_KEY_ENV: &str = "PROMPTSMITH_API_KEY";
const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Application state shared by the shell
pub struct AppState {
    /// SQLite database with connection pool
    database: Arc<RwLock<Option<Database>>>,
    /// API key storage
    keyring: Arc<RwLock<Option<KeyringService>>>,
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Generation lifecycle and collections
    session: Arc<RwLock<Option<GenerationSession>>>,
    /// Local accounts
    auth: Arc<RwLock<Option<AuthService>>>,
    /// Theme selection
    theme: Arc<RwLock<Option<ThemeService>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            database: Arc::new(RwLock::new(None)),
            keyring: Arc::new(RwLock::new(None)),
            config: Arc::new(RwLock::new(None)),
            session: Arc::new(RwLock::new(None)),
            auth: Arc::new(RwLock::new(None)),
            theme: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize all services under `~/.promptsmith/`
    pub async fn initialize(&self) -> AppResult<()> {
        let dir = ensure_promptsmith_dir()?;
        self.initialize_in(&dir).await
    }

    /// Initialize all services with their files under `data_dir`.
    ///
    /// Calling this again after a successful initialization is a no-op.
    pub async fn initialize_in(&self, data_dir: &Path) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let config = ConfigService::open(data_dir.join("config.json"))?;
        let database = Database::open(&data_dir.join("data.db"))?;
        let keyring = KeyringService::open(data_dir.join("secrets.json"))?;

        let app_config = config.get_config_clone();
        let store = DurableStore::new(Arc::new(database.clone()));
        let collections = CollectionStore::load(store.clone(), app_config.history_limit);
        let indicator =
            ProgressIndicator::new(Duration::from_millis(app_config.progress_interval_ms));

        *self.session.write().await = Some(GenerationSession::new(collections, indicator));
        *self.auth.write().await = Some(AuthService::new(store.clone()));
        *self.theme.write().await = Some(ThemeService::new(store));
        *self.database.write().await = Some(database);
        *self.keyring.write().await = Some(keyring);
        *self.config.write().await = Some(config);

        tracing::debug!(dir = %data_dir.display(), "application state initialized");
        *initialized = true;
        Ok(())
    }

    /// Check if database is healthy
    pub fn is_database_healthy(&self) -> bool {
        if let Ok(guard) = self.database.try_read() {
            if let Some(ref db) = *guard {
                return db.is_healthy();
            }
        }
        false
    }

    /// Check if the secret store is healthy
    pub fn is_keyring_healthy(&self) -> bool {
        if let Ok(guard) = self.keyring.try_read() {
            if let Some(ref keyring) = *guard {
                return keyring.is_healthy();
            }
        }
        false
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut guard = self.config.write().await;
        match &mut *guard {
            Some(config) => config.update_config(update),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Get an API key from the secret store
    pub async fn get_api_key(&self, provider: &str) -> AppResult<Option<String>> {
        let guard = self.keyring.read().await;
        match &*guard {
            Some(keyring) => keyring.get_api_key(provider),
            None => Err(AppError::keyring("Keyring service not initialized")),
        }
    }

    /// Set an API key in the secret store
    pub async fn set_api_key(&self, provider: &str, key: &str) -> AppResult<()> {
        let guard = self.keyring.read().await;
        match &*guard {
            Some(keyring) => keyring.set_api_key(provider, key),
            None => Err(AppError::keyring("Keyring service not initialized")),
        }
    }

    /// Delete an API key from the secret store
    pub async fn delete_api_key(&self, provider: &str) -> AppResult<()> {
        let guard = self.keyring.read().await;
        match &*guard {
            Some(keyring) => keyring.delete_api_key(provider),
            None => Err(AppError::keyring("Keyring service not initialized")),
        }
    }

    /// List providers with stored API keys
    pub async fn list_api_key_providers(&self) -> AppResult<Vec<String>> {
        let guard = self.keyring.read().await;
        match &*guard {
            Some(keyring) => keyring.list_providers(),
            None => Err(AppError::keyring("Keyring service not initialized")),
        }
    }

    /// Resolve the API key for `provider`: secret store first, then environment.
    pub async fn resolve_api_key(&self, provider: ProviderType) -> AppResult<Option<String>> {
        if let Some(key) = self.get_api_key(&provider.to_string()).await? {
            return Ok(Some(key));
        }
        let key = [API_KEY_ENV, provider.api_key_env(), FALLBACK_API_KEY_ENV]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()));
        Ok(key)
    }

    /// Provider settings from the current config, with the API key and the
    /// proxy password taken from the secret store.
    pub async fn provider_config(&self) -> AppResult<ProviderConfig> {
        let config = self.get_config().await?;
        let api_key = self.resolve_api_key(config.provider).await?;
        if api_key.is_none() {
            tracing::warn!(provider = %config.provider, "no API key configured");
        }

        let mut provider_config = config.to_provider_config(api_key);
        if let Some(proxy) = provider_config.proxy.as_mut() {
            proxy.password = self.get_api_key(PROXY_PASSWORD_KEY).await?;
        }
        Ok(provider_config)
    }

    /// Build a generation client from the current config and resolved key
    pub async fn generation_client(&self) -> AppResult<GenerationClient> {
        let provider = create_provider(self.provider_config().await?);
        Ok(GenerationClient::new(provider))
    }

    /// Health-check the configured provider
    pub async fn check_provider(&self) -> AppResult<()> {
        self.generation_client().await?.check().await
    }

    /// Run `f` with exclusive access to the generation session
    pub async fn with_session<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut GenerationSession) -> T,
    {
        let mut guard = self.session.write().await;
        match &mut *guard {
            Some(session) => Ok(f(session)),
            None => Err(AppError::internal("Session not initialized")),
        }
    }

    /// Submit `request` through `client`.
    ///
    /// The session is locked only to start and to apply the request, never
    /// across the remote call, so a `reset` in between discards the response.
    /// Returns `None` when the input is blank or a request is in flight.
    pub async fn generate_with(
        &self,
        client: &GenerationClient,
        request: PromptRequest,
    ) -> AppResult<Option<CompletionOutcome>> {
        let pending = self
            .with_session(move |s| {
                s.set_request(request);
                s.begin()
            })
            .await?;
        self.run_pending(client, pending).await
    }

    /// Submit `request` with the configured provider
    pub async fn generate(&self, request: PromptRequest) -> AppResult<Option<CompletionOutcome>> {
        let client = self.generation_client().await?;
        self.generate_with(&client, request).await
    }

    /// Regenerate the item `id`, or the current result when `id` is `None`
    pub async fn regenerate_with(
        &self,
        client: &GenerationClient,
        id: Option<&str>,
    ) -> AppResult<Option<CompletionOutcome>> {
        let pending = self
            .with_session(|s| {
                if let Some(id) = id {
                    if !s.select_by_id(id) {
                        return Err(AppError::not_found(format!("prompt {}", id)));
                    }
                }
                Ok(s.begin_regenerate())
            })
            .await??;
        self.run_pending(client, pending).await
    }

    pub async fn regenerate(&self, id: Option<&str>) -> AppResult<Option<CompletionOutcome>> {
        let client = self.generation_client().await?;
        self.regenerate_with(&client, id).await
    }

    async fn run_pending(
        &self,
        client: &GenerationClient,
        pending: Option<PendingGeneration>,
    ) -> AppResult<Option<CompletionOutcome>> {
        let Some(pending) = pending else {
            return Ok(None);
        };
        let completed = pending.execute(client).await;
        self.with_session(|s| s.complete(completed)).await.map(Some)
    }

    /// Get the account service
    pub async fn auth(&self) -> AppResult<AuthService> {
        self.auth
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::internal("Auth service not initialized"))
    }

    /// Get the theme service
    pub async fn theme(&self) -> AppResult<ThemeService> {
        self.theme
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::internal("Theme service not initialized"))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("initialized", &self.initialized)
            .finish()
    }
}
