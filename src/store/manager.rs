use anyhow::{Context, Result};

use super::state::{AppState, Configuration, HistoryItem, HistoryLog, PersistedSnapshot};
use super::storage::LocalStorage;
use crate::translation::Provider;

/// Key under which the whole state snapshot is stored.
pub const STORAGE_KEY: &str = "ai-translator-storage";

/// Snapshot format version written alongside the state.
const SNAPSHOT_VERSION: u32 = 0;

/// The persisted application state.
///
/// The store is the only writer of configuration, session text and history.
/// Every mutation writes the full snapshot back to [`LocalStorage`]; a failed
/// write is logged and the in-memory state stays authoritative.
pub struct Store {
    state: AppState,
    storage: LocalStorage,
}

impl Store {
    /// Loads the snapshot from `storage`, falling back to defaults when it is
    /// missing or cannot be parsed.
    pub fn open(storage: LocalStorage) -> Self {
        let state = load_state(&storage);
        Self { state, storage }
    }

    /// Opens the store backed by the default storage location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(LocalStorage::new()?))
    }

    pub const fn config(&self) -> &Configuration {
        &self.state.config
    }

    pub const fn provider(&self) -> Provider {
        self.state.config.provider
    }

    pub fn api_key(&self) -> &str {
        &self.state.config.api_key
    }

    pub fn openai_api_key(&self) -> &str {
        &self.state.config.openai_api_key
    }

    pub fn model(&self) -> &str {
        &self.state.config.model
    }

    pub fn custom_prompt(&self) -> &str {
        &self.state.config.custom_prompt
    }

    pub const fn history(&self) -> &HistoryLog {
        &self.state.history
    }

    pub fn source_text(&self) -> &str {
        &self.state.session.source_text
    }

    pub fn translated_text(&self) -> &str {
        &self.state.session.translated_text
    }

    pub fn credential_for(&self, provider: Provider) -> &str {
        self.state.config.credential_for(provider)
    }

    pub fn active_credential(&self) -> &str {
        self.state.config.active_credential()
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn set_provider(&mut self, provider: Provider) {
        self.update(|s| s.config.provider = provider);
    }

    /// Sets the Gemini API key.
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.update(|s| s.config.api_key = key);
    }

    pub fn set_openai_api_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.update(|s| s.config.openai_api_key = key);
    }

    /// Sets the credential belonging to `provider`, leaving the other one untouched.
    pub fn set_credential(&mut self, provider: Provider, key: impl Into<String>) {
        match provider {
            Provider::Gemini => self.set_api_key(key),
            Provider::OpenAi => self.set_openai_api_key(key),
        }
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        let model = model.into();
        self.update(|s| s.config.model = model);
    }

    pub fn set_custom_prompt(&mut self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        self.update(|s| s.config.custom_prompt = prompt);
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update(|s| s.session.source_text = text);
    }

    pub fn set_translated_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update(|s| s.session.translated_text = text);
    }

    /// Records a completed translation at the front of the history.
    pub fn add_to_history(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let item = HistoryItem::new(source, target);
        tracing::debug!(id = %item.id, "adding history item");
        self.update(|s| s.history.push(item));
    }

    pub fn clear_history(&mut self) {
        self.update(|s| s.history.clear());
    }

    /// Loads a history entry back into the session text.
    ///
    /// Returns the restored entry, or `None` when `index` is out of range.
    pub fn restore_from_history(&mut self, index: usize) -> Option<HistoryItem> {
        let item = self.state.history.get(index)?.clone();
        self.set_source_text(item.source.clone());
        self.set_translated_text(item.target.clone());
        Some(item)
    }

    /// Clears source and translated text, one write each.
    pub fn clear_session(&mut self) {
        self.set_source_text("");
        self.set_translated_text("");
    }

    fn update(&mut self, mutate: impl FnOnce(&mut AppState)) {
        mutate(&mut self.state);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            tracing::warn!(error = ?e, path = %self.storage.path().display(), "failed to persist state");
        }
    }

    fn try_persist(&self) -> Result<()> {
        let snapshot = PersistedSnapshot {
            state: self.state.clone(),
            version: SNAPSHOT_VERSION,
        };
        let raw = serde_json::to_string(&snapshot).context("Failed to serialize state")?;
        self.storage.set_item(STORAGE_KEY, &raw)
    }
}

fn load_state(storage: &LocalStorage) -> AppState {
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return AppState::default(),
        Err(e) => {
            tracing::warn!(error = ?e, "failed to read stored state, using defaults");
            return AppState::default();
        }
    };

    match serde_json::from_str::<PersistedSnapshot>(&raw) {
        Ok(snapshot) => snapshot.state,
        Err(e) => {
            tracing::warn!(error = %e, "stored state is malformed, using defaults");
            AppState::default()
        }
    }
}
