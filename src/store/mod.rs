//! Persisted application state: configuration, session text and history.

mod manager;
mod state;
mod storage;

pub use manager::{STORAGE_KEY, Store};
pub use state::{
    AppState, Configuration, DEFAULT_MODEL, DEFAULT_PROMPT, HISTORY_LIMIT, HistoryItem,
    HistoryLog, PersistedSnapshot, Session,
};
pub use storage::LocalStorage;
