use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::translation::Provider;

/// Maximum number of entries kept in the history log.
pub const HISTORY_LIMIT: usize = 10;

/// Model used until the user picks another one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Prompt template used until the user writes their own.
pub const DEFAULT_PROMPT: &str = "Translate the following academic text to Traditional Chinese, \
     maintaining professional terminology and academic tone:";

/// User configuration: provider choice, credentials, model and prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// The active provider.
    pub provider: Provider,
    /// Gemini API key.
    pub api_key: String,
    /// OpenAI API key.
    pub openai_api_key: String,
    /// Model identifier sent to the active provider.
    pub model: String,
    /// Instruction placed before the source text.
    pub custom_prompt: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            api_key: String::new(),
            openai_api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            custom_prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Configuration {
    /// The stored credential of `provider` (empty when not set).
    pub fn credential_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Gemini => &self.api_key,
            Provider::OpenAi => &self.openai_api_key,
        }
    }

    /// The credential of the active provider.
    pub fn active_credential(&self) -> &str {
        self.credential_for(self.provider)
    }
}

/// One completed translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryItem {
    /// Creates an item with a fresh identifier stamped with the current time.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            target: target.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Creation time in the local timezone.
    pub fn created_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Completed translations, most recent first, never longer than [`HISTORY_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryItem>", into = "Vec<HistoryItem>")]
pub struct HistoryLog(Vec<HistoryItem>);

impl HistoryLog {
    /// Inserts `item` at the front and evicts the oldest entries over the limit.
    pub fn push(&mut self, item: HistoryItem) {
        self.0.insert(0, item);
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryItem> {
        self.0.iter()
    }
}

impl From<Vec<HistoryItem>> for HistoryLog {
    fn from(mut items: Vec<HistoryItem>) -> Self {
        items.truncate(HISTORY_LIMIT);
        Self(items)
    }
}

impl From<HistoryLog> for Vec<HistoryItem> {
    fn from(log: HistoryLog) -> Self {
        log.0
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryItem;
    type IntoIter = std::slice::Iter<'a, HistoryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Scratch text of the current translation; not history until committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub source_text: String,
    pub translated_text: String,
}

/// Everything the store owns. Serialized as one flat object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    #[serde(flatten)]
    pub config: Configuration,
    pub history: HistoryLog,
    #[serde(flatten)]
    pub session: Session,
}

/// The blob written to durable storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub state: AppState,
    #[serde(default)]
    pub version: u32,
}
