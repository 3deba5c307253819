use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::fs::atomic_write;
use crate::paths;
use crate::translation::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_OPENAI_ENDPOINT, Gateway, Provider};

/// Base URLs of the vendor APIs, from the `[endpoints]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Gemini API base URL.
    pub gemini: String,
    /// OpenAI (or OpenAI-compatible) API base URL.
    pub openai: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            gemini: DEFAULT_GEMINI_ENDPOINT.to_string(),
            openai: DEFAULT_OPENAI_ENDPOINT.to_string(),
        }
    }
}

impl EndpointConfig {
    pub fn for_provider(&self, provider: Provider) -> &str {
        match provider {
            Provider::Gemini => &self.gemini,
            Provider::OpenAi => &self.openai,
        }
    }
}

/// The configuration file structure.
///
/// Corresponds to `~/.config/aitr/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl ConfigFile {
    /// Builds a gateway pointed at the configured endpoints.
    pub fn gateway(&self) -> Gateway {
        Gateway::new(&self.endpoints.gemini, &self.endpoints.openai)
    }
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/aitr/config.toml`
    /// or `~/.config/aitr/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self::at(paths::config_dir().join("config.toml"))
    }

    pub const fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }

    /// Loads the file, using defaults when it is missing.
    ///
    /// A file that exists but cannot be parsed is reported and ignored.
    pub fn load_or_default(&self) -> ConfigFile {
        if !self.config_path.exists() {
            return ConfigFile::default();
        }

        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "ignoring unreadable config file");
            ConfigFile::default()
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
