//! Settings command handlers.

use anyhow::{Result, bail};
use inquire::{Editor, Password, PasswordDisplayMode, Select, Text};
use std::fmt;

use crate::config::{ConfigFile, ConfigManager};
use crate::store::Store;
use crate::translation::Provider;
use crate::ui::{Style, handle_prompt_cancellation, mask_secret};

/// Values passed to `aitr settings set`.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub gemini_endpoint: Option<String>,
    pub openai_endpoint: Option<String>,
}

impl SettingsUpdate {
    pub const fn is_empty(&self) -> bool {
        self.provider.is_none()
            && self.api_key.is_none()
            && self.openai_api_key.is_none()
            && self.model.is_none()
            && self.prompt.is_none()
            && !self.changes_endpoints()
    }

    pub const fn changes_endpoints(&self) -> bool {
        self.gemini_endpoint.is_some() || self.openai_endpoint.is_some()
    }

    /// Applies the stored settings through the store's setters.
    pub fn apply(&mut self, store: &mut Store) {
        if let Some(provider) = self.provider {
            store.set_provider(provider);
        }
        if let Some(key) = self.api_key.take() {
            store.set_api_key(key);
        }
        if let Some(key) = self.openai_api_key.take() {
            store.set_openai_api_key(key);
        }
        if let Some(model) = self.model.take() {
            store.set_model(model);
        }
        if let Some(prompt) = self.prompt.take() {
            store.set_custom_prompt(prompt);
        }
    }

    /// Writes the endpoint changes into `config`.
    pub fn apply_endpoints(&mut self, config: &mut ConfigFile) {
        if let Some(url) = self.gemini_endpoint.take() {
            config.endpoints.gemini = url;
        }
        if let Some(url) = self.openai_endpoint.take() {
            config.endpoints.openai = url;
        }
    }
}

pub fn show_settings() -> Result<()> {
    let store = Store::open_default()?;
    let endpoints = ConfigManager::new().load_or_default().endpoints;

    print_settings(&store);
    println!(
        "  {}   {}",
        Style::label("endpoint"),
        Style::secondary(endpoints.for_provider(store.provider()))
    );
    println!(
        "  {}    {}",
        Style::label("storage"),
        Style::secondary(store.storage().path().display())
    );
    Ok(())
}

pub fn set_settings(mut update: SettingsUpdate) -> Result<()> {
    if update.is_empty() {
        bail!(
            "Nothing to change\n\n\
             Pass at least one of --provider, --api-key, --openai-api-key, --model, --prompt,\n\
             --gemini-endpoint, --openai-endpoint, or run 'aitr settings' to edit interactively."
        );
    }

    if update.changes_endpoints() {
        let manager = ConfigManager::new();
        let mut config = manager.load_or_default();
        update.apply_endpoints(&mut config);
        manager.save(&config)?;
    }

    let mut store = Store::open_default()?;
    update.apply(&mut store);

    println!("{} Settings saved", Style::success("✓"));
    Ok(())
}

/// Edits the settings with interactive prompts.
pub fn run_settings() -> Result<()> {
    handle_prompt_cancellation(run_settings_inner)
}

fn run_settings_inner() -> Result<()> {
    let mut store = Store::open_default()?;

    print_settings(&store);
    println!();

    let provider = select_provider(store.provider())?;
    store.set_provider(provider);

    if let Some(key) = prompt_api_key(provider, store.credential_for(provider))? {
        store.set_credential(provider, key);
    }

    let model = prompt_model(provider, store.model())?;
    store.set_model(model);

    let prompt = Editor::new("Custom prompt:")
        .with_predefined_text(store.custom_prompt())
        .with_help_message("Placed before the text to translate, separated by a blank line")
        .prompt()?;
    store.set_custom_prompt(prompt.trim_end().to_string());

    println!();
    println!(
        "{} Settings saved to {}",
        Style::success("✓"),
        Style::secondary(store.storage().path().display())
    );

    Ok(())
}

pub fn print_settings(store: &Store) {
    let active = store.provider();

    println!("{}", Style::header("Settings"));
    println!(
        "  {}   {} {}",
        Style::label("provider"),
        Style::value(active),
        Style::secondary(format!("({})", active.label()))
    );
    for provider in Provider::ALL {
        let marker = if provider == active {
            format!(" {}", Style::active_marker())
        } else {
            String::new()
        };
        println!(
            "  {} {}{marker}",
            Style::label(format!("{:<10}", format!("{provider} key"))),
            mask_secret(store.credential_for(provider))
        );
    }
    println!("  {}      {}", Style::label("model"), Style::value(store.model()));
    println!("  {}", Style::label("prompt"));
    for line in store.custom_prompt().lines() {
        println!("    {}", Style::secondary(line));
    }
}

struct ProviderChoice(Provider);

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label())
    }
}

fn select_provider(current: Provider) -> Result<Provider> {
    let options: Vec<ProviderChoice> = Provider::ALL.into_iter().map(ProviderChoice).collect();
    let cursor = Provider::ALL
        .iter()
        .position(|p| *p == current)
        .unwrap_or(0);

    let choice = Select::new("Provider:", options)
        .with_starting_cursor(cursor)
        .prompt()?;

    Ok(choice.0)
}

/// Asks for the provider's key. An empty answer keeps the stored key.
fn prompt_api_key(provider: Provider, current: &str) -> Result<Option<String>> {
    let help = if current.is_empty() {
        "Your key is stored locally on this machine".to_string()
    } else {
        format!("Currently {}. Leave empty to keep it", mask_secret(current))
    };

    let key = Password::new(&format!("{} API Key:", provider.display_name()))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(&help)
        .prompt()?;

    let key = key.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

fn prompt_model(provider: Provider, current: &str) -> Result<String> {
    let suggestions = provider.suggested_models().join(", ");
    let help = format!("Suggestions: {suggestions}");

    let model = Text::new("Model:")
        .with_default(current)
        .with_help_message(&help)
        .prompt()?;

    let model = model.trim();
    if model.is_empty() {
        bail!("Model name cannot be empty");
    }

    Ok(model.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use crate::store::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_settings_update_is_empty() {
        assert!(SettingsUpdate::default().is_empty());
        assert!(
            !SettingsUpdate {
                model: Some("m".to_string()),
                ..SettingsUpdate::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_settings_update_apply() {
        let temp_dir = TempDir::new().unwrap();
        let mut store =
            Store::open(LocalStorage::open(temp_dir.path().join("storage.db")).unwrap());
        store.set_api_key("kept");

        SettingsUpdate {
            provider: Some(Provider::OpenAi),
            openai_api_key: Some("o".to_string()),
            model: Some("gpt-4o".to_string()),
            prompt: Some(String::new()),
            ..SettingsUpdate::default()
        }
        .apply(&mut store);

        assert_eq!(store.provider(), Provider::OpenAi);
        assert_eq!(store.api_key(), "kept");
        assert_eq!(store.openai_api_key(), "o");
        assert_eq!(store.model(), "gpt-4o");
        assert_eq!(store.custom_prompt(), "");
    }

    #[test]
    fn test_settings_update_endpoints() {
        let mut update = SettingsUpdate {
            openai_endpoint: Some("http://localhost:8080".to_string()),
            ..SettingsUpdate::default()
        };
        assert!(!update.is_empty());
        assert!(update.changes_endpoints());

        let mut config = ConfigFile::default();
        update.apply_endpoints(&mut config);

        assert_eq!(
            config.endpoints,
            EndpointConfig {
                openai: "http://localhost:8080".to_string(),
                ..EndpointConfig::default()
            }
        );
    }
}
