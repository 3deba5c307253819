use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::cli::commands::history::print_history;
use crate::cli::commands::translate::translate_to_stdout;
use crate::config::EndpointConfig;
use crate::store::Store;
use crate::translation::{DeltaSource, Gateway, GeminiClient, OpenAiClient, Provider};
use crate::translator::Overrides;
use crate::ui::Style;

/// An interactive chat session for translation.
///
/// Every plain line is translated with the store's configuration (plus the
/// session overrides given on the command line), streamed to stdout and
/// committed to history. Slash commands edit the saved settings.
pub struct ChatSession<G = GeminiClient, O = OpenAiClient> {
    store: Store,
    gateway: Gateway<G, O>,
    endpoints: EndpointConfig,
    overrides: Overrides,
}

impl<G: DeltaSource, O: DeltaSource> ChatSession<G, O> {
    pub const fn new(
        store: Store,
        gateway: Gateway<G, O>,
        endpoints: EndpointConfig,
        overrides: Overrides,
    ) -> Self {
        Self {
            store,
            gateway,
            endpoints,
            overrides,
        }
    }

    pub const fn store(&self) -> &Store {
        &self.store
    }

    pub const fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The provider translations in this session go to.
    pub fn provider(&self) -> Provider {
        self.overrides.provider.unwrap_or(self.store.provider())
    }

    /// The model translations in this session use.
    pub fn model(&self) -> &str {
        self.overrides
            .model
            .as_deref()
            .unwrap_or(self.store.model())
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header();

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type text to translate, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Text(text) => self.translate_and_print(text).await,
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Applies a slash command. Returns `false` when the session should end.
    pub fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Provider(value) => self.set_provider(value.as_deref()),
            SlashCommand::Model(value) => self.set_model(value.as_deref()),
            SlashCommand::Prompt(value) => self.set_prompt(value),
            SlashCommand::History => print_history(&self.store),
            SlashCommand::Clear => {
                self.store.clear_session();
                println!("{} Cleared", Style::success("✓"));
            }
            SlashCommand::Config => {
                let provider = self.provider();
                ui::print_config(
                    provider,
                    self.model(),
                    self.endpoints.for_provider(provider),
                    &self.store,
                );
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    fn set_provider(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            println!(
                "{} {}",
                Style::label("provider"),
                Style::value(self.provider())
            );
            return;
        };

        let Some(provider) = Provider::parse(value) else {
            ui::print_error(&format!(
                "Unknown provider: {value} (expected gemini or openai)"
            ));
            return;
        };

        self.overrides.provider = None;
        self.store.set_provider(provider);
        println!(
            "{} Provider set to {}",
            Style::success("✓"),
            Style::value(provider.label())
        );
        if self.store.credential_for(provider).is_empty() {
            println!(
                "{} No {} API key saved. Run 'aitr settings' to add one.",
                Style::warning("!"),
                provider.display_name()
            );
        }
    }

    fn set_model(&mut self, value: Option<&str>) {
        let Some(model) = value else {
            let suggestions = self.provider().suggested_models().join(", ");
            println!("{} {}", Style::label("model"), Style::value(self.model()));
            println!("{}", Style::hint(format!("Suggestions: {suggestions}")));
            return;
        };

        self.overrides.model = None;
        self.store.set_model(model);
        println!(
            "{} Model set to {}",
            Style::success("✓"),
            Style::value(model)
        );
    }

    fn set_prompt(&mut self, value: Option<String>) {
        let Some(prompt) = value else {
            println!("{}", Style::label("prompt"));
            for line in self.store.custom_prompt().lines() {
                println!("  {}", Style::secondary(line));
            }
            return;
        };

        self.overrides.prompt = None;
        self.store.set_custom_prompt(prompt);
        println!("{} Prompt updated", Style::success("✓"));
    }

    async fn translate_and_print(&mut self, text: String) {
        let result =
            translate_to_stdout(&mut self.store, &self.gateway, text, &self.overrides).await;

        if let Err(e) = result {
            ui::print_error(&e.to_string());
            return;
        }
        println!();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::LocalStorage;
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir, overrides: Overrides) -> ChatSession {
        let storage = LocalStorage::open(temp_dir.path().join("storage.db")).unwrap();
        let endpoints = EndpointConfig::default();
        ChatSession::new(
            Store::open(storage),
            Gateway::new(&endpoints.gemini, &endpoints.openai),
            endpoints,
            overrides,
        )
    }

    #[test]
    fn test_provider_command_persists_and_drops_override() {
        let temp_dir = TempDir::new().unwrap();
        let mut chat = session(
            &temp_dir,
            Overrides {
                provider: Some(Provider::Gemini),
                ..Overrides::default()
            },
        );

        assert!(chat.handle_command(SlashCommand::Provider(Some("openai".to_string()))));
        assert_eq!(chat.store().provider(), Provider::OpenAi);
        assert_eq!(chat.provider(), Provider::OpenAi);
        assert!(chat.overrides().provider.is_none());
    }

    #[test]
    fn test_unknown_provider_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut chat = session(&temp_dir, Overrides::default());

        assert!(chat.handle_command(SlashCommand::Provider(Some("claude".to_string()))));
        assert_eq!(chat.store().provider(), Provider::Gemini);
    }

    #[test]
    fn test_model_override_wins_until_changed() {
        let temp_dir = TempDir::new().unwrap();
        let mut chat = session(
            &temp_dir,
            Overrides {
                model: Some("gemini-1.5-pro".to_string()),
                ..Overrides::default()
            },
        );
        assert_eq!(chat.model(), "gemini-1.5-pro");

        chat.handle_command(SlashCommand::Model(Some("gemini-2.0-flash".to_string())));
        assert_eq!(chat.model(), "gemini-2.0-flash");
        assert_eq!(chat.store().model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_prompt_and_clear_commands() {
        let temp_dir = TempDir::new().unwrap();
        let mut chat = session(&temp_dir, Overrides::default());

        chat.handle_command(SlashCommand::Prompt(Some("Translate to French:".to_string())));
        assert_eq!(chat.store().custom_prompt(), "Translate to French:");

        chat.store.set_source_text("Hello");
        chat.store.set_translated_text("Bonjour");
        chat.handle_command(SlashCommand::Clear);
        assert_eq!(chat.store().source_text(), "");
        assert_eq!(chat.store().translated_text(), "");
    }

    #[test]
    fn test_quit_ends_session() {
        let temp_dir = TempDir::new().unwrap();
        let mut chat = session(&temp_dir, Overrides::default());
        assert!(!chat.handle_command(SlashCommand::Quit));
        assert!(chat.handle_command(SlashCommand::Help));
    }
}
