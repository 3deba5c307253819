use clap::Parser;
use std::process::ExitCode;

use aitr::cli::commands::settings::SettingsUpdate;
use aitr::cli::commands::{chat, history, settings, translate};
use aitr::cli::{Args, Command, HistoryCommand, SettingsCommand};
use aitr::input::InputSource;
use aitr::output::{self, OutputConfig};
use aitr::translation::TranslateError;
use aitr::translator::Overrides;
use aitr::ui;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });
    output::init_logging();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Command::Settings { command }) => match command {
            None => settings::run_settings(),
            Some(SettingsCommand::Show) => settings::show_settings(),
            Some(SettingsCommand::Set {
                provider,
                api_key,
                openai_api_key,
                model,
                prompt,
                gemini_endpoint,
                openai_endpoint,
            }) => settings::set_settings(SettingsUpdate {
                provider,
                api_key,
                openai_api_key,
                model,
                prompt,
                gemini_endpoint,
                openai_endpoint,
            }),
        },
        Some(Command::History { command }) => match command {
            None | Some(HistoryCommand::List) => history::list_history(),
            Some(HistoryCommand::Show { index }) => history::show_history_item(index),
            Some(HistoryCommand::Clear) => history::clear_history(),
        },
        Some(Command::Chat { provider, model }) => {
            chat::run_chat(chat::ChatOptions { provider, model }).await
        }
        None => {
            let options = translate::TranslateOptions {
                input: InputSource::from_args(args.text, args.file),
                overrides: Overrides {
                    provider: args.provider,
                    model: args.model,
                    prompt: args.prompt,
                },
            };
            translate::run_translate(options).await
        }
    }
}

/// Prints the error and picks the exit status.
///
/// Translation errors show only their fixed message; the underlying cause
/// has already been logged.
fn report(error: &anyhow::Error) -> ExitCode {
    let code = match error.downcast_ref::<TranslateError>() {
        Some(e) => {
            ui::print_error(&e.to_string());
            match e {
                TranslateError::MissingCredential(_) => exitcode::CONFIG,
                TranslateError::TranslationFailed(_) => exitcode::UNAVAILABLE,
            }
        }
        None => {
            ui::print_error(&format!("{error:#}"));
            1
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
