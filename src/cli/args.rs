use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::translation::Provider;

#[derive(Parser, Debug)]
#[command(name = "aitr")]
#[command(about = "Streaming AI translation with Gemini or OpenAI")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if neither a file nor --text is given)
    pub file: Option<PathBuf>,

    /// Text to translate
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Provider for this run (does not change the saved setting)
    #[arg(short = 'p', long, value_enum)]
    pub provider: Option<Provider>,

    /// Model for this run (does not change the saved setting)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Prompt template for this run (does not change the saved setting)
    #[arg(long)]
    pub prompt: Option<String>,

    /// Suppress status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// View or change provider, API keys, model and prompt
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommand>,
    },
    /// Browse or clear past translations
    History {
        #[command(subcommand)]
        command: Option<HistoryCommand>,
    },
    /// Interactive translation mode
    Chat {
        /// Provider for this session
        #[arg(short = 'p', long, value_enum)]
        provider: Option<Provider>,

        /// Model for this session
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show the current settings (keys are masked)
    Show,
    /// Change settings without prompts
    Set {
        /// Active provider
        #[arg(long, value_enum)]
        provider: Option<Provider>,

        /// Gemini API key
        #[arg(long)]
        api_key: Option<String>,

        /// OpenAI API key
        #[arg(long)]
        openai_api_key: Option<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// Prompt template placed before the text
        #[arg(long)]
        prompt: Option<String>,

        /// Gemini API base URL (saved to config.toml)
        #[arg(long)]
        gemini_endpoint: Option<String>,

        /// OpenAI-compatible API base URL (saved to config.toml)
        #[arg(long)]
        openai_endpoint: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List recent translations (default)
    List,
    /// Show one entry and load it into the session
    Show {
        /// Entry index as shown by `aitr history`
        index: usize,
    },
    /// Delete all history entries
    Clear,
}
