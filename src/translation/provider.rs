//! Supported translation providers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The vendor backend a translation is sent to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gemini (generative-content streaming API).
    #[default]
    Gemini,
    /// OpenAI (chat-completion streaming API).
    #[value(name = "openai")]
    OpenAi,
}

impl Provider {
    pub const ALL: [Self; 2] = [Self::Gemini, Self::OpenAi];

    /// Identifier used in the persisted snapshot and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }

    /// Short vendor name used in messages ("Please enter your Gemini API Key").
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenAi => "OpenAI",
        }
    }

    /// Longer label used in selection lists.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gemini => "Google Gemini",
            Self::OpenAi => "OpenAI",
        }
    }

    /// Model names offered as suggestions. Any other model name is accepted.
    pub const fn suggested_models(self) -> &'static [&'static str] {
        match self {
            Self::Gemini => &[
                "gemini-2.5-flash",
                "gemini-2.0-flash",
                "gemini-1.5-flash",
                "gemini-1.5-pro",
            ],
            Self::OpenAi => &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo", "gpt-3.5-turbo"],
        }
    }

    /// Parses a provider identifier, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
