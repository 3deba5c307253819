//! # aitr - Streaming AI Translation
//!
//! `aitr` translates text with Google Gemini or OpenAI, showing the
//! translation as it streams in. Settings, the last source/translation pair
//! and the ten most recent translations are kept locally.
//!
//! ## Quick Start
//!
//! ```bash
//! # Save a key and pick a provider
//! aitr settings set --provider gemini --api-key <KEY>
//!
//! # Translate a file, a string or stdin
//! aitr ./abstract.md
//! aitr --text "Attention is all you need."
//! cat notes.md | aitr -p openai -m gpt-4o-mini
//!
//! # Interactive mode
//! aitr chat
//! ```
//!
//! ## Storage
//!
//! Settings, session text and history live in a `SQLite` database at
//! `~/.local/share/aitr/storage.db`. Vendor base URLs can be changed in
//! `~/.config/aitr/config.toml`:
//!
//! ```toml
//! [endpoints]
//! gemini = "https://generativelanguage.googleapis.com"
//! openai = "https://api.openai.com"
//! ```

/// Interactive chat mode for translation sessions.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Endpoint configuration file.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration and data.
pub mod paths;

/// Persisted settings, session text and history.
pub mod store;

/// Provider adapters and the provider-agnostic gateway.
pub mod translation;

/// Runs a translation against the store.
pub mod translator;

/// Terminal UI components (spinner, colors).
pub mod ui;
