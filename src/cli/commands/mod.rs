//! Subcommand implementations.

/// Chat mode command handler.
pub mod chat;

/// History browsing and clearing.
pub mod history;

/// Settings display and editing.
pub mod settings;

/// Translation command handler.
pub mod translate;
