//! Chat mode UI components.

use super::command::SLASH_COMMANDS;
use crate::store::Store;
use crate::translation::Provider;
use crate::ui::{Style, mask_secret};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Interactive Translation Mode",
        Style::header("aitr"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(provider: Provider, model: &str, endpoint: &str, store: &Store) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}   {}",
        Style::label("provider"),
        Style::value(provider.label())
    );
    println!(
        "  {}        {}",
        Style::label("key"),
        mask_secret(store.credential_for(provider))
    );
    println!("  {}      {}", Style::label("model"), Style::value(model));
    println!(
        "  {}   {}",
        Style::label("endpoint"),
        Style::secondary(endpoint)
    );
    println!(
        "  {}    {}",
        Style::label("history"),
        Style::secondary(format!("{} entries", store.history().len()))
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let width = SLASH_COMMANDS
        .iter()
        .map(|(cmd, _)| cmd.len())
        .max()
        .unwrap_or(0);
    for (cmd, desc) in SLASH_COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{cmd:<width$}")),
            Style::secondary(desc)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    crate::ui::print_error(message);
    eprintln!();
}
