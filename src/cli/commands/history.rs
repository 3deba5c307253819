//! History command handlers.

use anyhow::{Result, bail};

use crate::store::{HistoryItem, Store};
use crate::ui::Style;

const PREVIEW_LINES: usize = 2;
const PREVIEW_WIDTH: usize = 80;

pub fn list_history() -> Result<()> {
    let store = Store::open_default()?;
    print_history(&store);
    Ok(())
}

pub fn print_history(store: &Store) {
    let history = store.history();

    if history.is_empty() {
        println!("No history yet.");
        return;
    }

    println!("{}", Style::header("History"));
    for (index, item) in history.iter().enumerate() {
        println!(
            "{} {}",
            Style::index(format!("[{index}]")),
            Style::secondary(format_timestamp(item))
        );
        for line in clamp(&item.source) {
            println!("    {}", Style::label(line));
        }
        for line in clamp(&item.target) {
            println!("    {line}");
        }
    }
    println!();
    println!(
        "{}",
        Style::hint("Run 'aitr history show <index>' to load an entry")
    );
}

/// Prints one entry in full and loads it into the session text.
pub fn show_history_item(index: usize) -> Result<()> {
    let mut store = Store::open_default()?;
    let len = store.history().len();

    let Some(item) = store.restore_from_history(index) else {
        if len == 0 {
            bail!("History is empty");
        }
        bail!("No history entry at index {index} (valid: 0-{})", len - 1);
    };

    println!("{}", Style::secondary(format_timestamp(&item)));
    println!();
    println!("{}", Style::header("Source"));
    println!("{}", item.source);
    println!();
    println!("{}", Style::header("Translation"));
    println!("{}", item.target);
    Ok(())
}

pub fn clear_history() -> Result<()> {
    let mut store = Store::open_default()?;
    let removed = store.history().len();
    store.clear_history();

    println!(
        "{} Cleared {removed} history {}",
        Style::success("✓"),
        if removed == 1 { "entry" } else { "entries" }
    );
    Ok(())
}

fn format_timestamp(item: &HistoryItem) -> String {
    item.created_at().map_or_else(
        || "(unknown time)".to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// At most two lines of `text`, each cut to the preview width.
fn clamp(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut preview: Vec<String> = lines
        .iter()
        .take(PREVIEW_LINES)
        .map(|line| truncate(line, PREVIEW_WIDTH))
        .collect();

    if lines.len() > PREVIEW_LINES
        && let Some(last) = preview.last_mut()
        && !last.ends_with('…')
    {
        last.push('…');
    }

    preview
}

fn truncate(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
