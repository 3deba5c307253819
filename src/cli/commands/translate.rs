use anyhow::{Result, bail};
use std::io::{self, Write};

use crate::config::ConfigManager;
use crate::input::{InputReader, InputSource};
use crate::status;
use crate::store::Store;
use crate::translation::{DeltaSource, Gateway, TranslateError};
use crate::translator::{self, Overrides};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub input: InputSource,
    pub overrides: Overrides,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let source_text = InputReader::read(&options.input)?;

    if source_text.trim().is_empty() {
        bail!("Input is empty");
    }

    let gateway = ConfigManager::new().load_or_default().gateway();
    let mut store = Store::open_default()?;

    let effective = options.overrides.apply(store.config());
    status!(
        "{}",
        Style::secondary(format!("{} · {}", effective.provider.label(), effective.model))
    );

    translate_to_stdout(&mut store, &gateway, source_text, &options.overrides).await?;
    Ok(())
}

/// Translates `source_text`, writing the translation to stdout as it streams in.
pub async fn translate_to_stdout<G, O>(
    store: &mut Store,
    gateway: &Gateway<G, O>,
    source_text: String,
    overrides: &Overrides,
) -> Result<String, TranslateError>
where
    G: DeltaSource,
    O: DeltaSource,
{
    let request = translator::build_request(store, source_text, overrides);
    let spinner = Spinner::new("Translating...");
    let mut printer = StreamPrinter::default();

    let result = translator::translate_into_store(store, gateway, &request, |text| {
        if printer.printed == 0 {
            spinner.stop();
        }
        printer.print(text);
    })
    .await;

    spinner.stop();
    printer.finish();
    result
}

/// Prints only the part of each accumulated snapshot not yet on screen.
#[derive(Default)]
struct StreamPrinter {
    printed: usize,
}

impl StreamPrinter {
    fn print(&mut self, snapshot: &str) {
        let Some(fresh) = snapshot.get(self.printed..) else {
            return;
        };
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(fresh.as_bytes());
        let _ = stdout.flush();
        self.printed = snapshot.len();
    }

    fn finish(&self) {
        if self.printed > 0 {
            println!();
        }
    }
}
