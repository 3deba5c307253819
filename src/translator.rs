//! Drives one translation from the front-end's point of view.
//!
//! This is the glue between the [`Store`] and the [`Gateway`]: the gateway
//! never sees the store, and the store never talks to the network.

use crate::store::{Configuration, Store};
use crate::translation::{DeltaSource, Gateway, Provider, TranslateError, TranslationRequest};

/// Per-invocation changes to the stored configuration. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub prompt: Option<String>,
}

impl Overrides {
    /// The stored configuration with these overrides applied.
    pub fn apply(&self, config: &Configuration) -> Configuration {
        let mut config = config.clone();
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(model) = &self.model {
            config.model.clone_from(model);
        }
        if let Some(prompt) = &self.prompt {
            config.custom_prompt.clone_from(prompt);
        }
        config
    }
}

/// Builds a request from the store's current configuration and `source_text`.
pub fn build_request(
    store: &Store,
    source_text: impl Into<String>,
    overrides: &Overrides,
) -> TranslationRequest {
    TranslationRequest::from_config(&overrides.apply(store.config()), source_text)
}

/// Translates `request`, streaming the text into the store's session.
///
/// The source text is stored first. With a missing credential nothing else
/// happens. Otherwise the translated text is cleared, overwritten with every
/// accumulated snapshot (each one also passed to `on_display`), and the
/// finished pair is committed to history. On failure the partial text stays
/// in the session and history is untouched.
pub async fn translate_into_store<G, O, F>(
    store: &mut Store,
    gateway: &Gateway<G, O>,
    request: &TranslationRequest,
    mut on_display: F,
) -> Result<String, TranslateError>
where
    G: DeltaSource,
    O: DeltaSource,
    F: FnMut(&str),
{
    store.set_source_text(request.source_text.clone());
    request.ensure_credential()?;
    store.set_translated_text("");

    let translated = gateway
        .translate_request(request, |text| {
            store.set_translated_text(text);
            on_display(text);
        })
        .await?;

    store.add_to_history(request.source_text.clone(), translated.clone());
    Ok(translated)
}
