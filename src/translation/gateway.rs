//! Provider-agnostic translation contract.
//!
//! Each vendor adapter only knows how to open a stream of text deltas for a
//! `(credential, model, prompt)` triple. Everything else lives here: the
//! credential check, prompt construction, folding deltas into accumulated
//! snapshots, and error normalization.

use anyhow::Result;
use futures_util::{Stream, StreamExt};
use std::future::Future;
use std::pin::Pin;

use super::gemini::GeminiClient;
use super::openai::OpenAiClient;
use super::prompt::build_prompt;
use super::{Provider, TranslateError};
use crate::store::Configuration;

/// Ordered text deltas from one streaming response.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// A streaming text-completion capability addressable by credential, model and prompt.
pub trait DeltaSource {
    /// The provider this source talks to.
    fn provider(&self) -> Provider;

    /// Opens a single streaming request.
    ///
    /// Resolves once the response headers arrive; the returned stream yields
    /// the deltas in order and ends at the vendor's terminal signal.
    fn open_stream(
        &self,
        credential: &str,
        model: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<DeltaStream>> + Send;
}

/// Folds deltas into the running concatenation of all text received so far.
///
/// Empty deltas are skipped, so each item is strictly longer than the one
/// before it. The first error is yielded and ends the stream.
pub fn snapshots(deltas: DeltaStream) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        let mut deltas = deltas;
        let mut accumulated = String::new();

        while let Some(delta) = deltas.next().await {
            match delta {
                Ok(delta) if delta.is_empty() => {}
                Ok(delta) => {
                    accumulated.push_str(&delta);
                    yield Ok(accumulated.clone());
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    }
}

/// Translates `source_text` through `source`, reporting progress to `on_update`.
///
/// `on_update` receives the full accumulated text on every delta, never just
/// the delta. The returned text equals the last value passed to `on_update`
/// (or is empty when the vendor sent nothing).
pub async fn translate<S, F>(
    source: &S,
    credential: &str,
    model_id: &str,
    prompt_template: &str,
    source_text: &str,
    mut on_update: F,
) -> Result<String, TranslateError>
where
    S: DeltaSource,
    F: FnMut(&str),
{
    let provider = source.provider();

    if credential.is_empty() {
        return Err(TranslateError::MissingCredential(provider));
    }

    let prompt = build_prompt(prompt_template, source_text);
    tracing::debug!(%provider, model = model_id, prompt_len = prompt.len(), "opening translation stream");

    let result = async {
        let deltas = source.open_stream(credential, model_id, &prompt).await?;
        let mut updates = std::pin::pin!(snapshots(deltas));
        let mut latest = String::new();

        while let Some(snapshot) = updates.next().await {
            latest = snapshot?;
            on_update(&latest);
        }

        Ok::<_, anyhow::Error>(latest)
    }
    .await;

    match result {
        Ok(text) => {
            tracing::debug!(%provider, chars = text.chars().count(), "translation stream finished");
            Ok(text)
        }
        Err(cause) => {
            tracing::warn!(%provider, model = model_id, error = ?cause, "translation failed");
            Err(TranslateError::failed(cause))
        }
    }
}

/// Everything needed for one translation, resolved from the current configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub provider: Provider,
    pub credential: String,
    pub model: String,
    pub prompt_template: String,
    pub source_text: String,
}

impl TranslationRequest {
    /// Builds a request for the configuration's active provider.
    pub fn from_config(config: &Configuration, source_text: impl Into<String>) -> Self {
        Self {
            provider: config.provider,
            credential: config.credential_for(config.provider).to_string(),
            model: config.model.clone(),
            prompt_template: config.custom_prompt.clone(),
            source_text: source_text.into(),
        }
    }

    /// Fails with [`TranslateError::MissingCredential`] when no key is set.
    pub fn ensure_credential(&self) -> Result<(), TranslateError> {
        if self.credential.is_empty() {
            Err(TranslateError::MissingCredential(self.provider))
        } else {
            Ok(())
        }
    }
}

/// Holds one adapter per provider and dispatches on the provider tag.
#[derive(Debug, Clone, Default)]
pub struct Gateway<G = GeminiClient, O = OpenAiClient> {
    gemini: G,
    openai: O,
}

impl Gateway {
    /// Creates a gateway talking to the given vendor base URLs.
    pub fn new(gemini_endpoint: &str, openai_endpoint: &str) -> Self {
        Self {
            gemini: GeminiClient::new(gemini_endpoint),
            openai: OpenAiClient::new(openai_endpoint),
        }
    }
}

impl<G: DeltaSource, O: DeltaSource> Gateway<G, O> {
    pub const fn with_sources(gemini: G, openai: O) -> Self {
        Self { gemini, openai }
    }

    /// The adapter used for [`Provider::Gemini`].
    pub const fn gemini(&self) -> &G {
        &self.gemini
    }

    /// The adapter used for [`Provider::OpenAi`].
    pub const fn openai(&self) -> &O {
        &self.openai
    }

    /// Translates with the adapter registered for `provider`.
    pub async fn translate<F>(
        &self,
        provider: Provider,
        credential: &str,
        model_id: &str,
        prompt_template: &str,
        source_text: &str,
        on_update: F,
    ) -> Result<String, TranslateError>
    where
        F: FnMut(&str),
    {
        match provider {
            Provider::Gemini => {
                translate(
                    &self.gemini,
                    credential,
                    model_id,
                    prompt_template,
                    source_text,
                    on_update,
                )
                .await
            }
            Provider::OpenAi => {
                translate(
                    &self.openai,
                    credential,
                    model_id,
                    prompt_template,
                    source_text,
                    on_update,
                )
                .await
            }
        }
    }

    /// Translates a fully resolved request.
    pub async fn translate_request<F>(
        &self,
        request: &TranslationRequest,
        on_update: F,
    ) -> Result<String, TranslateError>
    where
        F: FnMut(&str),
    {
        self.translate(
            request.provider,
            &request.credential,
            &request.model,
            &request.prompt_template,
            &request.source_text,
            on_update,
        )
        .await
    }
}
