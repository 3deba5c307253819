use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::Provider;
use super::gateway::{DeltaSource, DeltaStream};
use super::sse_parser::sse_data_stream;

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Adapter for the OpenAI chat-completion streaming API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new(DEFAULT_OPENAI_ENDPOINT)
    }
}

impl DeltaSource for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn open_stream(&self, credential: &str, model: &str, prompt: &str) -> Result<DeltaStream> {
        let url = self.url();

        let chat_request = ChatCompletionRequest {
            model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential)
            .json(&chat_request)
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("API request failed with status {status}: {body}");
        }

        let deltas = sse_data_stream(response.bytes_stream()).filter_map(|payload| async move {
            match payload.and_then(|p| parse_chunk(&p)) {
                Ok(Some(content)) => Some(Ok(content)),
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(deltas))
    }
}

/// Extracts the content delta of the first choice in one streamed chunk.
///
/// Chunks without content (role announcements, finish reasons) give `None`.
fn parse_chunk(payload: &str) -> Result<Option<String>> {
    let response: StreamResponse = serde_json::from_str(payload)
        .with_context(|| format!("Malformed stream chunk: {payload}"))?;

    if let Some(error) = response.error {
        bail!("OpenAI returned an error: {}", error.message);
    }

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .filter(|c| !c.is_empty());

    Ok(content)
}
