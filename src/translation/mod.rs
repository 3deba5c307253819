mod error;
mod gateway;
mod gemini;
mod openai;
mod prompt;
mod provider;
mod sse_parser;

pub use error::TranslateError;
pub use gateway::{DeltaSource, DeltaStream, Gateway, TranslationRequest, snapshots, translate};
pub use gemini::{DEFAULT_GEMINI_ENDPOINT, GeminiClient};
pub use openai::{DEFAULT_OPENAI_ENDPOINT, OpenAiClient};
pub use prompt::build_prompt;
pub use provider::Provider;
