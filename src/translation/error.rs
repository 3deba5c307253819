use thiserror::Error;

use super::Provider;

/// Failure of a single translation attempt.
///
/// The `Display` text is what the front-end shows; the cause of
/// [`TranslateError::TranslationFailed`] is kept for logging only.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// No credential is configured for the active provider.
    #[error("Please enter your {} API Key in settings first.", .0.display_name())]
    MissingCredential(Provider),

    /// The streaming call failed (transport, authentication, vendor error, bad response).
    #[error("Translation failed. Please check your API key and try again.")]
    TranslationFailed(#[source] anyhow::Error),
}

impl TranslateError {
    pub fn failed(cause: impl Into<anyhow::Error>) -> Self {
        Self::TranslationFailed(cause.into())
    }

    /// Underlying cause, when there is one.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::MissingCredential(_) => None,
            Self::TranslationFailed(cause) => Some(cause),
        }
    }
}
