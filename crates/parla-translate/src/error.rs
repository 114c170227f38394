//! Error types for translation.

use parla_core::error::ParlaError;
use parla_core::language::LanguageError;
use parla_core::types::ProviderKind;

/// Why a single provider call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderFailure {
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    #[error("provider returned an empty translation")]
    EmptyResult,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ProviderFailure::Http {
                status: status.as_u16(),
            },
            None if err.is_decode() => ProviderFailure::MalformedResponse(err.to_string()),
            None => ProviderFailure::Transport(err.to_string()),
        }
    }
}

/// A provider failure tagged with the provider that produced it.
///
/// Only used for control flow and logging inside one translation attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{provider} provider failed: {cause}")]
pub struct ProviderError {
    pub provider: ProviderKind,
    pub cause: ProviderFailure,
}

/// Errors surfaced by the orchestrator to its caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("text to translate cannot be empty")]
    EmptyInput,
    #[error(transparent)]
    InvalidFormat(#[from] LanguageError),
    /// Both providers failed. The causes are logged, never carried.
    #[error("translation unavailable")]
    Unavailable,
}

impl From<TranslateError> for ParlaError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::InvalidFormat(e) => ParlaError::Language(e),
            other => ParlaError::Translation(other.to_string()),
        }
    }
}
