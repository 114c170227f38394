use thiserror::Error;

use crate::language::LanguageError;

/// Top-level error type for Parla.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for ParlaError` so that `?` works across crate
/// boundaries, e.g. in the application binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParlaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Language error: {0}")]
    Language(#[from] LanguageError),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ParlaError {
    fn from(err: toml::de::Error) -> Self {
        ParlaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ParlaError {
    fn from(err: toml::ser::Error) -> Self {
        ParlaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ParlaError {
    fn from(err: serde_json::Error) -> Self {
        ParlaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Parla operations.
pub type Result<T> = std::result::Result<T, ParlaError>;
