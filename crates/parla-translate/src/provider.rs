//! Provider trait and shared HTTP plumbing.

use std::time::Duration;

use async_trait::async_trait;

use parla_core::config::TranslationConfig;
use parla_core::error::ParlaError;
use parla_core::language::LanguagePair;
use parla_core::types::ProviderKind;

use crate::error::ProviderFailure;

/// A stateless request/response adapter to an external translation service.
///
/// Implementations issue exactly one network request per call and never
/// retry.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// The role this provider plays in failover.
    fn kind(&self) -> ProviderKind;

    /// Translate `text` from `pair.source` to `pair.target`.
    async fn translate(&self, text: &str, pair: &LanguagePair) -> Result<String, ProviderFailure>;
}

/// Build the HTTP client shared by both providers.
pub fn build_http_client(config: &TranslationConfig) -> Result<reqwest::Client, ParlaError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("parla/", env!("CARGO_PKG_VERSION")));
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| ParlaError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Send a prepared GET and decode its JSON body.
///
/// Non-2xx statuses become [`ProviderFailure::Http`] before the body is read.
pub(crate) async fn fetch_json(
    request: reqwest::RequestBuilder,
) -> Result<serde_json::Value, ProviderFailure> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderFailure::Http {
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderFailure::MalformedResponse(e.to_string()))
}
