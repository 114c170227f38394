//! Primary provider: Google's public `translate_a/single` endpoint.
//!
//! The response is a nested array. Its first element lists translation
//! fragments, each an array whose first element is a piece of translated
//! text:
//!
//! ```text
//! [[["Hola ", "Hello ", null, null, 10], ["mundo", "world", null, null, 10]], null, "en", ...]
//! ```

use async_trait::async_trait;
use serde_json::Value;

use parla_core::config::TranslationConfig;
use parla_core::language::LanguagePair;
use parla_core::types::ProviderKind;

use crate::error::ProviderFailure;
use crate::provider::{fetch_json, TranslationProvider};

/// Asks for translated text only.
const OUTPUT_TYPE: &str = "t";

/// HTTP adapter for the primary translation service.
#[derive(Debug, Clone)]
pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    url: String,
    client_id: String,
}

impl GoogleTranslateProvider {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            client_id: client_id.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &TranslationConfig) -> Self {
        Self::new(client, &config.primary_url, &config.primary_client)
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Primary
    }

    async fn translate(&self, text: &str, pair: &LanguagePair) -> Result<String, ProviderFailure> {
        let request = self.client.get(&self.url).query(&[
            ("client", self.client_id.as_str()),
            ("sl", pair.source.as_str()),
            ("tl", pair.target.as_str()),
            ("dt", OUTPUT_TYPE),
            ("q", text),
        ]);
        let body = fetch_json(request).await?;
        let translated = join_fragments(&body)?;
        tracing::debug!(pair = %pair, chars = translated.len(), "Primary provider answered");
        Ok(translated)
    }
}

/// Concatenate the fragment texts of a response body in order.
pub fn join_fragments(body: &Value) -> Result<String, ProviderFailure> {
    let fragments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ProviderFailure::MalformedResponse("expected an array of fragments".to_string())
        })?;

    let joined: String = fragments
        .iter()
        .filter_map(|fragment| fragment.get(0).and_then(Value::as_str))
        .collect();

    if joined.is_empty() {
        return Err(ProviderFailure::EmptyResult);
    }
    Ok(joined)
}
