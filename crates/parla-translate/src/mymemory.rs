//! Fallback provider: the MyMemory `get` endpoint.
//!
//! The translated text lives at `responseData.translatedText`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use parla_core::config::TranslationConfig;
use parla_core::language::LanguagePair;
use parla_core::types::ProviderKind;

use crate::error::ProviderFailure;
use crate::provider::{fetch_json, TranslationProvider};

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// HTTP adapter for the fallback translation service.
#[derive(Debug, Clone)]
pub struct MyMemoryProvider {
    client: reqwest::Client,
    url: String,
}

impl MyMemoryProvider {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &TranslationConfig) -> Self {
        Self::new(client, &config.fallback_url)
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Fallback
    }

    async fn translate(&self, text: &str, pair: &LanguagePair) -> Result<String, ProviderFailure> {
        let langpair = pair.selection();
        let request = self
            .client
            .get(&self.url)
            .query(&[("q", text), ("langpair", langpair.as_str())]);
        let body = fetch_json(request).await?;
        let translated = extract_translated_text(body)?;
        tracing::debug!(pair = %pair, chars = translated.len(), "Fallback provider answered");
        Ok(translated)
    }
}

/// Pull `responseData.translatedText` out of a response body.
///
/// A missing or empty field means the body does not honour the contract.
pub fn extract_translated_text(body: Value) -> Result<String, ProviderFailure> {
    let response: MyMemoryResponse = serde_json::from_value(body)
        .map_err(|e| ProviderFailure::MalformedResponse(e.to_string()))?;
    response
        .response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            ProviderFailure::MalformedResponse("missing responseData.translatedText".to_string())
        })
}
