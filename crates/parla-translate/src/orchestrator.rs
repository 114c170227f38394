//! Translation orchestrator: input validation plus primary-then-fallback failover.

use std::sync::Arc;

use parla_core::config::TranslationConfig;
use parla_core::error::ParlaError;
use parla_core::language::{self, LanguagePair};
use parla_core::types::{ProviderKind, TranslationResult};

use crate::error::{ProviderError, TranslateError};
use crate::google::GoogleTranslateProvider;
use crate::mymemory::MyMemoryProvider;
use crate::provider::{build_http_client, TranslationProvider};

/// Calls the primary provider and, only if it fails, the fallback.
///
/// Providers are never raced: at most two requests leave per translation.
#[derive(Clone)]
pub struct TranslationOrchestrator {
    primary: Arc<dyn TranslationProvider>,
    fallback: Arc<dyn TranslationProvider>,
}

impl std::fmt::Debug for TranslationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationOrchestrator")
            .field("primary", &self.primary.kind())
            .field("fallback", &self.fallback.kind())
            .finish()
    }
}

impl TranslationOrchestrator {
    pub fn new(
        primary: Arc<dyn TranslationProvider>,
        fallback: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Wire the Google primary and MyMemory fallback over one HTTP client.
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ParlaError> {
        let client = build_http_client(config)?;
        Ok(Self::new(
            Arc::new(GoogleTranslateProvider::from_config(client.clone(), config)),
            Arc::new(MyMemoryProvider::from_config(client, config)),
        ))
    }

    /// Translate `text` for the `"source|target"` selection.
    ///
    /// Input errors are returned before any network call. Provider failures
    /// are logged and collapse into [`TranslateError::Unavailable`].
    pub async fn translate(
        &self,
        text: &str,
        selection: &str,
    ) -> Result<TranslationResult, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }
        let pair = language::resolve(selection)?;

        match self.attempt(self.primary.as_ref(), text, &pair).await {
            Ok(result) => return Ok(result),
            Err(e) => tracing::warn!(
                error = %e,
                pair = %pair,
                "Primary translation failed, trying fallback"
            ),
        }

        match self.attempt(self.fallback.as_ref(), text, &pair).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!(error = %e, pair = %pair, "Fallback translation failed");
                Err(TranslateError::Unavailable)
            }
        }
    }

    async fn attempt(
        &self,
        provider: &dyn TranslationProvider,
        text: &str,
        pair: &LanguagePair,
    ) -> Result<TranslationResult, ProviderError> {
        let kind: ProviderKind = provider.kind();
        match provider.translate(text, pair).await {
            Ok(translated) => {
                tracing::info!(provider = %kind, pair = %pair, "Translation succeeded");
                Ok(TranslationResult {
                    text: translated,
                    provider_used: kind,
                })
            }
            Err(cause) => Err(ProviderError {
                provider: kind,
                cause,
            }),
        }
    }
}
