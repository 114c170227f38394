//! Translation with primary/fallback failover.
//!
//! Two stateless HTTP adapters implement [`TranslationProvider`]; the
//! [`TranslationOrchestrator`] validates input, resolves the language pair and
//! tries the primary provider before the fallback, strictly in sequence.

pub mod error;
pub mod google;
pub mod mymemory;
pub mod orchestrator;
pub mod provider;

pub use error::{ProviderError, ProviderFailure, TranslateError};
pub use google::GoogleTranslateProvider;
pub use mymemory::MyMemoryProvider;
pub use orchestrator::TranslationOrchestrator;
pub use provider::{build_http_client, TranslationProvider};
