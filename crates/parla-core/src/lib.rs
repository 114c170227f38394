pub mod config;
pub mod error;
pub mod language;
pub mod types;

pub use config::ParlaConfig;
pub use error::{ParlaError, Result};
pub use language::{
    resolve, voice_locale_for, voice_locale_for_selection, Language, LanguageError,
    LanguagePair, DEFAULT_VOICE_LOCALE, PAIR_SEPARATOR, SUPPORTED_LANGUAGES,
};
pub use types::*;
