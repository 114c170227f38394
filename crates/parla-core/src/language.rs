//! Language pair selection and voice-locale resolution.
//!
//! A selection is the raw value of the pair selector, e.g. `"en|es"`. It is
//! split on a single separator into a [`LanguagePair`] on every translation
//! request; nothing here is cached.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between source and target codes in a selection string.
pub const PAIR_SEPARATOR: char = '|';

/// Capture locale used when the source code has no dedicated entry.
pub const DEFAULT_VOICE_LOCALE: &str = "pt-BR";

/// A language the selector offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Provider-facing code, e.g. `"en"`.
    pub code: &'static str,
    /// English display name.
    pub name: &'static str,
    /// Speech-capture locale tag, e.g. `"en-US"`.
    pub voice_locale: &'static str,
}

/// The fixed set of languages the widget supports.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language {
        code: "pt",
        name: "Portuguese",
        voice_locale: "pt-BR",
    },
    Language {
        code: "en",
        name: "English",
        voice_locale: "en-US",
    },
    Language {
        code: "es",
        name: "Spanish",
        voice_locale: "es-ES",
    },
    Language {
        code: "de",
        name: "German",
        voice_locale: "de-DE",
    },
    Language {
        code: "fr",
        name: "French",
        voice_locale: "fr-FR",
    },
];

/// Errors raised while interpreting a language selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("invalid language format: '{selection}' (expected 'source|target')")]
    InvalidFormat { selection: String },
}

/// Source and target codes handed to the translation providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    /// Returns whether both codes belong to [`SUPPORTED_LANGUAGES`].
    pub fn is_supported(&self) -> bool {
        lookup(&self.source).is_some() && lookup(&self.target).is_some()
    }

    /// The selection string this pair was parsed from.
    pub fn selection(&self) -> String {
        format!("{}{}{}", self.source, PAIR_SEPARATOR, self.target)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, PAIR_SEPARATOR, self.target)
    }
}

impl std::str::FromStr for LanguagePair {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Parse a `"source|target"` selection.
///
/// Fails unless the string splits into exactly two non-empty segments.
/// Segments are used verbatim.
pub fn resolve(selection: &str) -> Result<LanguagePair, LanguageError> {
    let mut parts = selection.split(PAIR_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(source), Some(target), None) if !source.is_empty() && !target.is_empty() => {
            Ok(LanguagePair {
                source: source.to_string(),
                target: target.to_string(),
            })
        }
        _ => Err(LanguageError::InvalidFormat {
            selection: selection.to_string(),
        }),
    }
}

/// Speech-capture locale for a source language code.
pub fn voice_locale_for(source_code: &str) -> &'static str {
    lookup(source_code)
        .map(|lang| lang.voice_locale)
        .unwrap_or(DEFAULT_VOICE_LOCALE)
}

/// Speech-capture locale for the source half of a selection.
///
/// An unparseable selection gets [`DEFAULT_VOICE_LOCALE`].
pub fn voice_locale_for_selection(selection: &str) -> &'static str {
    match resolve(selection) {
        Ok(pair) => voice_locale_for(&pair.source),
        Err(_) => DEFAULT_VOICE_LOCALE,
    }
}

fn lookup(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code == code)
}
