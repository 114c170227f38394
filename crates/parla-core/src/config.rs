use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ParlaError, Result};

/// Top-level configuration for Parla.
///
/// Loaded from `~/.parla/config.toml` by default. The widget runs with no
/// file at all; every section falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParlaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl ParlaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParlaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "No configuration file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ParlaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Translation provider endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Endpoint of the primary provider (Google `translate_a/single`).
    pub primary_url: String,
    /// Client identifier sent to the primary provider.
    pub primary_client: String,
    /// Endpoint of the fallback provider (MyMemory `get`).
    pub fallback_url: String,
    /// Per-request timeout. `None` leaves it to the transport.
    pub request_timeout_secs: Option<u64>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            primary_url: "https://translate.googleapis.com/translate_a/single".to_string(),
            primary_client: "gtx".to_string(),
            fallback_url: "https://api.mymemory.translated.net/get".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Voice capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Delay between receiving a transcript and translating it.
    pub debounce_ms: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Selector value on startup.
    pub default_pair: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_pair: "pt|en".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParlaConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.translation.primary_client, "gtx");
        assert!(config.translation.primary_url.starts_with("https://"));
        assert!(config.translation.fallback_url.contains("mymemory"));
        assert_eq!(config.translation.request_timeout_secs, None);
        assert_eq!(config.voice.debounce_ms, 500);
        assert_eq!(config.ui.default_pair, "pt|en");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
            [voice]
            debounce_ms = 100

            [ui]
            default_pair = "en|es"
        "#;
        let config: ParlaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voice.debounce_ms, 100);
        assert_eq!(config.ui.default_pair, "en|es");
        assert_eq!(config.translation, TranslationConfig::default());
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ParlaConfig::default();
        config.translation.request_timeout_secs = Some(10);
        config.general.log_level = "debug".to_string();
        config.save(&path).unwrap();

        let loaded = ParlaConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = ParlaConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ParlaError::Io(_))));
    }

    #[test]
    fn test_load_or_default_on_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "voice = [[[").unwrap();
        assert_eq!(ParlaConfig::load_or_default(&path), ParlaConfig::default());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ParlaConfig::load_or_default(&dir.path().join("nope.toml"));
        assert_eq!(config, ParlaConfig::default());
    }
}
