//! CLI argument definitions for the Parla application.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parla - a small text and voice translator.
#[derive(Parser, Debug)]
#[command(name = "parla", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Translate text once and print the result.
    Translate {
        /// Language pair as "source|target", e.g. "en|es".
        #[arg(short = 'p', long = "pair")]
        pair: Option<String>,

        /// Text to translate.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List supported languages and their voice locales.
    Languages,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PARLA_CONFIG env var > ~/.parla/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("PARLA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the tracing filter.
    ///
    /// Priority: --log-level flag > RUST_LOG env var > config file value.
    pub fn resolve_log_filter(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Ok(filter) = std::env::var("RUST_LOG") {
            if !filter.trim().is_empty() {
                return filter;
            }
        }
        config_level.to_string()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".parla").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".parla").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_interactive() {
        let args = CliArgs::try_parse_from(["parla"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_translate_subcommand() {
        let args =
            CliArgs::try_parse_from(["parla", "translate", "--pair", "en|es", "good", "morning"])
                .unwrap();
        assert_eq!(
            args.command,
            Some(Command::Translate {
                pair: Some("en|es".to_string()),
                text: vec!["good".to_string(), "morning".to_string()],
            })
        );
    }

    #[test]
    fn test_translate_requires_text() {
        assert!(CliArgs::try_parse_from(["parla", "translate", "--pair", "en|es"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "parla",
            "languages",
            "--config",
            "/tmp/p.toml",
            "-l",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.command, Some(Command::Languages));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/p.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_config_flag_wins() {
        let args = CliArgs::try_parse_from(["parla", "-c", "custom.toml"]).unwrap();
        assert_eq!(args.resolve_config_path(), PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_log_level_flag_wins() {
        let args = CliArgs::try_parse_from(["parla", "--log-level", "trace"]).unwrap();
        assert_eq!(args.resolve_log_filter("warn"), "trace");
    }

    #[test]
    fn test_default_config_path_file_name() {
        let path = default_config_path();
        assert!(path.ends_with("config.toml"));
    }
}
