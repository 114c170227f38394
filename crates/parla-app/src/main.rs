//! Parla application binary - composition root.
//!
//! 1. Parse arguments and load configuration from TOML
//! 2. Initialise tracing
//! 3. Build the translation orchestrator (primary + fallback provider)
//! 4. Run a one-shot command, or the interactive widget session

mod cli;
mod repl;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parla_core::config::ParlaConfig;
use parla_core::language::SUPPORTED_LANGUAGES;
use parla_core::types::TranslationResult;
use parla_translate::TranslationOrchestrator;
use parla_ui::{UiBinding, UiOptions};
use parla_voice::{NoSpeechPlatform, VoiceCaptureSession};

use cli::{CliArgs, Command};

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_languages() {
    println!("{:<6} {:<12} {}", "CODE", "LANGUAGE", "VOICE LOCALE");
    for language in SUPPORTED_LANGUAGES {
        println!(
            "{:<6} {:<12} {}",
            language.code, language.name, language.voice_locale
        );
    }
}

/// Translated text, then the provider that produced it.
fn write_translation<W: Write>(out: &mut W, result: &TranslationResult) -> std::io::Result<()> {
    writeln!(out, "{}", result.text)?;
    writeln!(out, "(provider: {})", result.provider_used)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config = ParlaConfig::load_or_default(&config_file);
    init_tracing(&args.resolve_log_filter(&config.general.log_level));

    tracing::info!("Starting Parla v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let orchestrator = TranslationOrchestrator::from_config(&config.translation)?;

    match args.command {
        Some(Command::Languages) => print_languages(),
        Some(Command::Translate { pair, text }) => {
            let selection = pair.unwrap_or_else(|| config.ui.default_pair.clone());
            let result = orchestrator.translate(&text.join(" "), &selection).await?;
            tracing::info!(provider = %result.provider_used, "Translated");
            write_translation(&mut std::io::stdout(), &result)?;
        }
        None => {
            // No speech recogniser is wired for the terminal.
            let (voice, voice_events) = VoiceCaptureSession::new(Arc::new(NoSpeechPlatform));
            let ui = UiBinding::new(orchestrator, voice, UiOptions::from_config(&config));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            repl::run(ui, voice_events, false, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use parla_core::types::ProviderKind;

    use super::*;

    fn render(result: &TranslationResult) -> String {
        let mut out = Vec::new();
        write_translation(&mut out, result).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_translation_output_names_primary() {
        let result = TranslationResult {
            text: "Hola".to_string(),
            provider_used: ProviderKind::Primary,
        };
        assert_eq!(render(&result), "Hola\n(provider: primary)\n");
    }

    #[test]
    fn test_translation_output_names_fallback() {
        let result = TranslationResult {
            text: "Bonjour".to_string(),
            provider_used: ProviderKind::Fallback,
        };
        let out = render(&result);
        assert!(out.starts_with("Bonjour\n"));
        assert!(out.contains("fallback"));
    }
}
