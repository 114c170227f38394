//! The translator widget's view model and its event handlers.
//!
//! [`UiBinding`] holds what the widget shows and reacts to clicks, shortcuts
//! and voice events. It decides nothing about translation or capture itself;
//! that lives in the orchestrator and the voice session it owns.
//!
//! Translation is split into [`UiBinding::begin_translation`],
//! [`PendingTranslation::run`] and [`UiBinding::finish_translation`] so a
//! caller can keep handling input while a request is in flight. The async
//! helpers [`UiBinding::click_translate`] and [`UiBinding::on_engine_event`]
//! run the whole flow inline.

use std::time::Duration;

use parla_core::config::ParlaConfig;
use parla_core::language::SUPPORTED_LANGUAGES;
use parla_core::types::TranslationResult;
use parla_translate::{TranslateError, TranslationOrchestrator};
use parla_voice::{
    CaptureEvent, SessionUpdate, Toggle, VoiceCaptureSession, VoiceError, VoiceStatus,
};

use crate::indicator::MicIndicator;
use crate::notice::{Notice, EMPTY_INPUT_NOTICE};
use crate::sequencer::{RequestSequencer, Ticket};
use crate::shortcuts::{KeyChord, KeyScope, ShortcutMap, UiAction};

pub const TRANSLATING_MESSAGE: &str = "Translating, please wait...";
pub const INVALID_FORMAT_MESSAGE: &str = "Error: invalid language format";
pub const UNAVAILABLE_MESSAGE: &str = "Error: translation unavailable";
pub const LISTENING_MESSAGE: &str = "Listening... speak now!";
pub const LISTENING_PLACEHOLDER: &str = "Speak now...";
pub const DEFAULT_PLACEHOLDER: &str = "Type or speak the text to translate...";

/// Startup settings for the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub default_pair: String,
    pub debounce: Duration,
}

impl UiOptions {
    pub fn from_config(config: &ParlaConfig) -> Self {
        Self {
            default_pair: config.ui.default_pair.clone(),
            debounce: Duration::from_millis(config.voice.debounce_ms),
        }
    }
}

impl Default for UiOptions {
    fn default() -> Self {
        Self::from_config(&ParlaConfig::default())
    }
}

/// Snapshot of everything the widget renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub input: String,
    pub output: String,
    pub placeholder: &'static str,
    pub selection: String,
    pub input_focused: bool,
    pub indicator: MicIndicator,
}

/// A submitted translation that has not run yet.
#[derive(Debug)]
pub struct PendingTranslation {
    ticket: Ticket,
    text: String,
    selection: String,
    orchestrator: TranslationOrchestrator,
}

impl PendingTranslation {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// Perform the provider calls. Does not touch the view.
    pub async fn run(self) -> CompletedTranslation {
        let result = self.orchestrator.translate(&self.text, &self.selection).await;
        CompletedTranslation {
            ticket: self.ticket,
            result,
        }
    }
}

/// Outcome of a [`PendingTranslation`], waiting to be shown.
#[derive(Debug)]
pub struct CompletedTranslation {
    ticket: Ticket,
    result: Result<TranslationResult, TranslateError>,
}

impl CompletedTranslation {
    pub fn result(&self) -> &Result<TranslationResult, TranslateError> {
        &self.result
    }
}

/// All pair-selector values: every ordered pair of distinct supported codes.
pub fn pair_options() -> Vec<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .flat_map(|source| {
            SUPPORTED_LANGUAGES
                .iter()
                .filter(move |target| target.code != source.code)
                .map(move |target| format!("{}|{}", source.code, target.code))
        })
        .collect()
}

/// View model plus handlers for the translator widget.
#[derive(Debug)]
pub struct UiBinding {
    input: String,
    output: String,
    selection: String,
    input_focused: bool,
    orchestrator: TranslationOrchestrator,
    voice: VoiceCaptureSession,
    sequencer: RequestSequencer,
    shortcuts: ShortcutMap,
    debounce: Duration,
    notices: Vec<Notice>,
}

impl UiBinding {
    pub fn new(
        orchestrator: TranslationOrchestrator,
        voice: VoiceCaptureSession,
        options: UiOptions,
    ) -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            selection: options.default_pair,
            input_focused: false,
            orchestrator,
            voice,
            sequencer: RequestSequencer::new(),
            shortcuts: ShortcutMap,
            debounce: options.debounce,
            notices: Vec::new(),
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            input: self.input.clone(),
            output: self.output.clone(),
            placeholder: self.placeholder(),
            selection: self.selection.clone(),
            input_focused: self.input_focused,
            indicator: self.indicator(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn indicator(&self) -> MicIndicator {
        MicIndicator::from_status(self.voice.status())
    }

    pub fn placeholder(&self) -> &'static str {
        if self.voice.status().is_active() {
            LISTENING_PLACEHOLDER
        } else {
            DEFAULT_PLACEHOLDER
        }
    }

    pub fn voice_status(&self) -> VoiceStatus {
        self.voice.status()
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Replace the input text, as typing would.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Pick a selector entry. Values the selector does not offer are refused.
    pub fn select_pair(&mut self, selection: &str) -> bool {
        if !pair_options().iter().any(|option| option == selection) {
            tracing::debug!(selection, "Pair not offered by the selector");
            return false;
        }
        self.selection = selection.to_string();
        true
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Submit the current input and selection.
    ///
    /// Returns `None` when there is nothing to translate; a blocking notice is
    /// raised and the output is left as it was.
    pub fn begin_translation(&mut self) -> Option<PendingTranslation> {
        if self.input.trim().is_empty() {
            self.notices.push(Notice::Blocking(EMPTY_INPUT_NOTICE.to_string()));
            return None;
        }

        let ticket = self.sequencer.issue();
        self.output = TRANSLATING_MESSAGE.to_string();
        tracing::debug!(?ticket, selection = %self.selection, "Translation submitted");

        Some(PendingTranslation {
            ticket,
            text: self.input.clone(),
            selection: self.selection.clone(),
            orchestrator: self.orchestrator.clone(),
        })
    }

    /// Show a finished translation. Returns `false` when a newer submission
    /// has superseded it and nothing was written.
    pub fn finish_translation(&mut self, done: CompletedTranslation) -> bool {
        if !self.sequencer.is_current(done.ticket) {
            tracing::debug!(ticket = ?done.ticket, "Discarding superseded translation");
            return false;
        }

        match done.result {
            Ok(result) => {
                tracing::debug!(provider = %result.provider_used, "Translation shown");
                self.output = result.text;
            }
            Err(TranslateError::EmptyInput) => {
                self.notices.push(Notice::Blocking(EMPTY_INPUT_NOTICE.to_string()));
            }
            Err(TranslateError::InvalidFormat(_)) => {
                self.output = INVALID_FORMAT_MESSAGE.to_string();
            }
            Err(TranslateError::Unavailable) => {
                self.output = UNAVAILABLE_MESSAGE.to_string();
            }
        }
        true
    }

    /// Translate button: submit, wait for the providers, show the outcome.
    pub async fn click_translate(&mut self) {
        if let Some(pending) = self.begin_translation() {
            let done = pending.run().await;
            self.finish_translation(done);
        }
    }

    // =========================================================================
    // Voice
    // =========================================================================

    /// Microphone button: start listening, or stop if already listening.
    pub fn click_voice(&mut self) {
        match self.voice.start(&self.selection) {
            Ok(Toggle::Started { locale }) => {
                tracing::debug!(locale, "Listening");
                self.input.clear();
                self.output = LISTENING_MESSAGE.to_string();
            }
            Ok(Toggle::Stopped) => {}
            Err(e) => self.report_voice_error(e),
        }
    }

    /// Apply a voice event to the view.
    ///
    /// Returns the delay after which the caller should translate, when the
    /// event delivered a transcript.
    pub fn apply_engine_event(&mut self, event: CaptureEvent) -> Option<Duration> {
        match self.voice.handle_event(event) {
            SessionUpdate::Transcript(text) => {
                self.input = text;
                Some(self.debounce)
            }
            SessionUpdate::Failed(e) => {
                self.report_voice_error(e);
                None
            }
            SessionUpdate::Ended | SessionUpdate::Ignored => None,
        }
    }

    /// Apply a voice event; after a transcript, wait the debounce and
    /// translate whatever input and selection are current then.
    pub async fn on_engine_event(&mut self, event: CaptureEvent) {
        if let Some(delay) = self.apply_engine_event(event) {
            tokio::time::sleep(delay).await;
            self.click_translate().await;
        }
    }

    fn report_voice_error(&mut self, error: VoiceError) {
        let notice = Notice::for_voice_error(&error);
        if notice.is_blocking() {
            tracing::warn!(error = %error, "Voice capture unavailable");
        } else {
            tracing::error!(error = %error, "Voice capture failed");
        }
        self.notices.push(notice);
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Escape: clear both fields, focus the input, stop listening.
    pub fn clear_and_stop(&mut self) {
        self.input.clear();
        self.output.clear();
        self.input_focused = true;
        self.voice.stop();
    }

    /// Handle a key press. A submit shortcut returns the pending translation
    /// for the caller to run.
    pub fn handle_key(
        &mut self,
        chord: &KeyChord,
        scope: KeyScope,
    ) -> Option<PendingTranslation> {
        let action = self.shortcuts.resolve(chord, scope)?;
        tracing::debug!(%chord, ?action, "Shortcut");
        match action {
            UiAction::Translate => self.begin_translation(),
            UiAction::ClearAndStop => {
                self.clear_and_stop();
                None
            }
            UiAction::ToggleVoice => {
                self.click_voice();
                None
            }
        }
    }
}
