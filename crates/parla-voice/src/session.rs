//! Voice capture session: one toggleable, single-shot listening interaction.
//!
//! The session is an owned state object. The UI calls [`VoiceCaptureSession::start`]
//! (a toggle) and [`VoiceCaptureSession::stop`], and feeds every event read from
//! the [`EventReceiver`] back through [`VoiceCaptureSession::handle_event`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use parla_core::language::voice_locale_for_selection;

use crate::engine::{
    CaptureEvent, CaptureSettings, EngineEvent, EngineFailure, EventReceiver, EventSink,
    SpeechEngine, SpeechPlatform,
};
use crate::error::VoiceError;
use crate::state::{StateMachine, VoiceStatus};

/// Data tracked for the capture in progress.
#[derive(Debug, Clone)]
pub struct CaptureInfo {
    /// Identifier carried by every event of this capture.
    pub id: Uuid,
    /// When listening started.
    pub started_at: DateTime<Utc>,
    /// Recognition locale in use.
    pub locale: &'static str,
}

impl CaptureInfo {
    fn new(locale: &'static str) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            locale,
        }
    }

    /// Returns the elapsed duration of this capture in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_milliseconds() as f32 / 1000.0
    }
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSession {
    pub status: VoiceStatus,
    pub locale: Option<&'static str>,
}

/// Result of pressing the voice toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Listening started with this locale.
    Started { locale: &'static str },
    /// The active capture was stopped.
    Stopped,
}

/// What an engine event meant for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Final transcript; the caller decides what to do with it.
    Transcript(String),
    /// The capture is over and the session is Idle.
    Ended,
    /// The capture failed and the session is Idle again.
    Failed(VoiceError),
    /// Event for a capture that is no longer current.
    Ignored,
}

/// Owns the capture lifecycle and the engine for the current capture.
pub struct VoiceCaptureSession {
    platform: Arc<dyn SpeechPlatform>,
    state: StateMachine,
    engine: Option<Box<dyn SpeechEngine>>,
    capture: Option<CaptureInfo>,
    events: mpsc::UnboundedSender<CaptureEvent>,
}

impl std::fmt::Debug for VoiceCaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceCaptureSession")
            .field("state", &self.state)
            .field("capture", &self.capture)
            .field("has_engine", &self.engine.is_some())
            .finish()
    }
}

impl VoiceCaptureSession {
    /// Create an Idle session and the receiver its engines report to.
    pub fn new(platform: Arc<dyn SpeechPlatform>) -> (Self, EventReceiver) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            platform,
            state: StateMachine::new(),
            engine: None,
            capture: None,
            events,
        };
        (session, rx)
    }

    pub fn status(&self) -> VoiceStatus {
        self.state.current()
    }

    /// Locale of the capture in progress.
    pub fn locale(&self) -> Option<&'static str> {
        self.capture.as_ref().map(|c| c.locale)
    }

    pub fn capture(&self) -> Option<&CaptureInfo> {
        self.capture.as_ref()
    }

    pub fn snapshot(&self) -> VoiceSession {
        VoiceSession {
            status: self.status(),
            locale: self.locale(),
        }
    }

    /// Toggle capture for the current `"source|target"` selection.
    ///
    /// From Idle this starts listening in the source language's locale. While
    /// a capture is active it stops it instead.
    pub fn start(&mut self, selection: &str) -> Result<Toggle, VoiceError> {
        if self.status().is_active() {
            self.stop();
            return Ok(Toggle::Stopped);
        }

        let mut engine = self.platform.create_engine().ok_or_else(|| {
            tracing::warn!("Speech capture requested but the platform has none");
            VoiceError::UnsupportedPlatform
        })?;

        let locale = voice_locale_for_selection(selection);
        let settings = CaptureSettings::single_shot(locale);
        let capture = CaptureInfo::new(locale);
        let sink = EventSink::new(capture.id, self.events.clone());

        engine
            .start(&settings, sink)
            .map_err(|failure| failure_to_error(&failure))?;
        self.state.transition(VoiceStatus::Listening)?;

        tracing::info!(capture_id = %capture.id, locale, "Voice capture started");
        self.engine = Some(engine);
        self.capture = Some(capture);
        Ok(Toggle::Started { locale })
    }

    /// Stop the active capture.
    ///
    /// Returns `false` without doing anything when the session is Idle.
    pub fn stop(&mut self) -> bool {
        if !self.status().is_active() {
            return false;
        }
        if let Some(mut engine) = self.engine.take() {
            engine.stop();
        }
        self.finish("Voice capture stopped");
        true
    }

    /// Apply an event posted by the engine.
    pub fn handle_event(&mut self, event: CaptureEvent) -> SessionUpdate {
        let current = self.capture.as_ref().map(|c| c.id);
        if current != Some(event.capture_id) {
            tracing::debug!(
                capture_id = %event.capture_id,
                "Ignoring event from a finished capture"
            );
            return SessionUpdate::Ignored;
        }

        match event.event {
            EngineEvent::Transcript(text) => {
                if self.state.transition(VoiceStatus::Stopped).is_err() {
                    tracing::debug!(status = %self.status(), "Extra transcript ignored");
                    return SessionUpdate::Ignored;
                }
                tracing::info!(chars = text.len(), "Voice transcript received");
                SessionUpdate::Transcript(text)
            }
            EngineEvent::Ended => {
                self.engine = None;
                self.finish("Voice capture ended");
                SessionUpdate::Ended
            }
            EngineEvent::Failed(failure) => {
                tracing::warn!(code = %failure.code, "Speech engine error");
                if let Err(e) = self.state.transition(VoiceStatus::Errored) {
                    tracing::debug!(error = %e, "Error event outside an active capture");
                }
                self.engine = None;
                self.finish("Voice capture aborted");
                SessionUpdate::Failed(failure_to_error(&failure))
            }
        }
    }

    fn finish(&mut self, message: &str) {
        if let Some(capture) = self.capture.take() {
            tracing::info!(
                capture_id = %capture.id,
                elapsed_secs = capture.elapsed_secs(),
                "{}",
                message
            );
        }
        if self.state.transition(VoiceStatus::Idle).is_err() {
            self.state.reset();
        }
    }
}

fn failure_to_error(failure: &EngineFailure) -> VoiceError {
    if failure.is_permission_denied() {
        VoiceError::PermissionDenied
    } else {
        VoiceError::Engine(failure.code.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MockSpeechPlatform, NoSpeechPlatform};

    fn mock_session() -> (VoiceCaptureSession, EventReceiver, MockSpeechPlatform) {
        let platform = MockSpeechPlatform::new();
        let (session, rx) = VoiceCaptureSession::new(Arc::new(platform.clone()));
        (session, rx, platform)
    }

    #[test]
    fn test_initial_state() {
        let (session, _rx, _platform) = mock_session();
        assert_eq!(
            session.snapshot(),
            VoiceSession {
                status: VoiceStatus::Idle,
                locale: None,
            }
        );
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let (mut session, _rx, platform) = mock_session();
        assert!(!session.stop());
        assert_eq!(session.status(), VoiceStatus::Idle);
        assert_eq!(platform.stop_count(), 0);
    }

    #[test]
    fn test_start_listens_with_selection_locale() {
        let (mut session, _rx, platform) = mock_session();

        let toggle = session.start("en|es").unwrap();

        assert_eq!(toggle, Toggle::Started { locale: "en-US" });
        assert_eq!(session.status(), VoiceStatus::Listening);
        assert_eq!(session.locale(), Some("en-US"));
        assert_eq!(
            platform.last_settings().unwrap(),
            CaptureSettings::single_shot("en-US")
        );
    }

    #[test]
    fn test_start_with_unknown_source_uses_default_locale() {
        let (mut session, _rx, _platform) = mock_session();
        session.start("it|en").unwrap();
        assert_eq!(session.locale(), Some("pt-BR"));
    }

    #[test]
    fn test_start_while_listening_toggles_off() {
        let (mut session, _rx, platform) = mock_session();
        session.start("de|en").unwrap();

        let toggle = session.start("de|en").unwrap();

        assert_eq!(toggle, Toggle::Stopped);
        assert_eq!(session.status(), VoiceStatus::Idle);
        assert_eq!(platform.start_count(), 1);
        assert_eq!(platform.stop_count(), 1);
    }

    #[test]
    fn test_unsupported_platform() {
        let (mut session, _rx) = VoiceCaptureSession::new(Arc::new(NoSpeechPlatform));
        assert_eq!(session.start("pt|en"), Err(VoiceError::UnsupportedPlatform));
        assert_eq!(session.status(), VoiceStatus::Idle);
    }

    #[test]
    fn test_engine_start_permission_denied() {
        let platform = MockSpeechPlatform::failing_with("not-allowed");
        let (mut session, _rx) = VoiceCaptureSession::new(Arc::new(platform));
        assert_eq!(session.start("pt|en"), Err(VoiceError::PermissionDenied));
        assert_eq!(session.status(), VoiceStatus::Idle);
        assert!(session.capture().is_none());
    }

    #[test]
    fn test_transcript_then_end() {
        let (mut session, mut rx, platform) = mock_session();
        session.start("fr|en").unwrap();

        let sink = platform.sink().unwrap();
        sink.transcript("Bonjour tout le monde");
        sink.ended();

        let update = session.handle_event(rx.try_recv().unwrap());
        assert_eq!(
            update,
            SessionUpdate::Transcript("Bonjour tout le monde".to_string())
        );
        assert_eq!(session.status(), VoiceStatus::Stopped);

        let update = session.handle_event(rx.try_recv().unwrap());
        assert_eq!(update, SessionUpdate::Ended);
        assert_eq!(session.status(), VoiceStatus::Idle);
        assert_eq!(session.locale(), None);
    }

    #[test]
    fn test_stop_while_stopped_finishes_capture() {
        let (mut session, mut rx, platform) = mock_session();
        session.start("pt|en").unwrap();
        platform.sink().unwrap().transcript("olá");
        session.handle_event(rx.try_recv().unwrap());
        assert_eq!(session.status(), VoiceStatus::Stopped);

        assert!(session.stop());
        assert_eq!(session.status(), VoiceStatus::Idle);
    }

    #[test]
    fn test_permission_denied_event() {
        let (mut session, mut rx, platform) = mock_session();
        session.start("pt|en").unwrap();
        platform.sink().unwrap().failed("not-allowed");

        let update = session.handle_event(rx.try_recv().unwrap());
        assert_eq!(update, SessionUpdate::Failed(VoiceError::PermissionDenied));
        assert_eq!(session.status(), VoiceStatus::Idle);
    }

    #[test]
    fn test_generic_engine_error_event() {
        let (mut session, mut rx, platform) = mock_session();
        session.start("es|pt").unwrap();
        platform.sink().unwrap().failed("no-speech");

        let update = session.handle_event(rx.try_recv().unwrap());
        assert_eq!(
            update,
            SessionUpdate::Failed(VoiceError::Engine("no-speech".to_string()))
        );
        assert_eq!(session.status(), VoiceStatus::Idle);
    }

    #[test]
    fn test_events_from_stopped_capture_are_ignored() {
        let (mut session, mut rx, platform) = mock_session();
        session.start("pt|en").unwrap();
        let old_sink = platform.sink().unwrap();
        session.stop();

        old_sink.ended();
        assert_eq!(
            session.handle_event(rx.try_recv().unwrap()),
            SessionUpdate::Ignored
        );

        // A late event from the first capture must not end the second one.
        session.start("pt|en").unwrap();
        old_sink.ended();
        assert_eq!(
            session.handle_event(rx.try_recv().unwrap()),
            SessionUpdate::Ignored
        );
        assert_eq!(session.status(), VoiceStatus::Listening);
    }

    #[test]
    fn test_second_transcript_is_ignored() {
        let (mut session, mut rx, platform) = mock_session();
        session.start("en|pt").unwrap();
        let sink = platform.sink().unwrap();
        sink.transcript("one");
        sink.transcript("two");

        session.handle_event(rx.try_recv().unwrap());
        assert_eq!(
            session.handle_event(rx.try_recv().unwrap()),
            SessionUpdate::Ignored
        );
    }

    #[test]
    fn test_full_cycle_then_restart() {
        let (mut session, mut rx, platform) = mock_session();
        session.start("en|es").unwrap();
        platform.sink().unwrap().ended();
        session.handle_event(rx.try_recv().unwrap());
        assert_eq!(session.status(), VoiceStatus::Idle);

        assert_eq!(
            session.start("de|fr").unwrap(),
            Toggle::Started { locale: "de-DE" }
        );
        assert_eq!(session.status(), VoiceStatus::Listening);
        assert_eq!(platform.start_count(), 2);
    }
}
