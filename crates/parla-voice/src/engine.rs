//! Speech-recognition capability seam.
//!
//! The session never talks to a concrete recogniser. A [`SpeechPlatform`] is
//! injected at construction; it either hands out a [`SpeechEngine`] or reports
//! that the platform has no speech capture at all. Engines report back
//! asynchronously through an [`EventSink`].

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Engine error code for a denied microphone permission.
pub const PERMISSION_DENIED_CODE: &str = "not-allowed";

// =============================================================================
// Settings and events
// =============================================================================

/// How the engine should listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Recognition locale, e.g. `"en-US"`.
    pub locale: String,
    /// Keep listening after the first utterance.
    pub continuous: bool,
    /// Emit partial transcripts while the user is still speaking.
    pub interim_results: bool,
    /// Number of alternative transcripts per result.
    pub max_alternatives: u32,
}

impl CaptureSettings {
    /// One utterance, final results only, best alternative only.
    pub fn single_shot(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            continuous: false,
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

/// A failure reported by the engine, identified by its error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFailure {
    pub code: String,
}

impl EngineFailure {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn is_permission_denied(&self) -> bool {
        self.code == PERMISSION_DENIED_CODE
    }
}

/// Something the engine observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The final transcript of the utterance.
    Transcript(String),
    /// The engine released the microphone.
    Ended,
    /// The engine gave up.
    Failed(EngineFailure),
}

/// An engine event tagged with the capture that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    pub capture_id: Uuid,
    pub event: EngineEvent,
}

/// Handle an engine uses to post events for one capture.
#[derive(Debug, Clone)]
pub struct EventSink {
    capture_id: Uuid,
    tx: mpsc::UnboundedSender<CaptureEvent>,
}

impl EventSink {
    pub(crate) fn new(capture_id: Uuid, tx: mpsc::UnboundedSender<CaptureEvent>) -> Self {
        Self { capture_id, tx }
    }

    pub fn capture_id(&self) -> Uuid {
        self.capture_id
    }

    pub fn transcript(&self, text: impl Into<String>) {
        self.send(EngineEvent::Transcript(text.into()));
    }

    pub fn ended(&self) {
        self.send(EngineEvent::Ended);
    }

    pub fn failed(&self, code: impl Into<String>) {
        self.send(EngineEvent::Failed(EngineFailure::new(code)));
    }

    fn send(&self, event: EngineEvent) {
        let event = CaptureEvent {
            capture_id: self.capture_id,
            event,
        };
        // The receiver only goes away when the application is shutting down.
        if self.tx.send(event).is_err() {
            tracing::debug!(capture_id = %self.capture_id, "Voice event dropped, receiver closed");
        }
    }
}

/// Receiving end of the engine event channel.
pub type EventReceiver = mpsc::UnboundedReceiver<CaptureEvent>;

// =============================================================================
// Traits
// =============================================================================

/// A speech recogniser bound to one capture at a time.
pub trait SpeechEngine: Send {
    /// Begin listening. Events for this capture go to `events`.
    fn start(&mut self, settings: &CaptureSettings, events: EventSink)
        -> Result<(), EngineFailure>;

    /// Stop listening. The engine may still post an `Ended` event.
    fn stop(&mut self);
}

/// Capability check: does this platform offer speech capture?
pub trait SpeechPlatform: Send + Sync {
    /// A fresh engine, or `None` when speech capture is unavailable.
    fn create_engine(&self) -> Option<Box<dyn SpeechEngine>>;
}

/// Platform without speech capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeechPlatform;

impl SpeechPlatform for NoSpeechPlatform {
    fn create_engine(&self) -> Option<Box<dyn SpeechEngine>> {
        None
    }
}

// =============================================================================
// Mock implementation
// =============================================================================

/// What a [`MockSpeechPlatform`] has been asked to do.
#[derive(Debug, Default)]
pub struct MockEngineLog {
    /// Settings passed to every `start` call.
    pub starts: Vec<CaptureSettings>,
    /// Number of `stop` calls.
    pub stops: usize,
    /// Sink of the most recent capture, for posting events from a test.
    pub sink: Option<EventSink>,
}

/// Mock speech platform that records calls instead of touching a microphone.
///
/// Every engine it creates shares one [`MockEngineLog`]. Tests drive the
/// capture by posting through [`MockSpeechPlatform::sink`].
#[derive(Debug, Clone, Default)]
pub struct MockSpeechPlatform {
    log: Arc<Mutex<MockEngineLog>>,
    start_failure: Option<EngineFailure>,
}

impl MockSpeechPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every engine start fails with `code`.
    pub fn failing_with(code: impl Into<String>) -> Self {
        Self {
            log: Arc::default(),
            start_failure: Some(EngineFailure::new(code)),
        }
    }

    pub fn start_count(&self) -> usize {
        self.log.lock().map(|log| log.starts.len()).unwrap_or(0)
    }

    pub fn stop_count(&self) -> usize {
        self.log.lock().map(|log| log.stops).unwrap_or(0)
    }

    pub fn last_settings(&self) -> Option<CaptureSettings> {
        self.log
            .lock()
            .ok()
            .and_then(|log| log.starts.last().cloned())
    }

    pub fn sink(&self) -> Option<EventSink> {
        self.log.lock().ok().and_then(|log| log.sink.clone())
    }
}

impl SpeechPlatform for MockSpeechPlatform {
    fn create_engine(&self) -> Option<Box<dyn SpeechEngine>> {
        Some(Box::new(MockSpeechEngine {
            log: Arc::clone(&self.log),
            start_failure: self.start_failure.clone(),
        }))
    }
}

struct MockSpeechEngine {
    log: Arc<Mutex<MockEngineLog>>,
    start_failure: Option<EngineFailure>,
}

impl SpeechEngine for MockSpeechEngine {
    fn start(
        &mut self,
        settings: &CaptureSettings,
        events: EventSink,
    ) -> Result<(), EngineFailure> {
        if let Ok(mut log) = self.log.lock() {
            log.starts.push(settings.clone());
            log.sink = Some(events);
        }
        match &self.start_failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    fn stop(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.stops += 1;
        }
    }
}
