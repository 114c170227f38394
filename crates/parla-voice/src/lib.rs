//! Parla voice crate - voice capture session and its state machine.
//!
//! A capture moves through Idle -> Listening -> Stopped -> Idle, or through
//! Errored back to Idle when the engine fails. The speech engine itself is an
//! injected capability so the session runs unchanged against a real
//! recogniser, a platform without one, or a mock in tests.

pub mod engine;
pub mod error;
pub mod session;
pub mod state;

pub use engine::{
    CaptureEvent, CaptureSettings, EngineEvent, EngineFailure, EventReceiver, EventSink,
    MockSpeechPlatform, NoSpeechPlatform, SpeechEngine, SpeechPlatform,
};
pub use error::VoiceError;
pub use session::{CaptureInfo, SessionUpdate, Toggle, VoiceCaptureSession, VoiceSession};
pub use state::{StateMachine, VoiceStatus};
