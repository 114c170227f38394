//! Error types for voice capture.

use parla_core::error::ParlaError;

use crate::state::VoiceStatus;

/// Errors from the voice capture session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoiceError {
    #[error("speech recognition is not supported on this platform")]
    UnsupportedPlatform,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("speech engine error: {0}")]
    Engine(String),
    #[error("invalid voice state transition: {from} -> {to}")]
    InvalidTransition { from: VoiceStatus, to: VoiceStatus },
}

impl VoiceError {
    /// Whether the user must be told with a blocking notice rather than a log line.
    pub fn needs_user_attention(&self) -> bool {
        matches!(
            self,
            VoiceError::UnsupportedPlatform | VoiceError::PermissionDenied
        )
    }
}

impl From<VoiceError> for ParlaError {
    fn from(err: VoiceError) -> Self {
        ParlaError::Voice(err.to_string())
    }
}
