//! User-facing notices raised by the widget.

use std::fmt;

use parla_voice::VoiceError;

/// Shown when a translation is requested with no text.
pub const EMPTY_INPUT_NOTICE: &str = "Please type or speak some text to translate.";
/// Shown when the platform has no speech capture.
pub const UNSUPPORTED_PLATFORM_NOTICE: &str =
    "Speech recognition is not supported on this platform.";
/// Shown when the microphone permission was refused.
pub const PERMISSION_DENIED_NOTICE: &str =
    "Microphone access was denied. Allow microphone access to use voice input.";

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Must be acknowledged, like a modal alert.
    Blocking(String),
    /// Diagnostic only.
    Console(String),
}

impl Notice {
    pub fn is_blocking(&self) -> bool {
        matches!(self, Notice::Blocking(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Blocking(m) | Notice::Console(m) => m,
        }
    }

    /// Notice for a voice failure. Only failures the user can act on block.
    pub fn for_voice_error(error: &VoiceError) -> Self {
        match error {
            VoiceError::UnsupportedPlatform => {
                Notice::Blocking(UNSUPPORTED_PLATFORM_NOTICE.to_string())
            }
            VoiceError::PermissionDenied => Notice::Blocking(PERMISSION_DENIED_NOTICE.to_string()),
            other => Notice::Console(format!("Speech recognition error: {}", other)),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
