//! Voice capture state machine with validated transitions.
//!
//! Valid transitions:
//! - Idle -> Listening (capture started)
//! - Listening -> Stopped (final transcript received, engine winding down)
//! - Listening -> Idle, Stopped -> Idle (engine ended or manual stop)
//! - Listening -> Errored, Stopped -> Errored (engine failure)
//! - Errored -> Idle (recovery)

use std::fmt;

use crate::error::VoiceError;

/// Lifecycle status of a capture session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VoiceStatus {
    /// No capture in progress.
    #[default]
    Idle,
    /// The engine is listening to the microphone.
    Listening,
    /// A final transcript arrived; the engine has not reported its end yet.
    Stopped,
    /// The engine reported a failure.
    Errored,
}

impl fmt::Display for VoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceStatus::Idle => write!(f, "Idle"),
            VoiceStatus::Listening => write!(f, "Listening"),
            VoiceStatus::Stopped => write!(f, "Stopped"),
            VoiceStatus::Errored => write!(f, "Errored"),
        }
    }
}

impl VoiceStatus {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &VoiceStatus) -> bool {
        matches!(
            (self, target),
            (VoiceStatus::Idle, VoiceStatus::Listening)
                | (VoiceStatus::Listening, VoiceStatus::Stopped)
                | (VoiceStatus::Listening, VoiceStatus::Idle)
                | (VoiceStatus::Stopped, VoiceStatus::Idle)
                | (VoiceStatus::Listening, VoiceStatus::Errored)
                | (VoiceStatus::Stopped, VoiceStatus::Errored)
                | (VoiceStatus::Errored, VoiceStatus::Idle)
        )
    }

    /// Whether the engine may still be holding the microphone.
    pub fn is_active(&self) -> bool {
        matches!(self, VoiceStatus::Listening | VoiceStatus::Stopped)
    }
}

/// Owned state machine for voice capture.
///
/// Every transition is validated before it is applied.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    state: VoiceStatus,
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn current(&self) -> VoiceStatus {
        self.state
    }

    /// Attempt to transition to the target state.
    pub fn transition(&mut self, target: VoiceStatus) -> Result<(), VoiceError> {
        if self.state.can_transition_to(&target) {
            tracing::debug!("Voice state: {} -> {}", self.state, target);
            self.state = target;
            Ok(())
        } else {
            Err(VoiceError::InvalidTransition {
                from: self.state,
                to: target,
            })
        }
    }

    /// Force the state machine back to Idle.
    pub fn reset(&mut self) {
        if self.state != VoiceStatus::Idle {
            tracing::warn!("Voice state machine reset to Idle from {}", self.state);
        }
        self.state = VoiceStatus::Idle;
    }
}
