//! Microphone button styling.
//!
//! The button turns red and glows while a capture is active:
//! - Active: red background, red glow, slightly enlarged, red icon
//! - Idle: every inline style cleared
//!
//! An errored session shows as Idle; the session resets itself immediately.

use parla_voice::VoiceStatus;

/// Icon filter that recolours any icon to red.
const RED_ICON_FILTER: &str =
    "invert(16%) sepia(99%) saturate(4214%) hue-rotate(358deg) brightness(101%) contrast(106%)";

/// Visual state of the microphone control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicIndicator {
    Idle,
    Active,
}

/// Inline style values for the button and its icon. Empty means "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorStyle {
    pub background_color: &'static str,
    pub box_shadow: &'static str,
    pub transform: &'static str,
    pub icon_filter: &'static str,
}

impl MicIndicator {
    pub fn from_status(status: VoiceStatus) -> Self {
        if status.is_active() {
            MicIndicator::Active
        } else {
            MicIndicator::Idle
        }
    }

    pub fn style(&self) -> IndicatorStyle {
        match self {
            MicIndicator::Active => IndicatorStyle {
                background_color: "#ff4444",
                box_shadow: "0 0 15px #ff4444",
                transform: "scale(1.1)",
                icon_filter: RED_ICON_FILTER,
            },
            MicIndicator::Idle => IndicatorStyle {
                background_color: "",
                box_shadow: "",
                transform: "",
                icon_filter: "",
            },
        }
    }

    /// Short terminal label.
    pub fn label(&self) -> &'static str {
        match self {
            MicIndicator::Active => "[mic: ON]",
            MicIndicator::Idle => "[mic: off]",
        }
    }
}
