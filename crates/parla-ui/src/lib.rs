//! Parla UI crate - presentational binding for the translator widget.
//!
//! The widget is rendered by whatever front end hosts it; this crate keeps
//! the view model, maps clicks and shortcuts to actions, and styles the
//! microphone indicator.

pub mod binding;
pub mod indicator;
pub mod notice;
pub mod sequencer;
pub mod shortcuts;

pub use binding::{
    pair_options, CompletedTranslation, PendingTranslation, UiBinding, UiOptions, ViewState,
};
pub use indicator::{IndicatorStyle, MicIndicator};
pub use notice::Notice;
pub use sequencer::{RequestSequencer, Ticket};
pub use shortcuts::{ChordParseError, Key, KeyChord, KeyScope, ShortcutMap, UiAction};
