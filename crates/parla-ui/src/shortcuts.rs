//! Keyboard shortcuts for the widget.
//!
//! - `Ctrl+Enter` / `Cmd+Enter` in the input: translate
//! - `Escape` anywhere: clear both text areas, focus the input, stop listening
//! - `Alt+M` anywhere: toggle voice capture

use std::fmt;
use std::str::FromStr;

/// A key without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            meta: false,
            shift: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }

    pub fn alt(key: Key) -> Self {
        Self {
            alt: true,
            ..Self::plain(key)
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, name) in [
            (self.ctrl, "Ctrl+"),
            (self.meta, "Cmd+"),
            (self.alt, "Alt+"),
            (self.shift, "Shift+"),
        ] {
            if on {
                f.write_str(name)?;
            }
        }
        match self.key {
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Error parsing a chord such as `"Ctrl+Enter"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordParseError(pub String);

impl fmt::Display for ChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised key chord '{}'", self.0)
    }
}

impl std::error::Error for ChordParseError {}

impl FromStr for KeyChord {
    type Err = ChordParseError;

    /// Parse `Mod+Mod+Key`. Modifier names are case-insensitive; a single
    /// character key is taken as typed, so `Alt+M` and `Alt+m` differ.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ChordParseError(s.to_string());
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_name = parts.pop().filter(|k| !k.is_empty()).ok_or_else(err)?;

        let key = match key_name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            _ => {
                let mut chars = key_name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(err()),
                }
            }
        };

        let mut chord = KeyChord::plain(key);
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "alt" | "option" => chord.alt = true,
                "cmd" | "meta" | "super" => chord.meta = true,
                "shift" => chord.shift = true,
                _ => return Err(err()),
            }
        }
        Ok(chord)
    }
}

/// Where the key press happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    /// The source text input has focus.
    Input,
    /// Anywhere else on the page.
    Document,
}

/// What a shortcut asks the widget to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Translate,
    ClearAndStop,
    ToggleVoice,
}

/// Fixed shortcut table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutMap;

impl ShortcutMap {
    pub fn resolve(&self, chord: &KeyChord, scope: KeyScope) -> Option<UiAction> {
        match chord.key {
            Key::Enter if (chord.ctrl || chord.meta) && scope == KeyScope::Input => {
                Some(UiAction::Translate)
            }
            Key::Escape => Some(UiAction::ClearAndStop),
            Key::Char('m') if chord.alt => Some(UiAction::ToggleVoice),
            _ => None,
        }
    }

    /// Human-readable list for help output.
    pub fn describe(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("Alt+M", "toggle microphone"),
            ("Ctrl+Enter", "translate text"),
            ("Escape", "clear fields and stop microphone"),
        ]
    }
}
