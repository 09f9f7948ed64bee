//! Keyboard key codes.
//!
//! [`Key`] is the natural-key half of a [`KeyStroke`](crate::KeyStroke). It
//! covers the physical keys of a typical keyboard plus [`Key::Char`] for
//! characters a layout can produce that have no dedicated key code (`!`, `@`,
//! `+`, accented letters and so on).
//!
//! Keys built from characters go through [`Key::from_char`], which maps every
//! character with a dedicated code to that code and upper-cases the rest, so
//! that `Key::from_char('a') == Key::A` and equality stays structural.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::modifiers::ModifierKey;

/// Keyboard key codes.
///
/// This enum represents the physical/logical keys on a keyboard.
/// It follows a similar structure to web KeyboardEvent.code values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab,

    // Whitespace
    Space,

    // Modifiers (also tracked via KeyboardModifiers, but delivered as key events)
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,

    // Punctuation and symbols
    Minus, Equal,
    BracketLeft, BracketRight, Backslash,
    Semicolon, Quote,
    Comma, Period, Slash,
    Grave,

    // Control
    Escape,
    CapsLock, NumLock, ScrollLock,
    PrintScreen, Pause,

    // Numpad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter,

    // Media keys
    MediaPlayPause, MediaStop, MediaNext, MediaPrevious,
    AudioVolumeUp, AudioVolumeDown, AudioVolumeMute,

    /// A producible character without a dedicated key code. Always upper-case
    /// when built through [`Key::from_char`].
    Char(char),

    /// Unknown/unmapped hardware key.
    Unknown(u16),
}

#[rustfmt::skip]
const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

#[rustfmt::skip]
const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

#[rustfmt::skip]
const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

impl Key {
    /// Build the canonical key for a character.
    ///
    /// Letters map to `A`..`Z` regardless of case, digits to `Digit0`..`Digit9`,
    /// and the control characters produced by Enter, Tab, Escape, Backspace and
    /// Delete map to those keys. Anything else becomes an upper-cased
    /// [`Key::Char`].
    pub fn from_char(c: char) -> Self {
        match c {
            'a'..='z' => LETTERS[(c as u8 - b'a') as usize],
            'A'..='Z' => LETTERS[(c as u8 - b'A') as usize],
            '0'..='9' => DIGITS[(c as u8 - b'0') as usize],
            ' ' => Key::Space,
            '\r' | '\n' => Key::Enter,
            '\t' => Key::Tab,
            '\u{1b}' => Key::Escape,
            '\u{8}' => Key::Backspace,
            '\u{7f}' => Key::Delete,
            '-' => Key::Minus,
            '=' => Key::Equal,
            '[' => Key::BracketLeft,
            ']' => Key::BracketRight,
            '\\' => Key::Backslash,
            ';' => Key::Semicolon,
            '\'' => Key::Quote,
            ',' => Key::Comma,
            '.' => Key::Period,
            '/' => Key::Slash,
            '`' => Key::Grave,
            other => {
                let mut upper = other.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) => Key::Char(u),
                    _ => Key::Char(other),
                }
            }
        }
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        self.modifier_key().is_some()
    }

    /// The modifier this key applies when held, if it is a modifier key.
    pub fn modifier_key(&self) -> Option<ModifierKey> {
        match self {
            Key::ShiftLeft | Key::ShiftRight => Some(ModifierKey::Shift),
            Key::ControlLeft | Key::ControlRight => Some(ModifierKey::Control),
            Key::AltLeft | Key::AltRight => Some(ModifierKey::Alt),
            Key::MetaLeft | Key::MetaRight => Some(ModifierKey::Meta),
            _ => None,
        }
    }

    /// Check if this is a letter key.
    pub fn is_letter(&self) -> bool {
        LETTERS.contains(self)
    }

    /// Check if this is a digit key (main keyboard, not numpad).
    pub fn is_digit(&self) -> bool {
        DIGITS.contains(self)
    }

    /// Check if this is a function key.
    pub fn is_function_key(&self) -> bool {
        FUNCTION_KEYS.contains(self)
    }

    fn name(&self) -> Option<&'static str> {
        let name = match self {
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::ArrowUp => "Up",
            Key::ArrowDown => "Down",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Insert => "Insert",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::ShiftLeft => "ShiftLeft",
            Key::ShiftRight => "ShiftRight",
            Key::ControlLeft => "ControlLeft",
            Key::ControlRight => "ControlRight",
            Key::AltLeft => "AltLeft",
            Key::AltRight => "AltRight",
            Key::MetaLeft => "MetaLeft",
            Key::MetaRight => "MetaRight",
            Key::Minus => "-",
            Key::Equal => "=",
            Key::BracketLeft => "[",
            Key::BracketRight => "]",
            Key::Backslash => "\\",
            Key::Semicolon => ";",
            Key::Quote => "'",
            Key::Comma => "Comma",
            Key::Period => ".",
            Key::Slash => "/",
            Key::Grave => "`",
            Key::Escape => "Escape",
            Key::CapsLock => "CapsLock",
            Key::NumLock => "NumLock",
            Key::ScrollLock => "ScrollLock",
            Key::PrintScreen => "PrintScreen",
            Key::Pause => "Pause",
            Key::Numpad0 => "Numpad0",
            Key::Numpad1 => "Numpad1",
            Key::Numpad2 => "Numpad2",
            Key::Numpad3 => "Numpad3",
            Key::Numpad4 => "Numpad4",
            Key::Numpad5 => "Numpad5",
            Key::Numpad6 => "Numpad6",
            Key::Numpad7 => "Numpad7",
            Key::Numpad8 => "Numpad8",
            Key::Numpad9 => "Numpad9",
            Key::NumpadAdd => "NumpadAdd",
            Key::NumpadSubtract => "NumpadSubtract",
            Key::NumpadMultiply => "NumpadMultiply",
            Key::NumpadDivide => "NumpadDivide",
            Key::NumpadDecimal => "NumpadDecimal",
            Key::NumpadEnter => "NumpadEnter",
            Key::MediaPlayPause => "MediaPlayPause",
            Key::MediaStop => "MediaStop",
            Key::MediaNext => "MediaNext",
            Key::MediaPrevious => "MediaPrevious",
            Key::AudioVolumeUp => "VolumeUp",
            Key::AudioVolumeDown => "VolumeDown",
            Key::AudioVolumeMute => "VolumeMute",
            Key::Char('+') => "Plus",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        if let Some(i) = LETTERS.iter().position(|k| k == self) {
            return write!(f, "{}", (b'A' + i as u8) as char);
        }
        if let Some(i) = DIGITS.iter().position(|k| k == self) {
            return write!(f, "{i}");
        }
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Unknown(code) => write!(f, "Unknown({code})"),
            _ => f.write_str("Unknown"),
        }
    }
}

impl FromStr for Key {
    type Err = ParseError;

    /// Parse a key name such as `"K"`, `"F5"`, `"PageUp"` or `"Plus"`.
    ///
    /// Single characters go through [`Key::from_char`]; names are matched
    /// case-insensitively and accept the common aliases (`"Esc"`, `"Return"`,
    /// `"Del"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::from_char(c));
        }

        let lower = s.to_lowercase();
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
            return match n {
                1..=12 => Ok(FUNCTION_KEYS[n - 1]),
                _ => Err(ParseError::UnknownKey(s.to_string())),
            };
        }
        if let Some(n) = lower.strip_prefix("numpad").and_then(|n| n.parse::<usize>().ok()) {
            const NUMPAD: [Key; 10] = [
                Key::Numpad0,
                Key::Numpad1,
                Key::Numpad2,
                Key::Numpad3,
                Key::Numpad4,
                Key::Numpad5,
                Key::Numpad6,
                Key::Numpad7,
                Key::Numpad8,
                Key::Numpad9,
            ];
            return NUMPAD
                .get(n)
                .copied()
                .ok_or_else(|| ParseError::UnknownKey(s.to_string()));
        }

        let key = match lower.as_str() {
            // Navigation
            "up" | "arrowup" => Key::ArrowUp,
            "down" | "arrowdown" => Key::ArrowDown,
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdn" => Key::PageDown,

            // Editing
            "backspace" | "back" | "bs" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "insert" | "ins" => Key::Insert,
            "enter" | "return" | "cr" => Key::Enter,
            "tab" => Key::Tab,
            "space" | "spacebar" => Key::Space,
            "escape" | "esc" => Key::Escape,

            // Modifier keys as natural keys
            "shiftleft" => Key::ShiftLeft,
            "shiftright" => Key::ShiftRight,
            "controlleft" => Key::ControlLeft,
            "controlright" => Key::ControlRight,
            "altleft" => Key::AltLeft,
            "altright" => Key::AltRight,
            "metaleft" => Key::MetaLeft,
            "metaright" => Key::MetaRight,

            // Punctuation
            "minus" => Key::Minus,
            "equal" | "equals" => Key::Equal,
            "bracketleft" => Key::BracketLeft,
            "bracketright" => Key::BracketRight,
            "backslash" => Key::Backslash,
            "semicolon" => Key::Semicolon,
            "quote" => Key::Quote,
            "comma" => Key::Comma,
            "period" => Key::Period,
            "slash" => Key::Slash,
            "grave" => Key::Grave,
            "plus" => Key::Char('+'),

            // Control
            "capslock" => Key::CapsLock,
            "numlock" => Key::NumLock,
            "scrolllock" => Key::ScrollLock,
            "printscreen" | "print" => Key::PrintScreen,
            "pause" | "break" => Key::Pause,

            // Numpad operators
            "numpadadd" => Key::NumpadAdd,
            "numpadsubtract" => Key::NumpadSubtract,
            "numpadmultiply" => Key::NumpadMultiply,
            "numpaddivide" => Key::NumpadDivide,
            "numpaddecimal" => Key::NumpadDecimal,
            "numpadenter" => Key::NumpadEnter,

            // Media
            "mediaplaypause" => Key::MediaPlayPause,
            "mediastop" => Key::MediaStop,
            "medianext" => Key::MediaNext,
            "mediaprevious" => Key::MediaPrevious,
            "volumeup" => Key::AudioVolumeUp,
            "volumedown" => Key::AudioVolumeDown,
            "volumemute" => Key::AudioVolumeMute,

            _ => return Err(ParseError::UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}
