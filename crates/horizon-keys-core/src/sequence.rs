//! Key strokes and key sequences.
//!
//! - [`KeyStroke`]: one chord of modifiers plus an optional natural key
//! - [`KeySequence`]: an ordered list of strokes such as "Ctrl+K, Ctrl+C"
//!
//! Both are immutable values. Appending to a sequence builds a new one:
//!
//! ```
//! use horizon_keys_core::{Key, KeyStroke, KeySequence, KeyboardModifiers};
//!
//! let prefix: KeySequence = "Ctrl+K".parse().unwrap();
//! let full = prefix.append(KeyStroke::new(KeyboardModifiers::CTRL, Key::C));
//!
//! assert_eq!(prefix.len(), 1);
//! assert_eq!(full.to_string(), "Ctrl+K, Ctrl+C");
//! assert!(prefix.is_strict_prefix_of(&full));
//! ```
//!
//! # String Format
//!
//! Strokes separate modifiers and the key with `+`; sequences separate strokes
//! with `,`. Modifier names are case-insensitive (`Ctrl`, `Alt`, `Shift`,
//! `Meta`, plus aliases such as `Cmd` and `Option`). The `+` and `,` keys are
//! written `Plus` and `Comma`.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::key::Key;
use crate::modifiers::{KeyboardModifiers, ModifierKey, ModifierOrder};

// =============================================================================
// Key Stroke (Modifiers + Natural Key)
// =============================================================================

/// A single key stroke: the modifiers held plus the natural key pressed.
///
/// A stroke without a natural key is a pure modifier chord. Normalization can
/// produce one as an intermediate candidate, but it never parses from text
/// and never terminates a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyStroke {
    /// The modifier keys held.
    pub modifiers: KeyboardModifiers,
    /// The natural key, if any.
    pub key: Option<Key>,
}

impl KeyStroke {
    /// Create a stroke from modifiers and a natural key.
    pub fn new(modifiers: KeyboardModifiers, key: Key) -> Self {
        Self {
            modifiers,
            key: Some(key),
        }
    }

    /// Create a stroke with no modifiers.
    pub fn key_only(key: Key) -> Self {
        Self::new(KeyboardModifiers::NONE, key)
    }

    /// Create a Ctrl+key stroke.
    pub fn ctrl(key: Key) -> Self {
        Self::new(KeyboardModifiers::CTRL, key)
    }

    /// Create a stroke with modifiers and no natural key.
    pub fn modifiers_only(modifiers: KeyboardModifiers) -> Self {
        Self {
            modifiers,
            key: None,
        }
    }

    /// Check whether this stroke carries a natural key.
    pub fn has_natural_key(&self) -> bool {
        self.key.is_some()
    }

    /// Format with the given platform's modifier order and labels.
    pub fn format_with(&self, order: ModifierOrder) -> String {
        let mut parts: Vec<String> = order
            .sorted(self.modifiers)
            .into_iter()
            .map(|m| order.label(m).to_string())
            .collect();
        if let Some(key) = self.key {
            parts.push(key.to_string());
        }
        parts.join("+")
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(ModifierOrder::Standard))
    }
}

impl FromStr for KeyStroke {
    type Err = ParseError;

    /// Parse a stroke such as `"Ctrl+Shift+T"`, `"F5"` or `"Ctrl++"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::EmptyStroke);
        }

        // A trailing "+" after a separator is the plus key itself.
        let (body, plus_key) = match s.strip_suffix("++") {
            Some(rest) => (rest, true),
            None if s == "+" => ("", true),
            None => (s, false),
        };

        let mut modifiers = KeyboardModifiers::NONE;
        let mut key: Option<Key> = plus_key.then_some(Key::Char('+'));

        for part in body.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some(modifier) = ModifierKey::from_name(part) {
                modifiers = modifiers.with(modifier);
                continue;
            }
            if key.is_some() {
                return Err(ParseError::UnknownModifier(part.to_string()));
            }
            key = Some(part.parse()?);
        }

        match key {
            Some(k) => Ok(KeyStroke::new(modifiers, k)),
            None => Err(ParseError::NoKey),
        }
    }
}

// =============================================================================
// Key Sequence
// =============================================================================

/// An ordered, immutable list of key strokes.
///
/// The empty sequence is the idle state of the binding state machine.
/// Equality and ordering compare the stroke lists element-wise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySequence {
    strokes: Vec<KeyStroke>,
}

impl KeySequence {
    /// The empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A sequence holding one stroke.
    pub fn single(stroke: KeyStroke) -> Self {
        Self {
            strokes: vec![stroke],
        }
    }

    /// A sequence holding the given strokes in order.
    pub fn from_strokes(strokes: impl IntoIterator<Item = KeyStroke>) -> Self {
        Self {
            strokes: strokes.into_iter().collect(),
        }
    }

    /// A new sequence with `stroke` appended. `self` is left unchanged.
    #[must_use]
    pub fn append(&self, stroke: KeyStroke) -> Self {
        let mut strokes = Vec::with_capacity(self.strokes.len() + 1);
        strokes.extend_from_slice(&self.strokes);
        strokes.push(stroke);
        Self { strokes }
    }

    /// Get the strokes in this sequence.
    pub fn strokes(&self) -> &[KeyStroke] {
        &self.strokes
    }

    /// Get the first stroke, if any.
    pub fn first(&self) -> Option<&KeyStroke> {
        self.strokes.first()
    }

    /// Number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Check if this sequence has no strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Check whether every stroke carries a natural key.
    ///
    /// Only complete sequences can be bound to commands.
    pub fn is_complete(&self) -> bool {
        self.strokes.iter().all(KeyStroke::has_natural_key)
    }

    /// Check whether `self` starts with all of `prefix`.
    pub fn starts_with(&self, prefix: &KeySequence) -> bool {
        self.strokes.starts_with(&prefix.strokes)
    }

    /// Check whether `self` is a proper prefix of `other`.
    pub fn is_strict_prefix_of(&self, other: &KeySequence) -> bool {
        self.len() < other.len() && other.starts_with(self)
    }

    /// Format with the given platform's modifier order and labels.
    pub fn format_with(&self, order: ModifierOrder) -> String {
        self.strokes
            .iter()
            .map(|s| s.format_with(order))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<KeyStroke> for KeySequence {
    fn from(stroke: KeyStroke) -> Self {
        Self::single(stroke)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(ModifierOrder::Standard))
    }
}

impl FromStr for KeySequence {
    type Err = ParseError;

    /// Parse a key sequence from a string.
    ///
    /// # Examples
    ///
    /// - `"Ctrl+S"` - Single stroke
    /// - `"Ctrl+K, Ctrl+C"` - Two-stroke sequence
    /// - `"Alt+X, Ctrl+S, Q"` - Three-stroke sequence
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let strokes = s
            .split(',')
            .map(KeyStroke::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(KeySequence { strokes })
    }
}
