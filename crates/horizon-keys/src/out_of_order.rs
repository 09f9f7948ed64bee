//! Keys that reach the focused widget before binding dispatch.
//!
//! Escape is the classic case: an inline editor uses it to cancel, and only
//! when no widget wants it should it reach the key bindings.

use std::collections::HashSet;

use horizon_keys_core::logging::targets;
use horizon_keys_core::{KeySequence, KeyStroke};

/// An immutable set of out-of-order key strokes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutOfOrderKeys {
    strokes: HashSet<KeyStroke>,
}

impl OutOfOrderKeys {
    /// The empty set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse the configured key list, written as a key sequence.
    ///
    /// Blank text means no out-of-order keys. Malformed text is logged once
    /// and also yields the empty set.
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::none();
        }
        match text.parse::<KeySequence>() {
            Ok(sequence) => sequence.strokes().iter().copied().collect(),
            Err(error) => {
                tracing::error!(
                    target: targets::OUT_OF_ORDER,
                    %error,
                    "could not parse out-of-order keys definition: '{text}'; \
                     continuing with no out-of-order keys"
                );
                Self::none()
            }
        }
    }

    /// Check if any candidate stroke is an out-of-order key.
    pub fn contains_any(&self, candidates: &[KeyStroke]) -> bool {
        candidates.iter().any(|stroke| self.strokes.contains(stroke))
    }

    pub fn contains(&self, stroke: &KeyStroke) -> bool {
        self.strokes.contains(stroke)
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }
}

impl FromIterator<KeyStroke> for OutOfOrderKeys {
    fn from_iter<I: IntoIterator<Item = KeyStroke>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}
