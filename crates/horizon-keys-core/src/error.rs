//! Error types for Horizon Keys core.

use thiserror::Error;

/// Error produced when parsing key strokes or key sequences from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is empty.
    #[error("empty key sequence")]
    Empty,

    /// A stroke names only modifiers and no key.
    #[error("no key specified (only modifiers)")]
    NoKey,

    /// A stroke between separators is empty, e.g. `"Ctrl+K,,X"`.
    #[error("empty key stroke")]
    EmptyStroke,

    /// The key name is not recognised.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// A stroke names more than one non-modifier key, e.g. `"A+B"`.
    #[error("unexpected key '{0}' after the stroke's key")]
    UnknownModifier(String),
}

/// Timer-specific errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid or has already fired or been stopped.
    #[error("invalid timer ID")]
    InvalidTimerId,
}
