//! The key binding state machine.
//!
//! The state is either **idle** (empty current sequence) or **pending** (a
//! prefix of some binding has been typed). [`advance`] decides the next step
//! as a pure function of the current sequence, the candidate strokes and the
//! bindings; [`KeyboardDispatcher`](crate::KeyboardDispatcher) applies the
//! result to a [`KeyBindingState`].

use horizon_keys_core::logging::targets;
use horizon_keys_core::{KeySequence, KeyStroke};

use crate::assist::AssistTicket;
use crate::event::WindowId;
use crate::resolver::{BindingResolver, CommandId, SequenceMatch};

/// Outcome of feeding candidate strokes to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The extended sequence is a prefix of a binding; keep accumulating.
    Accept(KeySequence),
    /// The extended sequence is bound to `command`.
    Fire {
        sequence: KeySequence,
        command: CommandId,
        /// The state was idle before this stroke.
        was_idle: bool,
    },
    /// No candidate extends the sequence towards any binding.
    Reject,
}

/// Try each candidate in priority order against the bindings.
///
/// The first candidate that yields a partial or perfect match wins; a partial
/// match beats a perfect match for the same candidate.
pub fn advance(
    current: &KeySequence,
    candidates: &[KeyStroke],
    resolver: &dyn BindingResolver,
) -> Transition {
    for candidate in candidates {
        let next = current.append(*candidate);
        match resolver.resolve(&next) {
            SequenceMatch::PartialMatch => return Transition::Accept(next),
            SequenceMatch::PerfectMatch(command) => {
                return Transition::Fire {
                    sequence: next,
                    command,
                    was_idle: current.is_empty(),
                };
            }
            SequenceMatch::NoMatch => {}
        }
    }
    Transition::Reject
}

/// Mutable state of one dispatcher.
#[derive(Debug, Clone)]
pub struct KeyBindingState {
    current: KeySequence,
    associated_window: Option<WindowId>,
    collapse_fully: bool,
    /// `current` is a prefix kept by a non-collapsing reset.
    retained: bool,
    assist_ticket: Option<AssistTicket>,
}

impl KeyBindingState {
    /// An idle state bound to no window.
    pub fn new() -> Self {
        Self {
            current: KeySequence::empty(),
            associated_window: None,
            collapse_fully: true,
            retained: false,
            assist_ticket: None,
        }
    }

    /// The sequence typed so far.
    pub fn current_sequence(&self) -> &KeySequence {
        &self.current
    }

    /// Replace the sequence typed so far.
    pub fn set_current_sequence(&mut self, sequence: KeySequence) {
        tracing::trace!(target: targets::STATE, %sequence, "current sequence set");
        self.current = sequence;
        self.retained = false;
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_empty()
    }

    pub fn associated_window(&self) -> Option<WindowId> {
        self.associated_window
    }

    pub fn set_associated_window(&mut self, window: Option<WindowId>) {
        self.associated_window = window;
    }

    /// Whether the next reset clears the sequence entirely.
    pub fn collapse_fully(&self) -> bool {
        self.collapse_fully
    }

    pub fn set_collapse_fully(&mut self, collapse_fully: bool) {
        self.collapse_fully = collapse_fully;
    }

    /// Whether a reset now would not cut off a partially typed binding.
    ///
    /// True when idle, or when the current sequence is only a prefix kept by
    /// an earlier non-collapsing reset.
    pub fn is_safe_to_reset(&self) -> bool {
        self.current.is_empty() || self.retained
    }

    /// Start ticket of the pending assist timer.
    pub fn assist_ticket(&self) -> Option<AssistTicket> {
        self.assist_ticket
    }

    pub(crate) fn set_assist_ticket(&mut self, ticket: Option<AssistTicket>) {
        self.assist_ticket = ticket;
    }

    /// Reset the sequence.
    ///
    /// When collapsing fully, or when the sequence has a single stroke, the
    /// state goes idle. Otherwise the leading stroke is kept and `true` is
    /// returned. The assist ticket is always cleared.
    pub fn reset(&mut self) -> bool {
        self.assist_ticket = None;
        let keep = match self.current.first() {
            Some(first) if !self.collapse_fully && self.current.len() > 1 => Some(*first),
            _ => None,
        };
        match keep {
            Some(first) => {
                self.current = KeySequence::single(first);
                self.retained = true;
                tracing::debug!(target: targets::STATE, sequence = %self.current, "reset, prefix kept");
                true
            }
            None => {
                if !self.current.is_empty() {
                    tracing::debug!(target: targets::STATE, "reset to idle");
                }
                self.current = KeySequence::empty();
                self.retained = false;
                false
            }
        }
    }
}

impl Default for KeyBindingState {
    fn default() -> Self {
        Self::new()
    }
}
