//! The binding resolution oracle.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use horizon_keys_core::KeySequence;
use serde::{Deserialize, Serialize};

/// Identifier of a command, such as `"edit.toggle-comment"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommandId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CommandId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for CommandId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the oracle knows about a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// The command has a definition.
    pub is_defined: bool,
    /// The command is active in the current context.
    pub is_active: bool,
    /// Human-readable name.
    pub name: String,
}

/// Result of resolving a key sequence against the bindings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceMatch {
    /// Nothing is bound to the sequence or anything it starts.
    NoMatch,
    /// The sequence is a strict prefix of an active binding.
    PartialMatch,
    /// The sequence is bound to exactly one active command.
    PerfectMatch(CommandId),
}

impl SequenceMatch {
    /// Check if this is a partial match.
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartialMatch)
    }

    /// Check if there was any match (perfect or partial).
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// Answers key-binding queries for the dispatcher.
///
/// A sequence can be both a partial and a perfect match (`Ctrl+K` bound on its
/// own and as the start of `Ctrl+K, Ctrl+C`). The dispatcher checks for a
/// partial match first.
pub trait BindingResolver {
    /// Is `sequence` a strict prefix of some active binding?
    fn is_partial_match(&self, sequence: &KeySequence) -> bool;

    /// Is `sequence` bound to exactly one active command?
    fn is_perfect_match(&self, sequence: &KeySequence) -> bool;

    /// The command `sequence` is bound to, when it is a perfect match.
    fn perfect_match(&self, sequence: &KeySequence) -> Option<CommandId>;

    /// Every binding that has `sequence` as a strict prefix, whether or not
    /// its command is active.
    fn partial_matches(&self, sequence: &KeySequence) -> BTreeMap<KeySequence, CommandId>;

    /// Look up a command.
    fn command(&self, id: &CommandId) -> Option<CommandInfo>;

    /// Resolve `sequence`, preferring a partial match over a perfect one.
    fn resolve(&self, sequence: &KeySequence) -> SequenceMatch {
        if self.is_partial_match(sequence) {
            return SequenceMatch::PartialMatch;
        }
        if self.is_perfect_match(sequence) {
            if let Some(id) = self.perfect_match(sequence) {
                return SequenceMatch::PerfectMatch(id);
            }
        }
        SequenceMatch::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_keys_core::{Key, KeyStroke};

    struct Fixed {
        prefix: KeySequence,
        full: KeySequence,
    }

    impl BindingResolver for Fixed {
        fn is_partial_match(&self, sequence: &KeySequence) -> bool {
            *sequence == self.prefix
        }

        fn is_perfect_match(&self, sequence: &KeySequence) -> bool {
            *sequence == self.full || *sequence == self.prefix
        }

        fn perfect_match(&self, sequence: &KeySequence) -> Option<CommandId> {
            self.is_perfect_match(sequence).then(|| CommandId::from("cmd"))
        }

        fn partial_matches(&self, _sequence: &KeySequence) -> BTreeMap<KeySequence, CommandId> {
            BTreeMap::new()
        }

        fn command(&self, _id: &CommandId) -> Option<CommandInfo> {
            None
        }
    }

    #[test]
    fn test_resolve_prefers_partial() {
        let prefix = KeySequence::single(KeyStroke::ctrl(Key::K));
        let full = prefix.append(KeyStroke::ctrl(Key::C));
        let resolver = Fixed {
            prefix: prefix.clone(),
            full: full.clone(),
        };

        assert_eq!(resolver.resolve(&prefix), SequenceMatch::PartialMatch);
        assert_eq!(
            resolver.resolve(&full),
            SequenceMatch::PerfectMatch(CommandId::from("cmd"))
        );
        assert_eq!(
            resolver.resolve(&KeySequence::single(KeyStroke::key_only(Key::Q))),
            SequenceMatch::NoMatch
        );
    }

    #[test]
    fn test_command_id_display() {
        let id = CommandId::new("edit.copy");
        assert_eq!(id.to_string(), "edit.copy");
        assert_eq!(id.as_str(), "edit.copy");
    }
}
