//! Multi-stroke assist: the list of possible completions shown while a
//! sequence is pending.

use std::time::Instant;

use horizon_keys_core::KeySequence;

use crate::resolver::{BindingResolver, CommandId};

/// Text shown when no active binding can complete the pending sequence.
pub const NO_MATCHES_TEXT: &str = "No Matches Possible";

/// Identifies one entry into the pending state.
///
/// The toolkit hands the ticket back when the assist timer fires. A ticket
/// that no longer equals the state's current one is stale and ignored, so the
/// timer never needs to be cancelled for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssistTicket {
    started_at: Instant,
    generation: u64,
}

impl AssistTicket {
    pub(crate) fn new(started_at: Instant, generation: u64) -> Self {
        Self {
            started_at,
            generation,
        }
    }

    /// When the pending state was entered.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

/// One possible completion of the pending sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistEntry {
    /// The full bound sequence.
    pub sequence: KeySequence,
    pub command: CommandId,
    pub command_name: String,
}

impl AssistEntry {
    /// Display text: the sequence, three spaces, then the command name.
    pub fn text(&self) -> String {
        format!("{}   {}", self.sequence, self.command_name)
    }
}

/// What the assist display shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistContent {
    Completions(Vec<AssistEntry>),
    NoMatches,
}

impl AssistContent {
    /// The display lines, in order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AssistContent::Completions(entries) => entries.iter().map(AssistEntry::text).collect(),
            AssistContent::NoMatches => vec![NO_MATCHES_TEXT.to_string()],
        }
    }
}

/// Renders the transient assist list and the pending-sequence mode line.
pub trait AssistPresenter {
    /// Show the completion list.
    fn open(&mut self, content: AssistContent);

    /// Close and release the completion list.
    fn close(&mut self);

    /// Show the current sequence, e.g. in a status line. Called with the
    /// empty sequence when the state returns to idle.
    fn show_mode(&mut self, _sequence: &KeySequence) {}
}

/// A presenter that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPresenter;

impl AssistPresenter for NoopPresenter {
    fn open(&mut self, _content: AssistContent) {}

    fn close(&mut self) {}
}

/// Collect the completions of `prefix` whose commands are defined and active.
pub fn collect_completions(resolver: &dyn BindingResolver, prefix: &KeySequence) -> AssistContent {
    let entries: Vec<AssistEntry> = resolver
        .partial_matches(prefix)
        .into_iter()
        .filter_map(|(sequence, command)| {
            let info = resolver.command(&command)?;
            (info.is_defined && info.is_active).then(|| AssistEntry {
                sequence,
                command,
                command_name: info.name,
            })
        })
        .collect();

    if entries.is_empty() {
        AssistContent::NoMatches
    } else {
        AssistContent::Completions(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CommandRegistry;

    fn seq(text: &str) -> KeySequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_completions_skip_inactive_commands() {
        let registry = CommandRegistry::new();
        registry.define_command("comment", "Toggle Comment");
        registry.define_command("uncomment", "Remove Comment");
        registry.define_command("fold", "Fold");
        registry.bind(seq("Ctrl+K, Ctrl+C"), "comment");
        registry.bind(seq("Ctrl+K, Ctrl+U"), "uncomment");
        registry.bind(seq("Ctrl+K, Ctrl+0"), "fold");
        registry.set_active(&"fold".into(), false);

        let content = collect_completions(&registry, &seq("Ctrl+K"));
        assert_eq!(
            content.lines(),
            vec![
                "Ctrl+K, Ctrl+C   Toggle Comment".to_string(),
                "Ctrl+K, Ctrl+U   Remove Comment".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_matches() {
        let registry = CommandRegistry::new();
        registry.define_command("fold", "Fold");
        registry.bind(seq("Ctrl+K, Ctrl+0"), "fold");
        registry.set_active(&"fold".into(), false);

        let content = collect_completions(&registry, &seq("Ctrl+K"));
        assert_eq!(content, AssistContent::NoMatches);
        assert_eq!(content.lines(), vec![NO_MATCHES_TEXT.to_string()]);
    }

    #[test]
    fn test_ticket_identity() {
        let now = Instant::now();
        assert_eq!(AssistTicket::new(now, 1), AssistTicket::new(now, 1));
        assert_ne!(AssistTicket::new(now, 1), AssistTicket::new(now, 2));
    }
}
