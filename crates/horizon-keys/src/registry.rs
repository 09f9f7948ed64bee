//! In-memory command and key binding registry.
//!
//! [`CommandRegistry`] is a ready-made [`BindingResolver`] and
//! [`ActionTable`]. Applications that already keep commands elsewhere
//! implement those traits directly instead.
//!
//! ```
//! use horizon_keys::{BindingResolver, CommandRegistry, SequenceMatch};
//!
//! let registry = CommandRegistry::new();
//! registry.define_command("edit.toggle-comment", "Toggle Comment");
//! registry.bind("Ctrl+K, Ctrl+K".parse().unwrap(), "edit.toggle-comment");
//!
//! assert_eq!(registry.resolve(&"Ctrl+K".parse().unwrap()), SequenceMatch::PartialMatch);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use horizon_keys_core::KeySequence;
use horizon_keys_core::logging::targets;
use parking_lot::RwLock;

use crate::action::{Action, ActionTable};
use crate::config::BindingsConfig;
use crate::error::{KeysError, Result};
use crate::resolver::{BindingResolver, CommandId, CommandInfo};

/// A key sequence bound to a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyBinding {
    pub sequence: KeySequence,
    pub command: CommandId,
}

#[derive(Debug)]
struct CommandEntry {
    name: String,
    active: bool,
}

#[derive(Default)]
struct RegistryInner {
    commands: HashMap<CommandId, CommandEntry>,
    actions: HashMap<CommandId, Arc<dyn Action>>,
    bindings: Vec<KeyBinding>,
}

impl RegistryInner {
    fn is_active(&self, id: &CommandId) -> bool {
        self.commands.get(id).is_some_and(|c| c.active)
    }

    fn active_bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter().filter(|b| self.is_active(&b.command))
    }

    fn commands_bound_to(&self, sequence: &KeySequence) -> BTreeSet<&CommandId> {
        self.active_bindings()
            .filter(|b| b.sequence == *sequence)
            .map(|b| &b.command)
            .collect()
    }
}

/// Commands, their actions, and the key sequences bound to them.
///
/// A binding only counts while its command is defined and active. A sequence
/// bound to two different active commands is a conflict and resolves to no
/// perfect match at all.
pub struct CommandRegistry {
    inner: RwLock<RegistryInner>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    /// Build a registry from a bindings document.
    pub fn from_config(config: &BindingsConfig) -> Result<Self> {
        let registry = Self::new();
        for command in &config.commands {
            registry.define_command(command.id.clone(), command.name.clone());
            if !command.active {
                registry.set_active(&command.id, false);
            }
        }
        for binding in &config.bindings {
            if !registry.is_defined(&binding.command) {
                return Err(KeysError::UnknownCommand {
                    sequence: binding.sequence.clone(),
                    command: binding.command.clone(),
                });
            }
            let sequence = binding
                .sequence
                .parse()
                .map_err(|e| KeysError::parse(binding.sequence.clone(), e))?;
            registry.bind(sequence, binding.command.clone());
        }
        Ok(registry)
    }

    /// Read and load a TOML bindings file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let config = BindingsConfig::load(path)?;
        Self::from_config(&config)
    }

    /// Define (or rename) an active command.
    pub fn define_command(&self, id: impl Into<CommandId>, name: impl Into<String>) {
        let id = id.into();
        let name = name.into();
        tracing::debug!(target: targets::REGISTRY, command = %id, %name, "command defined");
        self.inner
            .write()
            .commands
            .insert(id, CommandEntry { name, active: true });
    }

    /// Activate or deactivate a command. Returns `false` if it is not defined.
    pub fn set_active(&self, id: &CommandId, active: bool) -> bool {
        match self.inner.write().commands.get_mut(id) {
            Some(entry) => {
                entry.active = active;
                true
            }
            None => false,
        }
    }

    /// Check whether a command is defined.
    pub fn is_defined(&self, id: &CommandId) -> bool {
        self.inner.read().commands.contains_key(id)
    }

    /// Register the action that runs when `id` fires.
    pub fn set_action(&self, id: impl Into<CommandId>, action: Arc<dyn Action>) {
        self.inner.write().actions.insert(id.into(), action);
    }

    /// Bind `sequence` to `command`.
    ///
    /// Sequences containing a stroke without a natural key cannot be typed to
    /// completion and are ignored.
    pub fn bind(&self, sequence: KeySequence, command: impl Into<CommandId>) {
        let command = command.into();
        if sequence.is_empty() || !sequence.is_complete() {
            tracing::warn!(
                target: targets::REGISTRY,
                %sequence,
                %command,
                "ignoring binding without a natural key in every stroke"
            );
            return;
        }
        tracing::debug!(target: targets::REGISTRY, %sequence, %command, "binding added");
        let binding = KeyBinding { sequence, command };
        let mut inner = self.inner.write();
        if !inner.bindings.contains(&binding) {
            inner.bindings.push(binding);
        }
    }

    /// Remove every binding of `sequence`. Returns how many were removed.
    pub fn unbind(&self, sequence: &KeySequence) -> usize {
        let mut inner = self.inner.write();
        let before = inner.bindings.len();
        inner.bindings.retain(|b| b.sequence != *sequence);
        before - inner.bindings.len()
    }

    /// All bindings, sorted.
    pub fn bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.inner.read().bindings.clone();
        bindings.sort();
        bindings
    }

    /// Sequences bound to `command`, sorted.
    pub fn sequences_for(&self, command: &CommandId) -> Vec<KeySequence> {
        let inner = self.inner.read();
        let mut sequences: Vec<KeySequence> = inner
            .bindings
            .iter()
            .filter(|b| b.command == *command)
            .map(|b| b.sequence.clone())
            .collect();
        sequences.sort();
        sequences
    }

    /// Sequences bound to more than one active command.
    pub fn conflicts(&self) -> BTreeMap<KeySequence, Vec<CommandId>> {
        let inner = self.inner.read();
        let mut by_sequence: BTreeMap<KeySequence, BTreeSet<CommandId>> = BTreeMap::new();
        for binding in inner.active_bindings() {
            by_sequence
                .entry(binding.sequence.clone())
                .or_default()
                .insert(binding.command.clone());
        }
        by_sequence
            .into_iter()
            .filter(|(_, commands)| commands.len() > 1)
            .map(|(sequence, commands)| (sequence, commands.into_iter().collect()))
            .collect()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry").finish_non_exhaustive()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingResolver for CommandRegistry {
    fn is_partial_match(&self, sequence: &KeySequence) -> bool {
        self.inner
            .read()
            .active_bindings()
            .any(|b| sequence.is_strict_prefix_of(&b.sequence))
    }

    fn is_perfect_match(&self, sequence: &KeySequence) -> bool {
        self.inner.read().commands_bound_to(sequence).len() == 1
    }

    fn perfect_match(&self, sequence: &KeySequence) -> Option<CommandId> {
        let inner = self.inner.read();
        let commands = inner.commands_bound_to(sequence);
        if commands.len() > 1 {
            tracing::debug!(
                target: targets::REGISTRY,
                %sequence,
                count = commands.len(),
                "conflicting bindings, no perfect match"
            );
            return None;
        }
        commands.into_iter().next().cloned()
    }

    fn partial_matches(&self, sequence: &KeySequence) -> BTreeMap<KeySequence, CommandId> {
        self.inner
            .read()
            .bindings
            .iter()
            .filter(|b| sequence.is_strict_prefix_of(&b.sequence))
            .map(|b| (b.sequence.clone(), b.command.clone()))
            .collect()
    }

    fn command(&self, id: &CommandId) -> Option<CommandInfo> {
        self.inner.read().commands.get(id).map(|entry| CommandInfo {
            is_defined: true,
            is_active: entry.active,
            name: entry.name.clone(),
        })
    }
}

impl ActionTable for CommandRegistry {
    fn action(&self, id: &CommandId) -> Option<Arc<dyn Action>> {
        self.inner.read().actions.get(id).cloned()
    }
}
