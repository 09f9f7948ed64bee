//! Executable actions behind commands.

use std::fmt;
use std::sync::Arc;

use crate::error::ActionError;
use crate::event::KeyEvent;
use crate::resolver::CommandId;

/// An executable handler for a command.
pub trait Action: Send + Sync {
    /// Whether the action can run right now.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Run the action. `event` is the key event that triggered it, when there
    /// was one.
    fn execute(&self, event: Option<&KeyEvent>) -> Result<(), ActionError>;
}

/// The table of actions the dispatcher executes on a perfect match.
pub trait ActionTable {
    /// The action registered for `id`, if any.
    fn action(&self, id: &CommandId) -> Option<Arc<dyn Action>>;
}

/// An [`Action`] backed by a closure.
///
/// ```
/// use horizon_keys::{Action, FnAction};
///
/// let save = FnAction::new(|_event| {
///     println!("saved");
///     Ok(())
/// });
/// assert!(save.is_enabled());
/// ```
pub struct FnAction<F> {
    handler: F,
    enabled: bool,
}

impl<F> FnAction<F>
where
    F: Fn(Option<&KeyEvent>) -> Result<(), ActionError> + Send + Sync,
{
    /// An enabled action running `handler`.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            enabled: true,
        }
    }

    /// An action that reports itself disabled.
    pub fn disabled(handler: F) -> Self {
        Self {
            handler,
            enabled: false,
        }
    }
}

impl<F> Action for FnAction<F>
where
    F: Fn(Option<&KeyEvent>) -> Result<(), ActionError> + Send + Sync,
{
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn execute(&self, event: Option<&KeyEvent>) -> Result<(), ActionError> {
        (self.handler)(event)
    }
}

impl<F> fmt::Debug for FnAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAction")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fn_action_runs_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let action = FnAction::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        action.execute(None).unwrap();
        action.execute(None).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_disabled_action() {
        let action = FnAction::disabled(|_| Ok(()));
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_failing_action() {
        let action = FnAction::new(|_| Err("disk full".into()));
        let err = action.execute(None).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
