//! Horizon Keys - multi-stroke key binding dispatch.
//!
//! Turns raw keyboard events into command executions. Bindings may be chords
//! of several strokes ("Ctrl+K, Ctrl+C"); while a chord is partially typed the
//! dispatcher swallows the keys, and after a delay it offers the list of
//! possible completions.
//!
//! The pieces:
//!
//! - [`KeyboardDispatcher`] owns the binding state and implements the event
//!   filters the toolkit calls
//! - [`BindingResolver`] and [`ActionTable`] answer which command a sequence
//!   names and what runs for it; [`CommandRegistry`] implements both
//! - [`Toolkit`] and [`AssistPresenter`] are the seams to the windowing system
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use horizon_keys::{CommandRegistry, FnAction, KeyboardConfig, KeyboardDispatcher};
//!
//! let registry = Arc::new(CommandRegistry::new());
//! registry.define_command("edit.toggle-comment", "Toggle Comment");
//! registry.bind("Ctrl+K, Ctrl+C".parse()?, "edit.toggle-comment");
//! registry.set_action("edit.toggle-comment", Arc::new(FnAction::new(|_| Ok(()))));
//!
//! let mut dispatcher = KeyboardDispatcher::with_registry(toolkit, registry, &KeyboardConfig::default());
//! dispatcher.key_down_filter(&mut event);
//! ```

mod action;
mod assist;
mod config;
mod dispatcher;
mod error;
mod event;
mod normalize;
mod out_of_order;
mod registry;
mod resolver;
mod state;
mod toolkit;
#[cfg(feature = "winit")]
pub mod winit_input;

pub use horizon_keys_core::{
    Key, KeySequence, KeyStroke, KeyboardModifiers, ModifierKey, ModifierOrder, ParseError,
};

pub use action::{Action, ActionTable, FnAction};
pub use assist::{
    AssistContent, AssistEntry, AssistPresenter, AssistTicket, NO_MATCHES_TEXT, NoopPresenter,
    collect_completions,
};
pub use config::{
    BindingConfig, BindingsConfig, CommandConfig, DEFAULT_ASSIST_DELAY_MS, KeyboardConfig,
};
pub use dispatcher::KeyboardDispatcher;
pub use error::{ActionError, KeysError, Result};
pub use event::{KeyEvent, KeyEventKind, Traversal, WidgetId, WindowId};
pub use normalize::possible_key_strokes;
pub use out_of_order::OutOfOrderKeys;
pub use registry::{CommandRegistry, KeyBinding};
pub use resolver::{BindingResolver, CommandId, CommandInfo, SequenceMatch};
pub use state::{KeyBindingState, Transition, advance};
pub use toolkit::{KeyListener, Toolkit};

static_assertions::assert_impl_all!(CommandRegistry: Send, Sync);
static_assertions::assert_impl_all!(KeyEvent: Send, Sync, Clone);
static_assertions::assert_impl_all!(AssistTicket: Send, Sync, Copy);
