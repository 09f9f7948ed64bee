//! Core types for Horizon Keys.
//!
//! This crate provides the toolkit-independent building blocks of the Horizon
//! Keys binding engine:
//!
//! - **Keys and Modifiers**: [`Key`] codes, [`KeyboardModifiers`], and the
//!   platform [`ModifierOrder`] used to format and order strokes
//! - **Strokes and Sequences**: immutable [`KeyStroke`] and [`KeySequence`]
//!   values with parsing from and formatting to "Ctrl+K, Ctrl+C" text
//! - **Timers**: a one-shot [`TimerQueue`] for toolkits without their own
//! - **Thread Affinity**: [`ThreadAffinity`] for the single-thread dispatch contract
//! - **Logging**: tracing targets and `keys_*!` macros
//!
//! # Example
//!
//! ```
//! use horizon_keys_core::{Key, KeyStroke, KeySequence, KeyboardModifiers, ModifierOrder};
//!
//! let seq: KeySequence = "Ctrl+Shift+K, Q".parse().unwrap();
//! assert_eq!(seq.len(), 2);
//! assert_eq!(seq.strokes()[1], KeyStroke::key_only(Key::Q));
//! assert_eq!(seq.format_with(ModifierOrder::Gtk), "Shift+Ctrl+K, Q");
//! ```

mod error;
mod key;
pub mod logging;
mod modifiers;
mod sequence;
pub mod thread_check;
mod timer;

pub use error::{ParseError, TimerError};
pub use key::Key;
pub use logging::PerfSpan;
pub use modifiers::{KeyboardModifiers, ModifierKey, ModifierOrder};
pub use sequence::{KeySequence, KeyStroke};
pub use thread_check::ThreadAffinity;
pub use timer::{TimerId, TimerQueue};

static_assertions::assert_impl_all!(KeySequence: Send, Sync);
static_assertions::assert_impl_all!(KeyStroke: Send, Sync, Copy);
static_assertions::assert_impl_all!(TimerQueue<KeySequence>: Send, Sync);
