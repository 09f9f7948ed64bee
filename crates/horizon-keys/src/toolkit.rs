//! The windowing toolkit as seen by the dispatcher.

use std::time::Duration;

use horizon_keys_core::TimerId;

use crate::assist::AssistTicket;
use crate::event::{WidgetId, WindowId};

/// The handlers the dispatcher registers with the toolkit.
///
/// The toolkit stores these tags and routes matching events to
/// [`KeyboardDispatcher::handle_event`](crate::KeyboardDispatcher::handle_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyListener {
    /// Display-wide filter for key-down and traverse events, run before any
    /// widget sees them.
    KeyDownFilter,
    /// Display-wide filter for key-up events.
    KeyUpFilter,
    /// One-shot key-down listener on a widget, run after the widget's own
    /// listeners.
    OutOfOrder,
    /// One-shot verify-key listener for widgets that consume keys during a
    /// verify stage ahead of key-down.
    OutOfOrderVerify,
}

impl KeyListener {
    /// Display-wide filters to install once at startup.
    pub const FILTERS: [KeyListener; 2] = [KeyListener::KeyDownFilter, KeyListener::KeyUpFilter];

    /// Check if this listener is a display-wide filter rather than a
    /// per-widget one-shot.
    pub fn is_filter(&self) -> bool {
        matches!(self, KeyListener::KeyDownFilter | KeyListener::KeyUpFilter)
    }
}

/// Services the dispatcher needs from the windowing toolkit.
///
/// All methods are called on the event-dispatch thread.
pub trait Toolkit {
    /// The currently active top-level window.
    fn active_window(&self) -> Option<WindowId>;

    /// Whether `widget` lives in a dialog, i.e. a shell with a parent shell.
    fn is_dialog(&self, widget: WidgetId) -> bool;

    /// Whether `widget` runs a verify stage before key-down listeners.
    fn has_verify_stage(&self, widget: WidgetId) -> bool;

    /// Register a one-shot `listener` on `widget`.
    fn attach_listener(&mut self, widget: WidgetId, listener: KeyListener);

    /// Remove `listener` from `widget`.
    fn detach_listener(&mut self, widget: WidgetId, listener: KeyListener);

    /// Call back [`assist_timer_fired`](crate::KeyboardDispatcher::assist_timer_fired)
    /// with `ticket` after `delay`, on the dispatch thread.
    fn schedule_assist(&mut self, delay: Duration, ticket: AssistTicket) -> TimerId;

    /// Best-effort cancellation of a scheduled assist callback.
    fn cancel_assist(&mut self, timer: TimerId);
}
