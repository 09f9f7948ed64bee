//! The keyboard dispatcher: turns raw key events into command executions.
//!
//! # Installing
//!
//! Register the two display-wide filters in [`KeyListener::FILTERS`] with the
//! toolkit so that every key-down, traverse and key-up event reaches
//! [`KeyboardDispatcher::handle_event`] before any widget. The dispatcher
//! itself attaches and detaches the one-shot out-of-order listeners through
//! [`Toolkit`].
//!
//! # Event flow
//!
//! ```text
//! key-down/traverse ──► key_down_filter ──► out-of-order key? ──yes──► widget first
//!                                               │                       │
//!                                               no            not consumed (doit)
//!                                               ▼                       │
//!                                        process_key_event ◄────────────┘
//!                                               │
//!                                             press ──► partial: pending, arm assist
//!                                                   ──► perfect: execute, reset
//!                                                   ──► none:    reset
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use horizon_keys_core::logging::targets;
use horizon_keys_core::{
    KeySequence, KeyStroke, KeyboardModifiers, PerfSpan, ThreadAffinity, TimerId, keys_debug,
};

use crate::action::ActionTable;
use crate::assist::{AssistPresenter, AssistTicket, NoopPresenter, collect_completions};
use crate::config::KeyboardConfig;
use crate::event::{KeyEvent, KeyEventKind, WindowId};
use crate::normalize::possible_key_strokes;
use crate::out_of_order::OutOfOrderKeys;
use crate::registry::CommandRegistry;
use crate::resolver::BindingResolver;
use crate::state::{KeyBindingState, Transition, advance};
use crate::toolkit::{KeyListener, Toolkit};

/// Dispatches key events to key bindings for one window group.
///
/// Must be used from the thread that created it; calls from any other thread
/// panic.
pub struct KeyboardDispatcher<T: Toolkit> {
    toolkit: T,
    presenter: Box<dyn AssistPresenter>,
    resolver: Arc<dyn BindingResolver>,
    actions: Arc<dyn ActionTable>,
    out_of_order: OutOfOrderKeys,
    assist_delay: Duration,
    multi_key_rocker: bool,
    state: KeyBindingState,
    assist_timer: Option<TimerId>,
    assist_open: bool,
    generation: u64,
    affinity: ThreadAffinity,
}

impl<T: Toolkit> KeyboardDispatcher<T> {
    /// Create a dispatcher over separate binding and action sources.
    ///
    /// The out-of-order key text in `config` is parsed here; malformed text is
    /// logged and leaves the dispatcher without out-of-order keys.
    pub fn new(
        toolkit: T,
        resolver: Arc<dyn BindingResolver>,
        actions: Arc<dyn ActionTable>,
        config: &KeyboardConfig,
    ) -> Self {
        let out_of_order = OutOfOrderKeys::parse(&config.out_of_order_keys);
        keys_debug!(
            out_of_order = out_of_order.len(),
            assist_delay_ms = config.assist_delay_ms,
            multi_key_rocker = config.multi_key_rocker,
            "keyboard dispatcher created"
        );
        Self {
            toolkit,
            presenter: Box::new(NoopPresenter),
            resolver,
            actions,
            out_of_order,
            assist_delay: config.assist_delay(),
            multi_key_rocker: config.multi_key_rocker,
            state: KeyBindingState::new(),
            assist_timer: None,
            assist_open: false,
            generation: 0,
            affinity: ThreadAffinity::current(),
        }
    }

    /// Create a dispatcher over a [`CommandRegistry`].
    pub fn with_registry(toolkit: T, registry: Arc<CommandRegistry>, config: &KeyboardConfig) -> Self {
        Self::new(toolkit, registry.clone(), registry, config)
    }

    /// Use `presenter` for the assist list and mode line.
    #[must_use]
    pub fn with_presenter(mut self, presenter: Box<dyn AssistPresenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    /// The binding state.
    pub fn state(&self) -> &KeyBindingState {
        &self.state
    }

    pub fn out_of_order_keys(&self) -> &OutOfOrderKeys {
        &self.out_of_order
    }

    /// Whether the assist list is currently shown.
    pub fn is_assist_open(&self) -> bool {
        self.assist_open
    }

    /// Route an event delivered to one of the dispatcher's listeners.
    pub fn handle_event(&mut self, listener: KeyListener, event: &mut KeyEvent) {
        match listener {
            KeyListener::KeyDownFilter => self.key_down_filter(event),
            KeyListener::KeyUpFilter => self.key_up_filter(event),
            KeyListener::OutOfOrder => self.out_of_order_key_down(event),
            KeyListener::OutOfOrderVerify => self.out_of_order_verify(event),
        }
    }

    /// Display-wide filter for key-down and traverse events.
    ///
    /// Modifier keys on their own and events addressed to dialogs are left
    /// alone. Out-of-order keys go to the focused widget first.
    pub fn key_down_filter(&mut self, event: &mut KeyEvent) {
        self.affinity.assert_same_thread();
        let _perf = PerfSpan::new("key_down_filter");
        if !matches!(event.kind, KeyEventKind::KeyDown | KeyEventKind::Traverse) {
            return;
        }
        if event.is_modifier_key() {
            return;
        }
        if event.widget.is_some_and(|w| self.toolkit.is_dialog(w)) {
            return;
        }

        let strokes = possible_key_strokes(event);
        if self.out_of_order.contains_any(&strokes) {
            // Other kinds are dropped here; a key-down follows for the same key.
            if event.kind == KeyEventKind::KeyDown {
                match event.widget {
                    Some(widget) => {
                        let listener = if self.toolkit.has_verify_stage(widget) {
                            KeyListener::OutOfOrderVerify
                        } else {
                            KeyListener::OutOfOrder
                        };
                        tracing::trace!(target: targets::OUT_OF_ORDER, ?widget, ?listener, "deferring to focused widget");
                        self.toolkit.attach_listener(widget, listener);
                    }
                    None => self.process_key_event(&strokes, event),
                }
            }
            return;
        }

        self.process_key_event(&strokes, event);
    }

    /// Display-wide filter for key-up events.
    ///
    /// Releasing the last held modifier lets the state collapse fully, and
    /// resets it unless a partially typed binding is still pending.
    pub fn key_up_filter(&mut self, event: &KeyEvent) {
        self.affinity.assert_same_thread();
        if event.kind != KeyEventKind::KeyUp {
            return;
        }
        let Some(modifier) = event.key.and_then(|k| k.modifier_key()) else {
            return;
        };
        if event.modifiers != KeyboardModifiers::only(modifier) {
            return;
        }

        self.state.set_collapse_fully(true);
        if self.state.is_safe_to_reset() {
            self.reset_state();
        }
    }

    fn out_of_order_key_down(&mut self, event: &mut KeyEvent) {
        self.affinity.assert_same_thread();
        if let Some(widget) = event.widget {
            self.toolkit.detach_listener(widget, KeyListener::OutOfOrder);
        }
        if !event.doit {
            tracing::trace!(target: targets::OUT_OF_ORDER, "consumed by widget");
            return;
        }

        tracing::debug!(target: targets::OUT_OF_ORDER, "not consumed by widget, dispatching");
        let strokes = possible_key_strokes(event);
        self.process_key_event(&strokes, event);
    }

    fn out_of_order_verify(&mut self, event: &mut KeyEvent) {
        self.affinity.assert_same_thread();
        let Some(widget) = event.widget else {
            return;
        };
        self.toolkit.detach_listener(widget, KeyListener::OutOfOrderVerify);
        if event.doit {
            self.toolkit.attach_listener(widget, KeyListener::OutOfOrder);
        } else {
            tracing::trace!(target: targets::OUT_OF_ORDER, ?widget, "consumed during verify");
        }
    }

    /// Run `strokes` through the bindings and mark `event` consumed if a
    /// binding took it.
    ///
    /// A change of active window since the state was last touched resets the
    /// state first.
    pub fn process_key_event(&mut self, strokes: &[KeyStroke], event: &mut KeyEvent) {
        self.affinity.assert_same_thread();
        if strokes.is_empty() {
            return;
        }

        let active = self.toolkit.active_window();
        self.check_active_window(active);

        if self.press(strokes, Some(event)) {
            event.consume();
        }
    }

    /// Feed candidate strokes to the state machine.
    ///
    /// Returns whether the event should count as consumed: always for a
    /// partial match; for a perfect match when an action was found or the
    /// state was idle before this stroke; never when nothing matched.
    pub fn press(&mut self, strokes: &[KeyStroke], event: Option<&KeyEvent>) -> bool {
        self.affinity.assert_same_thread();
        if strokes.is_empty() {
            return false;
        }

        let transition = advance(self.state.current_sequence(), strokes, self.resolver.as_ref());
        match transition {
            Transition::Accept(sequence) => {
                tracing::debug!(target: targets::DISPATCH, %sequence, "partial match");
                self.state.set_collapse_fully(!self.multi_key_rocker);
                self.increment_state(sequence);
                true
            }
            Transition::Fire {
                sequence,
                command,
                was_idle,
            } => {
                tracing::debug!(target: targets::DISPATCH, %sequence, %command, "perfect match");
                self.state.set_current_sequence(sequence);

                let action = self.actions.action(&command);
                match &action {
                    Some(action) if action.is_enabled() => {
                        if let Err(error) = action.execute(event) {
                            tracing::error!(
                                target: targets::DISPATCH,
                                %command,
                                %error,
                                "action for command '{command}' failed to execute properly"
                            );
                        }
                    }
                    Some(_) => {
                        tracing::debug!(target: targets::DISPATCH, %command, "action disabled");
                    }
                    None => {
                        tracing::debug!(target: targets::DISPATCH, %command, "no action for command");
                    }
                }

                self.reset_state();
                action.is_some() || was_idle
            }
            Transition::Reject => {
                self.reset_state();
                false
            }
        }
    }

    /// Notify the dispatcher that `window` became active.
    pub fn window_activated(&mut self, window: WindowId) {
        self.affinity.assert_same_thread();
        self.check_active_window(Some(window));
    }

    /// The assist delay scheduled with `ticket` has elapsed.
    ///
    /// Shows the completions of the pending sequence, unless the state has
    /// moved on since the ticket was issued.
    pub fn assist_timer_fired(&mut self, ticket: AssistTicket) {
        self.affinity.assert_same_thread();
        if self.state.is_idle() || self.state.assist_ticket() != Some(ticket) {
            tracing::trace!(target: targets::ASSIST, ?ticket, "stale assist ticket");
            return;
        }
        self.assist_timer = None;

        let content = collect_completions(self.resolver.as_ref(), self.state.current_sequence());
        tracing::debug!(
            target: targets::ASSIST,
            sequence = %self.state.current_sequence(),
            entries = content.lines().len(),
            "showing assist"
        );
        if self.assist_open {
            self.presenter.close();
        }
        self.presenter.open(content);
        self.assist_open = true;
    }

    /// Return to idle, cancelling the assist timer and closing the assist list.
    pub fn reset(&mut self) {
        self.affinity.assert_same_thread();
        self.state.set_collapse_fully(true);
        self.reset_state();
    }

    fn check_active_window(&mut self, window: Option<WindowId>) {
        if window == self.state.associated_window() {
            return;
        }
        tracing::debug!(
            target: targets::STATE,
            from = ?self.state.associated_window(),
            to = ?window,
            "active window changed"
        );
        self.state.set_collapse_fully(true);
        self.reset_state();
        self.state.set_associated_window(window);
    }

    fn increment_state(&mut self, sequence: KeySequence) {
        self.close_assist();
        self.state.set_current_sequence(sequence);
        self.state.set_associated_window(self.toolkit.active_window());
        self.presenter.show_mode(self.state.current_sequence());
        self.arm_assist();
    }

    fn reset_state(&mut self) {
        let was_idle = self.state.is_idle();
        self.close_assist();
        let kept_prefix = self.state.reset();
        if !was_idle {
            self.presenter.show_mode(self.state.current_sequence());
        }
        if kept_prefix {
            self.arm_assist();
        }
    }

    fn arm_assist(&mut self) {
        self.generation += 1;
        let ticket = AssistTicket::new(Instant::now(), self.generation);
        self.state.set_assist_ticket(Some(ticket));
        self.assist_timer = Some(self.toolkit.schedule_assist(self.assist_delay, ticket));
    }

    fn close_assist(&mut self) {
        if let Some(timer) = self.assist_timer.take() {
            self.toolkit.cancel_assist(timer);
        }
        if self.assist_open {
            self.presenter.close();
            self.assist_open = false;
        }
    }
}
