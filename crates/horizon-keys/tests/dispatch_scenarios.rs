//! End-to-end dispatch scenarios against a recording toolkit.

use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use horizon_keys::{
    AssistContent, AssistPresenter, AssistTicket, CommandRegistry, FnAction, Key, KeyEvent,
    KeyEventKind, KeyListener, KeySequence, KeyboardConfig, KeyboardDispatcher, KeyboardModifiers,
    NO_MATCHES_TEXT, Toolkit, Traversal, WidgetId, WindowId,
};
use horizon_keys_core::{TimerId, TimerQueue};
use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Default)]
struct RecordingToolkit {
    active: Option<WindowId>,
    verify: HashSet<WidgetId>,
    attached: Vec<(WidgetId, KeyListener)>,
    timers: TimerQueue<AssistTicket>,
}

impl Toolkit for RecordingToolkit {
    fn active_window(&self) -> Option<WindowId> {
        self.active
    }

    fn is_dialog(&self, _widget: WidgetId) -> bool {
        false
    }

    fn has_verify_stage(&self, widget: WidgetId) -> bool {
        self.verify.contains(&widget)
    }

    fn attach_listener(&mut self, widget: WidgetId, listener: KeyListener) {
        self.attached.push((widget, listener));
    }

    fn detach_listener(&mut self, widget: WidgetId, listener: KeyListener) {
        self.attached.retain(|entry| *entry != (widget, listener));
    }

    fn schedule_assist(&mut self, delay: Duration, ticket: AssistTicket) -> TimerId {
        self.timers.start_one_shot(delay, ticket)
    }

    fn cancel_assist(&mut self, timer: TimerId) {
        let _ = self.timers.stop(timer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shown {
    Open(Vec<String>),
    Close,
    Mode(String),
}

#[derive(Clone, Default)]
struct RecordingPresenter(Arc<Mutex<Vec<Shown>>>);

impl RecordingPresenter {
    fn take(&self) -> Vec<Shown> {
        std::mem::take(&mut *self.0.lock())
    }
}

impl AssistPresenter for RecordingPresenter {
    fn open(&mut self, content: AssistContent) {
        self.0.lock().push(Shown::Open(content.lines()));
    }

    fn close(&mut self) {
        self.0.lock().push(Shown::Close);
    }

    fn show_mode(&mut self, sequence: &KeySequence) {
        self.0.lock().push(Shown::Mode(sequence.to_string()));
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_env_filter("horizon_keys=error")
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

// ============================================================================
// Fixture
// ============================================================================

struct Fixture {
    dispatcher: KeyboardDispatcher<RecordingToolkit>,
    presenter: RecordingPresenter,
    runs: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(&KeyboardConfig::default())
    }

    fn with_config(config: &KeyboardConfig) -> Self {
        let registry = Arc::new(CommandRegistry::new());
        let runs = Arc::new(Mutex::new(Vec::new()));

        for (id, name, sequences) in [
            ("toggle-comment", "Toggle Comment", &["Ctrl+K, Ctrl+K"][..]),
            ("uncomment", "Remove Comment", &["Ctrl+K, Ctrl+U"][..]),
            ("save", "Save", &["Ctrl+X, Ctrl+S"][..]),
            ("find", "Find", &["Ctrl+X, Ctrl+F"][..]),
            ("cancel", "Cancel", &["Escape"][..]),
            ("next-editor", "Next Editor", &["Ctrl+Tab"][..]),
        ] {
            registry.define_command(id, name);
            for sequence in sequences {
                registry.bind(sequence.parse().unwrap(), id);
            }
            let log = runs.clone();
            registry.set_action(
                id,
                Arc::new(FnAction::new(move |_| {
                    log.lock().push(id.to_string());
                    Ok(())
                })),
            );
        }

        let toolkit = RecordingToolkit {
            active: Some(WindowId(1)),
            ..Default::default()
        };
        let presenter = RecordingPresenter::default();
        let dispatcher = KeyboardDispatcher::with_registry(toolkit, registry, config)
            .with_presenter(Box::new(presenter.clone()));

        Self {
            dispatcher,
            presenter,
            runs,
        }
    }

    fn key_down(&mut self, mut event: KeyEvent) -> KeyEvent {
        self.dispatcher.key_down_filter(&mut event);
        event
    }

    /// Fire every assist timer due at `now`, as the toolkit's event loop would.
    fn run_timers(&mut self, now: Instant) {
        let expired = self.dispatcher.toolkit_mut().timers.take_expired(now);
        for (_, ticket) in expired {
            self.dispatcher.assist_timer_fired(ticket);
        }
    }

    fn runs(&self) -> Vec<String> {
        self.runs.lock().clone()
    }
}

fn ctrl(key: Key) -> KeyEvent {
    let letter = key.to_string().chars().next().unwrap();
    let control = char::from_u32(letter as u32 - 0x40).unwrap();
    KeyEvent::key_down(Some(key), Some(control), KeyboardModifiers::CTRL)
}

fn plain(key: Key, c: char) -> KeyEvent {
    KeyEvent::key_down(Some(key), Some(c), KeyboardModifiers::NONE)
}

fn escape() -> KeyEvent {
    plain(Key::Escape, '\u{1b}').with_widget(WidgetId(7))
}

fn seq(text: &str) -> KeySequence {
    text.parse().unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_prefix_enters_pending_state() {
    let mut fx = Fixture::new();

    let event = fx.key_down(ctrl(Key::K));

    assert!(!event.doit);
    assert_eq!(event.kind, KeyEventKind::None);
    assert_eq!(fx.dispatcher.state().current_sequence(), &seq("Ctrl+K"));
    assert!(fx.dispatcher.state().assist_ticket().is_some());
    assert_eq!(fx.dispatcher.toolkit().timers.active_count(), 1);
    assert_eq!(fx.presenter.take(), vec![Shown::Mode("Ctrl+K".into())]);
}

#[test]
fn test_second_stroke_fires_and_resets() {
    let mut fx = Fixture::new();
    fx.key_down(ctrl(Key::K));

    let event = fx.key_down(ctrl(Key::K));

    assert!(!event.doit);
    assert_eq!(fx.runs(), vec!["toggle-comment"]);
    assert!(fx.dispatcher.state().is_idle());
    assert_eq!(fx.dispatcher.state().assist_ticket(), None);
    assert_eq!(fx.dispatcher.toolkit().timers.active_count(), 0);
}

#[test]
fn test_unbound_key_is_not_consumed() {
    let mut fx = Fixture::new();

    let event = fx.key_down(plain(Key::Q, 'q'));

    assert!(event.doit);
    assert_eq!(event.kind, KeyEventKind::KeyDown);
    assert!(fx.dispatcher.state().is_idle());
    assert!(fx.runs().is_empty());
}

#[test]
fn test_out_of_order_key_consumed_by_widget() {
    let mut fx = Fixture::new();

    let mut event = fx.key_down(escape());
    assert!(event.doit);
    assert_eq!(fx.dispatcher.toolkit().attached, vec![(WidgetId(7), KeyListener::OutOfOrder)]);

    // The inline editor closes itself on Escape.
    event.doit = false;
    fx.dispatcher.handle_event(KeyListener::OutOfOrder, &mut event);

    assert!(fx.dispatcher.toolkit().attached.is_empty());
    assert!(fx.runs().is_empty());
    assert!(fx.dispatcher.state().is_idle());
    assert!(fx.presenter.take().is_empty());
}

#[test]
fn test_out_of_order_key_ignored_by_widget_is_rerouted() {
    let mut fx = Fixture::new();

    let mut event = fx.key_down(escape());
    assert!(event.doit);
    assert!(fx.runs().is_empty());

    fx.dispatcher.handle_event(KeyListener::OutOfOrder, &mut event);

    assert!(fx.dispatcher.toolkit().attached.is_empty());
    assert_eq!(fx.runs(), vec!["cancel"]);
    assert!(!event.doit);
}

#[test]
fn test_malformed_out_of_order_config_logs_once() {
    let config = KeyboardConfig {
        out_of_order_keys: "Ctrl+Escapade".to_string(),
        ..KeyboardConfig::default()
    };

    let (mut fx, logs) = capture_logs(|| Fixture::with_config(&config));

    assert!(fx.dispatcher.out_of_order_keys().is_empty());
    assert_eq!(logs.matches("could not parse out-of-order keys definition").count(), 1);

    // Escape now dispatches straight away.
    let event = fx.key_down(escape());
    assert!(!event.doit);
    assert_eq!(fx.runs(), vec!["cancel"]);
}

// ============================================================================
// Assist
// ============================================================================

#[test]
fn test_assist_lists_completions_after_delay() {
    let mut fx = Fixture::new();
    fx.key_down(ctrl(Key::K));
    fx.presenter.take();

    fx.run_timers(Instant::now());
    assert!(!fx.dispatcher.is_assist_open());

    fx.run_timers(Instant::now() + Duration::from_secs(2));
    assert!(fx.dispatcher.is_assist_open());
    assert_eq!(
        fx.presenter.take(),
        vec![Shown::Open(vec![
            "Ctrl+K, Ctrl+K   Toggle Comment".to_string(),
            "Ctrl+K, Ctrl+U   Remove Comment".to_string(),
        ])]
    );

    fx.key_down(plain(Key::Q, 'q'));
    assert!(!fx.dispatcher.is_assist_open());
    assert_eq!(fx.presenter.take(), vec![Shown::Close, Shown::Mode(String::new())]);
}

#[test]
fn test_assist_shows_no_matches_when_every_completion_is_inactive() {
    let registry = Arc::new(CommandRegistry::new());
    registry.define_command("fold", "Fold");
    registry.bind(seq("Ctrl+K, Ctrl+0"), "fold");
    registry.set_active(&"fold".into(), false);
    registry.define_command("unfold", "Unfold");
    registry.bind(seq("Ctrl+K, Ctrl+9"), "unfold");

    let presenter = RecordingPresenter::default();
    let toolkit = RecordingToolkit::default();
    let mut dispatcher = KeyboardDispatcher::with_registry(toolkit, registry.clone(), &KeyboardConfig::default())
        .with_presenter(Box::new(presenter.clone()));
    dispatcher.key_down_filter(&mut ctrl(Key::K));

    // Deactivated while the sequence is pending.
    registry.set_active(&"unfold".into(), false);
    let expired = dispatcher.toolkit_mut().timers.take_expired(Instant::now() + Duration::from_secs(2));
    for (_, ticket) in expired {
        dispatcher.assist_timer_fired(ticket);
    }

    assert!(presenter.take().contains(&Shown::Open(vec![NO_MATCHES_TEXT.to_string()])));
}

#[test]
fn test_timer_from_earlier_pending_state_is_stale() {
    let mut fx = Fixture::new();
    fx.key_down(ctrl(Key::K));
    let stale = fx.dispatcher.state().assist_ticket().unwrap();
    fx.key_down(plain(Key::Q, 'q'));
    fx.key_down(ctrl(Key::K));

    fx.dispatcher.assist_timer_fired(stale);

    assert!(!fx.dispatcher.is_assist_open());
    assert_ne!(fx.dispatcher.state().assist_ticket(), Some(stale));
}

// ============================================================================
// Focus, modifiers and traversal
// ============================================================================

#[test]
fn test_window_change_resets_pending_sequence() {
    let mut fx = Fixture::new();
    fx.key_down(ctrl(Key::K));

    fx.dispatcher.window_activated(WindowId(2));

    assert!(fx.dispatcher.state().is_idle());
    assert_eq!(fx.dispatcher.state().associated_window(), Some(WindowId(2)));
    assert_eq!(fx.dispatcher.toolkit().timers.active_count(), 0);
}

#[test]
fn test_stroke_in_other_window_starts_fresh() {
    let mut fx = Fixture::new();
    fx.key_down(ctrl(Key::K));

    fx.dispatcher.toolkit_mut().active = Some(WindowId(2));
    let event = fx.key_down(ctrl(Key::K));

    // The chord restarted in the new window rather than completing.
    assert!(fx.runs().is_empty());
    assert!(!event.doit);
    assert_eq!(fx.dispatcher.state().current_sequence(), &seq("Ctrl+K"));
    assert_eq!(fx.dispatcher.state().associated_window(), Some(WindowId(2)));
}

#[test]
fn test_releasing_modifier_keeps_fresh_partial_match() {
    let mut fx = Fixture::new();
    fx.key_down(ctrl(Key::K));

    fx.dispatcher
        .key_up_filter(&KeyEvent::key_up(Some(Key::ControlLeft), KeyboardModifiers::CTRL));

    assert_eq!(fx.dispatcher.state().current_sequence(), &seq("Ctrl+K"));
    fx.key_down(ctrl(Key::U));
    assert_eq!(fx.runs(), vec!["uncomment"]);
}

#[test]
fn test_rocker_keeps_prefix_until_modifier_released() {
    let config = KeyboardConfig {
        multi_key_rocker: true,
        ..KeyboardConfig::default()
    };
    let mut fx = Fixture::with_config(&config);

    fx.key_down(ctrl(Key::X));
    fx.key_down(ctrl(Key::S));
    assert_eq!(fx.runs(), vec!["save"]);
    assert_eq!(fx.dispatcher.state().current_sequence(), &seq("Ctrl+X"));
    assert!(fx.dispatcher.state().is_safe_to_reset());

    fx.key_down(ctrl(Key::F));
    assert_eq!(fx.runs(), vec!["save", "find"]);

    fx.dispatcher
        .key_up_filter(&KeyEvent::key_up(Some(Key::ControlLeft), KeyboardModifiers::CTRL));
    assert!(fx.dispatcher.state().is_idle());
    assert_eq!(fx.dispatcher.toolkit().timers.active_count(), 0);
}

#[test]
fn test_traverse_event_is_consumed_without_traversal() {
    let mut fx = Fixture::new();

    let event = fx.key_down(KeyEvent::traverse(
        Key::Tab,
        Some('\t'),
        KeyboardModifiers::CTRL,
        Traversal::TabNext,
    ));

    assert_eq!(fx.runs(), vec!["next-editor"]);
    assert!(event.doit);
    assert_eq!(event.detail, Traversal::None);
    assert_eq!(event.kind, KeyEventKind::None);
}

#[test]
fn test_failing_action_is_logged_and_consumed() {
    let registry = Arc::new(CommandRegistry::new());
    registry.define_command("broken", "Broken");
    registry.bind(seq("Ctrl+B"), "broken");
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    registry.set_action(
        "broken",
        Arc::new(FnAction::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("disk full".into())
        })),
    );
    let mut dispatcher = KeyboardDispatcher::with_registry(
        RecordingToolkit::default(),
        registry,
        &KeyboardConfig::default(),
    );

    let (event, logs) = capture_logs(|| {
        let mut event = ctrl(Key::B);
        dispatcher.key_down_filter(&mut event);
        event
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!event.doit);
    assert!(logs.contains("failed to execute properly"));
    assert!(logs.contains("broken"));
    assert!(logs.contains("disk full"));
    assert!(dispatcher.state().is_idle());
}

#[test]
fn test_match_from_pending_state_without_action_is_not_consumed() {
    let registry = Arc::new(CommandRegistry::new());
    registry.define_command("outline", "Outline");
    registry.bind(seq("Ctrl+O, Ctrl+O"), "outline");
    let mut dispatcher = KeyboardDispatcher::with_registry(
        RecordingToolkit::default(),
        registry,
        &KeyboardConfig::default(),
    );

    dispatcher.key_down_filter(&mut ctrl(Key::O));
    let mut second = ctrl(Key::O);
    dispatcher.key_down_filter(&mut second);

    // Matched from a pending state with no action registered.
    assert!(second.doit);
    assert!(dispatcher.state().is_idle());
}

// ============================================================================
// Disabled actions and out-of-order edge cases
// ============================================================================

fn disabled_fixture(sequence: &str) -> (KeyboardDispatcher<RecordingToolkit>, Arc<AtomicUsize>) {
    let registry = Arc::new(CommandRegistry::new());
    registry.define_command("format", "Format");
    registry.bind(seq(sequence), "format");
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    registry.set_action(
        "format",
        Arc::new(FnAction::disabled(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })),
    );
    let dispatcher = KeyboardDispatcher::with_registry(
        RecordingToolkit::default(),
        registry,
        &KeyboardConfig::default(),
    );
    (dispatcher, calls)
}

#[test]
fn test_disabled_action_from_pending_state_is_consumed_without_running() {
    let (mut dispatcher, calls) = disabled_fixture("Ctrl+K, Ctrl+K");

    dispatcher.key_down_filter(&mut ctrl(Key::K));
    let mut second = ctrl(Key::K);
    dispatcher.key_down_filter(&mut second);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!second.doit);
    assert!(dispatcher.state().is_idle());
    assert_eq!(dispatcher.toolkit().timers.active_count(), 0);
}

#[test]
fn test_disabled_single_stroke_action_is_consumed_without_running() {
    let (mut dispatcher, calls) = disabled_fixture("Ctrl+B");

    let mut event = ctrl(Key::B);
    dispatcher.key_down_filter(&mut event);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!event.doit);
    assert!(dispatcher.state().is_idle());
}

#[test]
fn test_out_of_order_traverse_event_is_left_alone() {
    let mut fx = Fixture::new();

    let event = fx.key_down(
        KeyEvent::traverse(Key::Escape, Some('\u{1b}'), KeyboardModifiers::NONE, Traversal::Escape)
            .with_widget(WidgetId(7)),
    );

    // The key-down that follows gets the out-of-order treatment instead.
    assert!(event.doit);
    assert_eq!(event.kind, KeyEventKind::Traverse);
    assert_eq!(event.detail, Traversal::Escape);
    assert!(fx.dispatcher.toolkit().attached.is_empty());
    assert!(fx.runs().is_empty());
    assert!(fx.dispatcher.state().is_idle());
}

#[test]
fn test_out_of_order_key_without_focused_widget_dispatches_immediately() {
    let mut fx = Fixture::new();

    let event = fx.key_down(plain(Key::Escape, '\u{1b}'));

    assert!(fx.dispatcher.toolkit().attached.is_empty());
    assert_eq!(fx.runs(), vec!["cancel"]);
    assert!(!event.doit);
    assert!(fx.dispatcher.state().is_idle());
}
