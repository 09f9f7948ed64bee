//! Raw keyboard events as delivered by the windowing toolkit.

use horizon_keys_core::{Key, KeyboardModifiers};

/// Opaque identity of a top-level window.
///
/// Only compared for equality; the dispatcher never owns or inspects windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Opaque identity of a widget that can receive key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

/// The kind of a keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// A key was pressed.
    #[default]
    KeyDown,
    /// A key was released.
    KeyUp,
    /// A key press that the toolkit is about to use for focus traversal.
    Traverse,
    /// The event has been consumed and must not be delivered further.
    None,
}

/// The traversal a [`KeyEventKind::Traverse`] event would perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Traversal {
    /// No traversal.
    #[default]
    None,
    Escape,
    Return,
    TabNext,
    TabPrevious,
    ArrowNext,
    ArrowPrevious,
    Mnemonic,
    PageNext,
    PagePrevious,
}

/// A raw key event.
///
/// `doit` follows the toolkit convention: `true` while the event is still up
/// for grabs, `false` once something has consumed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// What happened.
    pub kind: KeyEventKind,
    /// The key code of the physical key, if the toolkit reported one.
    pub key: Option<Key>,
    /// The character the text layer produced, if any.
    pub character: Option<char>,
    /// Modifiers held when the event was generated. For key-up events this is
    /// the state before the release.
    pub modifiers: KeyboardModifiers,
    /// The focused widget the event is addressed to.
    pub widget: Option<WidgetId>,
    /// Whether the event is still available for default processing.
    pub doit: bool,
    /// Traversal detail for traverse events.
    pub detail: Traversal,
}

impl KeyEvent {
    /// A key-down event with no widget.
    pub fn key_down(key: Option<Key>, character: Option<char>, modifiers: KeyboardModifiers) -> Self {
        Self {
            kind: KeyEventKind::KeyDown,
            key,
            character,
            modifiers,
            widget: None,
            doit: true,
            detail: Traversal::None,
        }
    }

    /// A key-up event with no widget.
    pub fn key_up(key: Option<Key>, modifiers: KeyboardModifiers) -> Self {
        Self {
            kind: KeyEventKind::KeyUp,
            ..Self::key_down(key, None, modifiers)
        }
    }

    /// A traverse event with no widget.
    pub fn traverse(key: Key, character: Option<char>, modifiers: KeyboardModifiers, detail: Traversal) -> Self {
        Self {
            kind: KeyEventKind::Traverse,
            detail,
            ..Self::key_down(Some(key), character, modifiers)
        }
    }

    /// The same event addressed to `widget`.
    #[must_use]
    pub fn with_widget(mut self, widget: WidgetId) -> Self {
        self.widget = Some(widget);
        self
    }

    /// Check whether the event carries nothing a key binding could match: no
    /// modifiers, no key code and no character.
    pub fn is_blank(&self) -> bool {
        self.modifiers.none() && self.key.is_none() && self.character.is_none()
    }

    /// Check whether this event reports a modifier key on its own.
    pub fn is_modifier_key(&self) -> bool {
        self.key.is_some_and(|k| k.is_modifier())
    }

    /// Mark the event consumed by a key binding.
    ///
    /// A key-down stops propagating. A traverse keeps `doit` so the toolkit
    /// finishes its bookkeeping, but performs no traversal.
    pub(crate) fn consume(&mut self) {
        match self.kind {
            KeyEventKind::KeyDown => self.doit = false,
            KeyEventKind::Traverse => {
                self.detail = Traversal::None;
                self.doit = true;
            }
            KeyEventKind::KeyUp | KeyEventKind::None => {}
        }
        self.kind = KeyEventKind::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_key_down() {
        let mut event = KeyEvent::key_down(Some(Key::S), Some('\u{13}'), KeyboardModifiers::CTRL);
        event.consume();
        assert!(!event.doit);
        assert_eq!(event.kind, KeyEventKind::None);
    }

    #[test]
    fn test_consume_traverse() {
        let mut event = KeyEvent::traverse(Key::Tab, Some('\t'), KeyboardModifiers::CTRL, Traversal::TabNext);
        event.consume();
        assert!(event.doit);
        assert_eq!(event.detail, Traversal::None);
        assert_eq!(event.kind, KeyEventKind::None);
    }

    #[test]
    fn test_blank_event() {
        assert!(KeyEvent::key_down(None, None, KeyboardModifiers::NONE).is_blank());
        assert!(!KeyEvent::key_down(None, Some('x'), KeyboardModifiers::NONE).is_blank());
        assert!(!KeyEvent::key_down(None, None, KeyboardModifiers::ALT).is_blank());
    }

    #[test]
    fn test_modifier_key_event() {
        let event = KeyEvent::key_down(Some(Key::ControlLeft), None, KeyboardModifiers::NONE);
        assert!(event.is_modifier_key());
        assert!(!KeyEvent::key_down(Some(Key::Q), Some('q'), KeyboardModifiers::NONE).is_modifier_key());
    }
}
