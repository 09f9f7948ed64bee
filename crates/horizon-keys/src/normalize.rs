//! Conversion of raw key events into candidate key strokes.
//!
//! A single key press can mean several strokes. On a US layout, Shift+1
//! produces `!`, and a user may have bound `Shift+1`, `!` or `Shift+!`. The
//! candidates are produced in priority order:
//!
//! 1. **unmodified**: the modifiers plus the physical key code, ignoring the
//!    character the layout produced
//! 2. **unshifted-modified**: the modifiers without Shift plus the produced
//!    character (letters keep the unmodified reading)
//! 3. **fully-modified**: the modifiers plus the produced character
//!
//! Duplicates of an earlier candidate are dropped.

use horizon_keys_core::{Key, KeyStroke, ModifierKey};

use crate::event::KeyEvent;

/// Generate every key stroke the event could plausibly mean, most exact first.
///
/// Returns an empty list for a blank event (no modifiers, no key code, no
/// character); callers must treat that as "not a keyboard event".
pub fn possible_key_strokes(event: &KeyEvent) -> Vec<KeyStroke> {
    if event.is_blank() {
        return Vec::new();
    }

    let mut strokes = Vec::with_capacity(3);
    let mut push = |stroke: KeyStroke| {
        if !strokes.contains(&stroke) {
            strokes.push(stroke);
        }
    };

    push(unmodified(event));
    push(unshifted_modified(event));
    push(fully_modified(event));

    strokes
}

fn unmodified(event: &KeyEvent) -> KeyStroke {
    KeyStroke {
        modifiers: event.modifiers,
        key: event.key,
    }
}

fn unshifted_modified(event: &KeyEvent) -> KeyStroke {
    if event.key.is_some_and(|k| k.is_letter()) {
        return unmodified(event);
    }
    KeyStroke {
        modifiers: event.modifiers.without(ModifierKey::Shift),
        key: top_key(event),
    }
}

fn fully_modified(event: &KeyEvent) -> KeyStroke {
    KeyStroke {
        modifiers: event.modifiers,
        key: top_key(event),
    }
}

/// The key named by the produced character.
///
/// With Control held, toolkits report letters as ASCII control characters
/// (Ctrl+A produces U+0001). Those are shifted back into the printable range
/// unless the control character is the key's own character, as with Enter.
fn top_key(event: &KeyEvent) -> Option<Key> {
    let c = event.character?;
    let own_character = event.key == Some(Key::from_char(c));
    let c = if event.modifiers.control && (c as u32) < 0x20 && !own_character {
        char::from_u32(c as u32 + 0x40).unwrap_or(c)
    } else {
        c
    };
    Some(Key::from_char(c))
}
