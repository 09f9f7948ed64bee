//! Modifier keys and their platform ordering.

use std::cmp::Ordering;

/// A single modifier key.
///
/// The declaration order is the natural order used to break ties between
/// modifiers of equal rank in a [`ModifierOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKey {
    /// Control.
    Control,
    /// Alt (Option on macOS).
    Alt,
    /// Shift.
    Shift,
    /// Meta/Super (Windows key, Command on macOS).
    Meta,
}

impl ModifierKey {
    /// All modifier keys in natural order.
    pub const ALL: [ModifierKey; 4] = [
        ModifierKey::Control,
        ModifierKey::Alt,
        ModifierKey::Shift,
        ModifierKey::Meta,
    ];

    /// Parse a modifier name, case-insensitively.
    ///
    /// Accepts `ctrl`/`control`, `alt`/`option`, `shift`, and
    /// `meta`/`cmd`/`command`/`win`/`windows`/`super`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ctrl" | "control" => Some(ModifierKey::Control),
            "alt" | "option" => Some(ModifierKey::Alt),
            "shift" => Some(ModifierKey::Shift),
            "meta" | "cmd" | "command" | "win" | "windows" | "super" => Some(ModifierKey::Meta),
            _ => None,
        }
    }
}

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        ..Self::NONE
    };

    /// Control + Alt modifiers.
    pub const CTRL_ALT: Self = Self {
        control: true,
        alt: true,
        ..Self::NONE
    };

    /// Modifiers holding exactly one key.
    pub fn only(key: ModifierKey) -> Self {
        Self::NONE.with(key)
    }

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Check whether `key` is held.
    pub fn contains(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Control => self.control,
            ModifierKey::Alt => self.alt,
            ModifierKey::Shift => self.shift,
            ModifierKey::Meta => self.meta,
        }
    }

    /// A copy with `key` held.
    #[must_use]
    pub fn with(mut self, key: ModifierKey) -> Self {
        self.set(key, true);
        self
    }

    /// A copy with `key` released.
    #[must_use]
    pub fn without(mut self, key: ModifierKey) -> Self {
        self.set(key, false);
        self
    }

    fn set(&mut self, key: ModifierKey, held: bool) {
        match key {
            ModifierKey::Control => self.control = held,
            ModifierKey::Alt => self.alt = held,
            ModifierKey::Shift => self.shift = held,
            ModifierKey::Meta => self.meta = held,
        }
    }

    /// Held modifiers in natural order.
    pub fn iter(&self) -> impl Iterator<Item = ModifierKey> + '_ {
        ModifierKey::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl FromIterator<ModifierKey> for KeyboardModifiers {
    fn from_iter<I: IntoIterator<Item = ModifierKey>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl PartialOrd for KeyboardModifiers {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyboardModifiers {
    fn cmp(&self, other: &Self) -> Ordering {
        let order = ModifierOrder::Standard;
        let left = order.sorted(*self);
        let right = order.sorted(*other);
        for (l, r) in left.iter().zip(right.iter()) {
            match order.compare(*l, *r) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        left.len().cmp(&right.len())
    }
}

/// Platform convention for ordering and naming modifiers.
///
/// Modifiers are compared by rank first and by [`ModifierKey`]'s natural order
/// when ranks tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ModifierOrder {
    /// Ctrl, Alt, Shift, Meta.
    #[default]
    Standard,
    /// Shift, Ctrl, Alt, Super.
    Gtk,
    /// Ctrl, Option, Shift, Cmd.
    MacOs,
}

impl ModifierOrder {
    /// Rank of a modifier; lower ranks are written first.
    pub fn rank(&self, key: ModifierKey) -> u8 {
        match (self, key) {
            (ModifierOrder::Gtk, ModifierKey::Shift) => 0,
            (ModifierOrder::Gtk, ModifierKey::Control) => 1,
            (ModifierOrder::Gtk, ModifierKey::Alt) => 2,
            (ModifierOrder::Gtk, ModifierKey::Meta) => 3,
            (_, ModifierKey::Control) => 0,
            (_, ModifierKey::Alt) => 1,
            (_, ModifierKey::Shift) => 2,
            (_, ModifierKey::Meta) => 3,
        }
    }

    /// Compare two modifiers under this convention.
    pub fn compare(&self, left: ModifierKey, right: ModifierKey) -> Ordering {
        self.rank(left)
            .cmp(&self.rank(right))
            .then_with(|| left.cmp(&right))
    }

    /// The held modifiers, sorted under this convention.
    pub fn sorted(&self, modifiers: KeyboardModifiers) -> Vec<ModifierKey> {
        let mut keys: Vec<ModifierKey> = modifiers.iter().collect();
        keys.sort_by(|a, b| self.compare(*a, *b));
        keys
    }

    /// Display label for a modifier under this convention.
    pub fn label(&self, key: ModifierKey) -> &'static str {
        match (self, key) {
            (ModifierOrder::MacOs, ModifierKey::Alt) => "Option",
            (ModifierOrder::MacOs, ModifierKey::Meta) => "Cmd",
            (ModifierOrder::Gtk, ModifierKey::Meta) => "Super",
            (_, ModifierKey::Control) => "Ctrl",
            (_, ModifierKey::Alt) => "Alt",
            (_, ModifierKey::Shift) => "Shift",
            (_, ModifierKey::Meta) => "Meta",
        }
    }
}
