//! Configuration documents.
//!
//! Two TOML documents configure the engine:
//!
//! ```toml
//! # keyboard.toml: dispatcher behaviour
//! out_of_order_keys = "Escape"
//! assist_delay_ms = 1000
//! multi_key_rocker = false
//! ```
//!
//! ```toml
//! # bindings.toml: commands and their key sequences
//! [[command]]
//! id = "edit.toggle-comment"
//! name = "Toggle Comment"
//!
//! [[binding]]
//! sequence = "Ctrl+K, Ctrl+K"
//! command = "edit.toggle-comment"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KeysError, Result};
use crate::resolver::CommandId;

/// Default delay before the multi-stroke assist list appears.
pub const DEFAULT_ASSIST_DELAY_MS: u64 = 1000;

/// Dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Key strokes delivered to the focused widget before binding dispatch,
    /// written as a key sequence (`"Escape"`, `"Escape, Ctrl+G"`).
    pub out_of_order_keys: String,
    /// Delay before the assist list for a pending sequence is shown.
    pub assist_delay_ms: u64,
    /// Keep the leading stroke of a sequence while its modifiers stay held,
    /// so a second binding with the same prefix can follow without retyping it.
    pub multi_key_rocker: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            out_of_order_keys: "Escape".to_string(),
            assist_delay_ms: DEFAULT_ASSIST_DELAY_MS,
            multi_key_rocker: false,
        }
    }
}

impl KeyboardConfig {
    /// Parse from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| KeysError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// The assist delay as a [`Duration`].
    pub fn assist_delay(&self) -> Duration {
        Duration::from_millis(self.assist_delay_ms)
    }
}

/// A command declared in a bindings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub id: CommandId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A binding declared in a bindings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Key sequence text, e.g. `"Ctrl+K, Ctrl+C"`.
    pub sequence: String,
    pub command: CommandId,
}

/// Commands and key bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    #[serde(rename = "command")]
    pub commands: Vec<CommandConfig>,
    #[serde(rename = "binding")]
    pub bindings: Vec<BindingConfig>,
}

impl BindingsConfig {
    /// Parse from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| KeysError::io(path, e))?;
        Self::from_toml_str(&text)
    }
}
