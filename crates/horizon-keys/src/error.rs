//! Error types for the binding engine.

use std::path::PathBuf;

use horizon_keys_core::ParseError;
use thiserror::Error;

use crate::resolver::CommandId;

/// Result type alias for binding engine operations.
pub type Result<T> = std::result::Result<T, KeysError>;

/// Errors raised while configuring the binding engine.
///
/// Key dispatch itself never returns errors: failures while handling a key
/// degrade to "the key press did nothing" plus a log entry.
#[derive(Error, Debug)]
pub enum KeysError {
    /// A key sequence in the configuration could not be parsed.
    #[error("invalid key sequence '{text}': {source}")]
    Parse {
        text: String,
        #[source]
        source: ParseError,
    },

    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration document is not valid TOML for its schema.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A binding names a command that was never defined.
    #[error("binding '{sequence}' refers to unknown command '{command}'")]
    UnknownCommand { sequence: String, command: CommandId },
}

impl KeysError {
    /// Create a parse error for `text`.
    pub fn parse(text: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            text: text.into(),
            source,
        }
    }

    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error returned by a failing action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = KeysError::parse("Ctrl+", ParseError::NoKey);
        assert_eq!(
            err.to_string(),
            "invalid key sequence 'Ctrl+': no key specified (only modifiers)"
        );
    }

    #[test]
    fn test_unknown_command_display() {
        let err = KeysError::UnknownCommand {
            sequence: "Ctrl+K".into(),
            command: CommandId::from("nope"),
        };
        assert_eq!(
            err.to_string(),
            "binding 'Ctrl+K' refers to unknown command 'nope'"
        );
    }
}
