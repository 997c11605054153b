// src/core/errors.rs

//! The crate-wide error type.

use crate::constants::{EXIT_COMMAND_NOT_FOUND, EXIT_FAILURE};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the console itself. Handler errors travel as
/// `anyhow::Error` and may wrap one of these.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// No command has this identity, name or alias.
    #[error("Command {name} not found")]
    CommandNotFound {
        /// The key that failed to resolve.
        name: String,
    },
    /// A command could not be registered.
    #[error("Invalid command '{identity}': {reason}")]
    InvalidCommand {
        /// Identity the registration used.
        identity: String,
        /// What went wrong.
        reason: String,
    },
    /// A property lookup named something a command definition does not have.
    #[error("Undefined method '{0}'")]
    UndefinedMethod(String),
    /// A level-named logger call with an unknown level.
    #[error("Method '{0}' does not exist")]
    BadMethodCall(String),
    /// A handler called its own command while it was running.
    #[error("Command '{0}' is already running and cannot be called re-entrantly")]
    ReentrantCall(String),
    /// The requested font is not in the console's font registry.
    #[error("Font '{name}' not found. Available fonts: {available}")]
    FontNotFound {
        /// Requested font.
        name: String,
        /// Comma-separated names of the registered fonts.
        available: String,
    },
    /// A font file is not valid TOML or misses its glyphs.
    #[error("Failed to parse font '{path}': {source}")]
    FontParse {
        /// The font file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
    /// Neither a built-in, a user theme nor a readable theme file.
    #[error("Theme '{0}' not found")]
    ThemeNotFound(String),
    /// A theme file is not valid TOML.
    #[error("Failed to parse '{path}': {source}")]
    ThemeParse {
        /// The theme file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
    /// `Context::logger` was used without `Application::logger`.
    #[error("No logger configured for this console")]
    LoggerNotConfigured,
    /// An interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// Shorthand for [`ConsoleError::CommandNotFound`].
    pub fn command_not_found(name: impl Into<String>) -> Self {
        Self::CommandNotFound { name: name.into() }
    }

    /// Shorthand for [`ConsoleError::InvalidCommand`].
    pub fn invalid_command(identity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            identity: identity.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code associated with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandNotFound { .. } => EXIT_COMMAND_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result alias for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ConsoleError::command_not_found("x").exit_code(), 127);
        assert_eq!(ConsoleError::invalid_command("x", "empty name").exit_code(), 1);
        assert_eq!(ConsoleError::ReentrantCall("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_not_found_message() {
        let err = ConsoleError::command_not_found("deploy");
        assert_eq!(err.to_string(), "Command deploy not found");
    }
}
