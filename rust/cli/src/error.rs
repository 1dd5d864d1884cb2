//! Error type shared by every command handler.

use std::fmt;

use headsup_engine::errors::GameError;

/// Anything a command can fail with; `run` maps it to an exit code.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (files, stdout/stderr writes)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Rejected by the game engine
    Engine(String),

    /// Input ended mid-hand
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::Engine(error)
    }
}

impl From<&str> for CliError {
    fn from(error: &str) -> Self {
        CliError::Engine(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_errors_keep_their_message() {
        let e: CliError = GameError::CannotCheck { to_call: 20 }.into();
        assert_eq!(e.to_string(), "Engine error: Cannot check facing a bet of 20");
    }

    #[test]
    fn io_errors_expose_source() {
        use std::error::Error;
        let e: CliError = std::io::Error::other("disk").into();
        assert!(e.source().is_some());
        assert!(CliError::Config("x".into()).source().is_none());
    }
}
