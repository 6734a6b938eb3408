//! Error types for the session front end.

use thiserror::Error;

/// Result type for session front-end operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors reported by the text command front end.
///
/// Out-of-turn or stale game actions are not errors; the state machine
/// ignores them and reports an [`IgnoreReason`](crate::IgnoreReason).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A category name that matched nothing.
    #[error("unknown category '{input}'{}", suggestion_suffix(.suggestion))]
    UnknownCategory {
        /// What the user typed.
        input: String,
        /// Closest category label, if any was close.
        suggestion: Option<String>,
    },

    /// Malformed command arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The dice renderer reported a failure.
    #[error("dice renderer failed: {0}")]
    Renderer(String),

    /// View serialization failed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}
