//! Event layer errors.

use thiserror::Error;
use vantage_types::ErrorCode;

/// Event layer error.
///
/// Listener callbacks report failure by returning
/// [`EventError::Handler`]; the bus logs it and keeps dispatching to
/// sibling listeners.
#[derive(Debug, Clone, Error)]
pub enum EventError {
    /// A listener callback failed.
    #[error("listener failed: {0}")]
    Handler(String),

    /// An async listener was dispatched outside a tokio runtime.
    #[error("async listener requires a tokio runtime")]
    NoRuntime,
}

impl EventError {
    /// Creates a handler failure from any displayable cause.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::Handler(_) => "EVENT_HANDLER_FAILED",
            Self::NoRuntime => "EVENT_NO_RUNTIME",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
