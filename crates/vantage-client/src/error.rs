//! Client layer errors.
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`ApiError::Transport`] | `API_TRANSPORT` | Yes |
//! | [`ApiError::Status`] | `API_STATUS` | 429/5xx only |
//! | [`ApiError::Application`] | `API_APPLICATION` | No |
//! | [`ApiError::Decode`] | `API_DECODE` | No |
//! | [`ApiError::Upload`] | `API_UPLOAD` | No |

use thiserror::Error;
use vantage_types::ErrorCode;

/// Transport-level failure, before any HTTP status exists.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request exceeded its timeout budget.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other network-level failure (reset, aborted body, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built (bad URL, invalid header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Classifies a `reqwest` error into a transport error.
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        let msg = err.to_string();
        if err.is_timeout() {
            Self::Timeout(msg)
        } else if err.is_connect() {
            Self::Connect(msg)
        } else if err.is_builder() || err.is_request() {
            Self::InvalidRequest(msg)
        } else {
            Self::Network(msg)
        }
    }
}

/// Client layer error raised to callers.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport failure after exhausting the retry budget.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-2xx HTTP status. `detail` carries the response's `detail` or
    /// `error` field when present, a body snippet otherwise.
    #[error("HTTP {status}: {detail}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Human-readable failure description.
        detail: String,
    },

    /// 2xx response whose envelope carried `success: false`.
    #[error("application error: {0}")]
    Application(String),

    /// 2xx response whose body was not valid JSON.
    #[error("response was not valid JSON: {0}")]
    Decode(String),

    /// Upload-specific failure.
    #[error("upload failed: {0}")]
    Upload(String),
}

/// Returns `true` if the HTTP status warrants a retry.
///
/// Rate limiting and server-side failures are transient; every other
/// non-2xx status is terminal.
#[must_use]
pub fn retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

impl ErrorCode for ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "API_TRANSPORT",
            Self::Status { .. } => "API_STATUS",
            Self::Application(_) => "API_APPLICATION",
            Self::Decode(_) => "API_DECODE",
            Self::Upload(_) => "API_UPLOAD",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => retryable_status(*status),
            _ => false,
        }
    }
}

/// Truncates a string for safe inclusion in error messages.
pub(crate) fn truncate_for_error(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}
