//! Runtime layer errors.
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`RuntimeError::Module`] | `RUNTIME_MODULE` | No |
//! | [`RuntimeError::Storage`] | `RUNTIME_STORAGE` | No |
//! | [`RuntimeError::Config`] | `RUNTIME_CONFIG` | No |
//! | [`RuntimeError::MissingShell`] | `RUNTIME_MISSING_SHELL` | No |
//! | [`RuntimeError::AuthRejected`] | `RUNTIME_AUTH_REJECTED` | No |

use crate::ConfigError;
use thiserror::Error;
use vantage_module::ModuleError;
use vantage_store::StorageError;
use vantage_types::ErrorCode;

/// Runtime boot/orchestration error.
///
/// Everything here is fatal for the current page load: either startup
/// aborts (missing capability, unusable storage, no shell) or the session
/// was rejected and the shell has already been redirected to the login
/// surface.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Capability check or module construction failed.
    #[error(transparent)]
    Module(#[from] ModuleError),

    /// The storage backend could not be constructed.
    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The context builder was given no shell port.
    #[error("no shell port configured")]
    MissingShell,

    /// Session verification did not end in `Verified`; the shell has been
    /// redirected to the login surface and boot stopped.
    #[error("authentication rejected")]
    AuthRejected,
}

impl ErrorCode for RuntimeError {
    fn code(&self) -> &'static str {
        match self {
            Self::Module(_) => "RUNTIME_MODULE",
            Self::Storage(_) => "RUNTIME_STORAGE",
            Self::Config(_) => "RUNTIME_CONFIG",
            Self::MissingShell => "RUNTIME_MISSING_SHELL",
            Self::AuthRejected => "RUNTIME_AUTH_REJECTED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
