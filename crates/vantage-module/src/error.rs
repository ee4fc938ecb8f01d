//! Module layer errors.
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`ModuleError::MissingCapabilities`] | `MODULE_MISSING_CAPABILITY` | No |
//! | [`ModuleError::NotRegistered`] | `MODULE_NOT_REGISTERED` | No |
//! | [`ModuleError::AlreadyRegistered`] | `MODULE_ALREADY_REGISTERED` | No |
//! | [`ModuleError::BuildFailed`] | `MODULE_BUILD_FAILED` | No |
//! | [`ModuleError::RefreshFailed`] | `MODULE_REFRESH_FAILED` | Yes |

use thiserror::Error;
use vantage_types::ErrorCode;

/// Module layer error.
#[derive(Debug, Clone, Error)]
pub enum ModuleError {
    /// One or more required capabilities have no registered provider.
    /// Fatal at boot: startup aborts before any module is constructed.
    #[error("missing required capabilities: {}", .0.join(", "))]
    MissingCapabilities(Vec<String>),

    /// A provider lookup failed for a capability nobody registered.
    #[error("no provider registered for capability: {0}")]
    NotRegistered(String),

    /// A second provider was registered under an existing capability.
    #[error("capability already registered: {0}")]
    AlreadyRegistered(String),

    /// A provider failed while constructing its module.
    #[error("failed to build module '{capability}': {reason}")]
    BuildFailed {
        /// The capability being constructed.
        capability: String,
        /// What the provider reported.
        reason: String,
    },

    /// A status-refresh or follow-up hook failed. Reported via
    /// notification, never fatal.
    #[error("refresh failed for '{capability}': {reason}")]
    RefreshFailed {
        /// The module whose hook failed.
        capability: String,
        /// What the hook reported.
        reason: String,
    },
}

impl ModuleError {
    /// Creates a [`ModuleError::RefreshFailed`].
    pub fn refresh_failed(capability: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RefreshFailed {
            capability: capability.into(),
            reason: reason.into(),
        }
    }
}

impl ErrorCode for ModuleError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingCapabilities(_) => "MODULE_MISSING_CAPABILITY",
            Self::NotRegistered(_) => "MODULE_NOT_REGISTERED",
            Self::AlreadyRegistered(_) => "MODULE_ALREADY_REGISTERED",
            Self::BuildFailed { .. } => "MODULE_BUILD_FAILED",
            Self::RefreshFailed { .. } => "MODULE_REFRESH_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::RefreshFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_types::assert_error_codes;

    fn all_variants() -> Vec<ModuleError> {
        vec![
            ModuleError::MissingCapabilities(vec!["users".into()]),
            ModuleError::NotRegistered("users".into()),
            ModuleError::AlreadyRegistered("users".into()),
            ModuleError::BuildFailed {
                capability: "users".into(),
                reason: "x".into(),
            },
            ModuleError::refresh_failed("users", "x"),
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "MODULE_");
    }

    #[test]
    fn missing_capabilities_lists_names() {
        let err = ModuleError::MissingCapabilities(vec!["users".into(), "exploits".into()]);
        assert_eq!(
            err.to_string(),
            "missing required capabilities: users, exploits"
        );
    }

    #[test]
    fn only_refresh_is_recoverable() {
        assert!(ModuleError::refresh_failed("users", "x").is_recoverable());
        assert!(!ModuleError::NotRegistered("users".into()).is_recoverable());
    }
}
