//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;
use vantage_types::ErrorCode;

/// Configuration resolution error.
///
/// Missing config files are not errors - a file that exists but cannot be
/// read or parsed is.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The config file could not be parsed as TOML.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// The file that failed.
        path: PathBuf,
        /// The TOML error.
        source: toml::de::Error,
    },

    /// An environment variable carried an unusable value.
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar {
        /// The variable name.
        var: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an [`ConfigError::InvalidEnvVar`].
    pub fn invalid_env_var(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            var: var.into(),
            reason: reason.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "CONFIG_READ",
            Self::Parse { .. } => "CONFIG_PARSE",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
        }
    }

    fn is_recoverable(&self) -> bool {
        // The user can fix the file or the variable and relaunch.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_types::assert_error_code;

    #[test]
    fn error_codes_valid() {
        assert_error_code(
            &ConfigError::invalid_env_var("VANTAGE_DEBUG", "expected bool"),
            "CONFIG_",
        );
        assert_error_code(
            &ConfigError::Read {
                path: PathBuf::from("/x"),
                source: std::io::Error::other("x"),
            },
            "CONFIG_",
        );
    }
}
