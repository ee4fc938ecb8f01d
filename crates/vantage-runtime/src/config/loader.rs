//! Configuration loader with layered merging.

use super::{default_config_path, ConfigError, RuntimeConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```
/// use vantage_runtime::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .skip_env_vars() // deterministic under test
///     .skip_file()
///     .load()
///     .unwrap();
/// assert!(!config.debug);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Config file path (defaults to `~/.vantage/config.toml`).
    config_path: Option<PathBuf>,

    /// Skip file loading.
    skip_file: bool,

    /// Skip environment variable loading.
    skip_env: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom config file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Skips config file loading.
    #[must_use]
    pub fn skip_file(mut self) -> Self {
        self.skip_file = true;
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads and merges configuration from all layers.
    ///
    /// Missing config files are silently ignored; a file that exists but
    /// cannot be read or parsed is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an unreadable/unparsable file or an
    /// invalid environment variable value.
    pub fn load(&self) -> Result<RuntimeConfig, ConfigError> {
        let mut config = RuntimeConfig::default();

        if !self.skip_file {
            let path = self.config_path.clone().unwrap_or_else(default_config_path);
            if let Some(file_config) = load_file(&path)? {
                debug!(path = %path.display(), "loaded config file");
                config = file_config;
            }
        }

        if !self.skip_env {
            apply_env_overrides(&mut config)?;
        }

        Ok(config)
    }
}

/// Loads one config file, returning `None` when it does not exist.
fn load_file(path: &Path) -> Result<Option<RuntimeConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = RuntimeConfig::from_toml(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(config))
}

/// Applies `VANTAGE_*` environment variable overrides.
fn apply_env_overrides(config: &mut RuntimeConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var("VANTAGE_DEBUG") {
        config.debug = parse_bool(&val)
            .ok_or_else(|| ConfigError::invalid_env_var("VANTAGE_DEBUG", "expected bool"))?;
    }

    if let Ok(val) = std::env::var("VANTAGE_API_ORIGIN") {
        config.api.origin = val;
    }

    if let Ok(val) = std::env::var("VANTAGE_API_TIMEOUT_SECS") {
        config.api.timeout_secs = val.parse().map_err(|_| {
            ConfigError::invalid_env_var("VANTAGE_API_TIMEOUT_SECS", "expected integer seconds")
        })?;
    }

    if let Ok(val) = std::env::var("VANTAGE_THEME") {
        config.ui.default_theme = val;
    }

    Ok(())
}

/// Parses the boolean spellings accepted in environment variables.
fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_everything_skipped() {
        let config = ConfigLoader::new().skip_file().skip_env_vars().load().unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn missing_file_is_ignored() {
        let config = ConfigLoader::new()
            .with_config_path("/nonexistent/vantage/config.toml")
            .skip_env_vars()
            .load()
            .unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn file_layer_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true\n\n[api]\norigin = \"http://backend:9000\"").unwrap();

        let config = ConfigLoader::new()
            .with_config_path(file.path())
            .skip_env_vars()
            .load()
            .unwrap();

        assert!(config.debug);
        assert_eq!(config.api.origin, "http://backend:9000");
        // Untouched fields keep their defaults.
        assert_eq!(config.api.max_attempts, 3);
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = {{ not toml").unwrap();

        let err = ConfigLoader::new()
            .with_config_path(file.path())
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn parse_bool_spellings() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
