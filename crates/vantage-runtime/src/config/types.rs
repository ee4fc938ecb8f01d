//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values and
//! derive `#[serde(default)]` so every field is optional in the file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use vantage_client::{BasePaths, ClientOptions};

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use vantage_runtime::RuntimeConfig;
///
/// let config = RuntimeConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.api.max_attempts, 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Enable debug mode (verbose logging, diagnostics).
    pub debug: bool,

    /// API client configuration.
    pub api: ApiConfig,

    /// Storage configuration.
    pub storage: StorageConfig,

    /// UI bootstrap configuration.
    pub ui: UiConfig,
}

impl RuntimeConfig {
    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin, e.g. `http://127.0.0.1:8000`. Empty means
    /// same-origin relative requests.
    pub origin: String,

    /// Deployment mount prefixes.
    pub paths: BasePaths,

    /// Total attempt budget per request.
    pub max_attempts: u32,

    /// Base inter-attempt retry delay in milliseconds (actual delay is
    /// `base × attempt`).
    pub retry_base_delay_ms: u64,

    /// Response cache time-to-live in seconds.
    pub cache_ttl_secs: u64,

    /// Per-request timeout budget in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            paths: BasePaths::default(),
            max_attempts: 3,
            retry_base_delay_ms: 500,
            cache_ttl_secs: 5 * 60,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Converts into the client's option struct.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            max_attempts: self.max_attempts,
            retry_base_delay: Duration::from_millis(self.retry_base_delay_ms),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for the file backend. `None` uses
    /// [`vantage_store::default_storage_path`].
    pub path: Option<PathBuf>,
}

/// UI bootstrap configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Theme applied when no persisted preference exists.
    pub default_theme: String,

    /// Sidebar state applied when no persisted preference exists.
    pub sidebar_collapsed: bool,

    /// The initially visible panel.
    pub initial_panel: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_theme: "light".into(),
            sidebar_collapsed: false,
            initial_panel: "dashboard".into(),
        }
    }
}

/// Returns the default config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    vantage_store::default_storage_path()
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}
