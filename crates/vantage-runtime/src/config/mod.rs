//! Runtime configuration.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Config file (`~/.vantage/config.toml` or an explicit path)
//! 3. Environment variables (`VANTAGE_*`)
//!
//! Each layer overrides the previous. See [`ConfigLoader`].

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{default_config_path, ApiConfig, RuntimeConfig, StorageConfig, UiConfig};
