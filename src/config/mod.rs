//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! (and an optional YAML file) using the `config` and `dotenvy` crates.
//! Configuration is loaded with the `ARCH_TRADEOFF` prefix and nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use arch_tradeoff::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Failure memory in {}", config.storage.memory_dir.display());
//! ```

mod error;
mod evolution;
mod logging;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use evolution::EvolutionConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::path::Path;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Evolution loop settings (iteration cap)
    #[serde(default)]
    pub evolution: EvolutionConfig,

    /// Failure memory and report locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ARCH_TRADEOFF` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ARCH_TRADEOFF__EVOLUTION__MAX_ITERATIONS=5` -> `evolution.max_iterations = 5`
    /// - `ARCH_TRADEOFF__STORAGE__MEMORY_DIR=...` -> `storage.memory_dir = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], layering environment variables over a
    /// YAML file when one is given. A missing file is not an error.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("ARCH_TRADEOFF")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
