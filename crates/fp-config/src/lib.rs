//! # fp-config
//!
//! Layered configuration loading for fileprivate using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FILEPRIVATE_*` prefix, `__` as separator)
//! 2. Project-level `fileprivate.toml` in the working directory
//! 3. User-level `~/.config/fileprivate/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FILEPRIVATE_CHECK__INCLUDE_TESTS` -> `check.include_tests`,
//! `FILEPRIVATE_OUTPUT__FORMAT` -> `output.format`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use fp_config::FpConfig;
//!
//! let config = FpConfig::load().expect("config");
//! if config.check.include_tests {
//!     println!("checking test files too");
//! }
//! ```

mod check;
mod error;
mod output;

pub use check::CheckConfig;
pub use error::ConfigError;
pub use output::{OutputConfig, OutputFormat};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "fileprivate.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FpConfig {
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl FpConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` when a source fails to parse and
    /// `ConfigError::InvalidValue` when a value is rejected by [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FILEPRIVATE_").split("__"))
    }

    /// Reject values serde accepts but a run cannot use.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for a blank exclude pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(idx) = self.check.exclude.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("check.exclude[{idx}]"),
                reason: "pattern is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fileprivate").join("config.toml"))
    }
}
