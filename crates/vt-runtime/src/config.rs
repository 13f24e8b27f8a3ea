//! # Runtime Configuration
//!
//! Layered configuration for the registry host.
//!
//! ## Precedence (lowest to highest)
//!
//! 1. [`RuntimeConfig::default`]
//! 2. JSON config file (optional)
//! 3. `VT_*` environment variables
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `VT_OWNER` | `owner` |
//! | `VT_LOG_LEVEL` | `log_level` |
//! | `VT_MAX_PRODUCT_ID_LEN` | `registry.max_product_id_len` |
//! | `VT_MAX_DESCRIPTION_LEN` | `registry.max_description_len` |
//! | `VT_START_HEIGHT` | `start_height` |
//!
//! ## Security Requirements
//!
//! - `owner` MUST NOT be the zero address. The default is zero, so a real
//!   deployer has to be supplied by file or environment.

use serde::{Deserialize, Serialize};
use shared_types::{Address, AddressError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vt_product_registry::domain::RegistryConfig;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Deployer identity. Becomes the registry owner.
    pub owner: Address,
    /// Registry limits and event switch.
    pub registry: RegistryConfig,
    /// Height of the first executed block.
    pub start_height: u64,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            owner: Address::ZERO, // MUST be overridden
            registry: RegistryConfig::default(),
            start_height: 1,
            log_level: "info".to_string(),
        }
    }
}

/// Where a loaded configuration came from.
///
/// Configuration is read before logging exists, so the caller logs this
/// once the subscriber is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    /// Config file, if one was given.
    pub file: Option<PathBuf>,
    /// `VT_*` variables that were applied, in application order.
    pub env_overrides: Vec<&'static str>,
}

impl RuntimeConfig {
    /// Build the configuration: defaults, then `path` (if any), then the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSources), ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let env_overrides = config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        let sources = ConfigSources {
            file: path.map(Path::to_path_buf),
            env_overrides,
        };
        Ok((config, sources))
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `VT_*` overrides from `lookup`. Returns the variables that
    /// were set.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Vec<&'static str>, ConfigError> {
        let mut applied = Vec::new();
        if let Some(raw) = lookup("VT_OWNER") {
            self.owner = raw
                .parse()
                .map_err(|source| ConfigError::InvalidOwner { raw, source })?;
            applied.push("VT_OWNER");
        }
        if let Some(level) = lookup("VT_LOG_LEVEL") {
            self.log_level = level;
            applied.push("VT_LOG_LEVEL");
        }
        if let Some(raw) = lookup("VT_MAX_PRODUCT_ID_LEN") {
            self.registry.max_product_id_len = parse_number("VT_MAX_PRODUCT_ID_LEN", raw)?;
            applied.push("VT_MAX_PRODUCT_ID_LEN");
        }
        if let Some(raw) = lookup("VT_MAX_DESCRIPTION_LEN") {
            self.registry.max_description_len = parse_number("VT_MAX_DESCRIPTION_LEN", raw)?;
            applied.push("VT_MAX_DESCRIPTION_LEN");
        }
        if let Some(raw) = lookup("VT_START_HEIGHT") {
            self.start_height = parse_number("VT_START_HEIGHT", raw)?;
            applied.push("VT_START_HEIGHT");
        }
        Ok(applied)
    }

    /// Reject configurations the registry cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        self.registry.validate()?;
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(
    variable: &'static str,
    raw: String,
) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { variable, raw })
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`RuntimeConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// `VT_OWNER` is not an address.
    #[error("VT_OWNER is not a valid address ({raw}): {source}")]
    InvalidOwner {
        /// The rejected value.
        raw: String,
        /// Parse failure.
        source: AddressError,
    },

    /// A numeric variable did not parse.
    #[error("{variable} must be a non-negative integer, got {raw:?}")]
    InvalidNumber {
        /// Variable name.
        variable: &'static str,
        /// The rejected value.
        raw: String,
    },

    /// Owner left at the zero address.
    #[error("owner is the zero address; set VT_OWNER or `owner` in the config file")]
    ZeroOwner,

    /// Registry limits are unusable.
    #[error("invalid registry config: {0}")]
    Registry(#[from] vt_product_registry::errors::ConfigError),
}
