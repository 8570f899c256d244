//! Configuration loading and typed config structures for Hatchling.
//!
//! The configuration lives in `hatchling-config.yaml` in the working
//! directory. Every section and field is optional; anything left out keeps
//! the default documented on the field.

use std::path::{Path, PathBuf};

use hatchling_pet::PetRules;
use serde::Deserialize;

/// Environment variable that overrides [`StorageConfig::directory`].
pub const STORAGE_DIR_ENV: &str = "HATCHLING_STORAGE_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `hatchling-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HatchlingConfig {
    /// Pet rules: decay rates, thresholds, rewards.
    #[serde(default)]
    pub pet: PetRules,

    /// Timer and randomness settings.
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Where the pet is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HatchlingConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `HATCHLING_STORAGE_DIR` overrides `storage.directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.storage.apply_env_overrides();
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.storage.apply_env_overrides();
            Ok(config)
        }
    }
}

/// Timer and randomness settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    /// Milliseconds between decay ticks.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Seed for the interaction RNG. Unset means seeded from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            seed: None,
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key.
    #[serde(default = "default_storage_directory")]
    pub directory: PathBuf,

    /// Key the pet snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl StorageConfig {
    /// Apply `HATCHLING_STORAGE_DIR` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides using a custom variable lookup.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(STORAGE_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.directory = PathBuf::from(dir);
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_storage_directory(),
            key: default_storage_key(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_update_interval_ms() -> u64 {
    60_000
}

fn default_storage_directory() -> PathBuf {
    PathBuf::from(".hatchling")
}

fn default_storage_key() -> String {
    String::from("pet-storage")
}

fn default_log_level() -> String {
    String::from("info")
}
