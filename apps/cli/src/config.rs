//! # CLI Configuration
//!
//! Settings for the `wholesale` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db ledger.db  --policy strict_bucket                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     WHOLESALE_DB_PATH=/data/ledger.db                                  │
//! │     WHOLESALE_PRICING_POLICY=fallback                                  │
//! │     WHOLESALE_CURRENCY_SYMBOL=€                                        │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/wholesale-ledger/config.toml (Linux)                     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     fallback pricing, "$", ledger.db in the platform data dir          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/srv/ledger/ledger.db"
//! max_connections = 5
//!
//! [pricing]
//! policy = "fallback"   # fallback | strict_bucket
//!
//! [display]
//! currency_symbol = "$"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use wholesale_core::PricingPolicy;

const DB_FILE_NAME: &str = "ledger.db";
const CONFIG_FILE_NAME: &str = "config.toml";
const MAX_CURRENCY_SYMBOL_LEN: usize = 8;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but make no sense together.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No explicit database path and no platform data directory.
    #[error("Could not determine a data directory; set WHOLESALE_DB_PATH")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to `ledger.db` in the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// `[pricing]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default)]
    pub policy: PricingPolicy,
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for every formatted amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config.toml`); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_toml(&std::fs::read_to_string(&path)?)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file body.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `WHOLESALE_*` overrides from `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("WHOLESALE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(policy) = lookup("WHOLESALE_PRICING_POLICY") {
            match policy.parse::<PricingPolicy>() {
                Ok(parsed) => {
                    debug!(policy = %parsed, "Overriding pricing policy from environment");
                    self.pricing.policy = parsed;
                }
                Err(e) => warn!(policy = %policy, error = %e, "Ignoring pricing policy from environment"),
            }
        }

        if let Some(symbol) = lookup("WHOLESALE_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        let symbol_len = self.display.currency_symbol.chars().count();
        if symbol_len == 0 || symbol_len > MAX_CURRENCY_SYMBOL_LEN {
            return Err(ConfigError::Invalid(format!(
                "display.currency_symbol must be 1 to {} characters",
                MAX_CURRENCY_SYMBOL_LEN
            )));
        }

        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("database.path must not be empty".into()));
            }
        }

        Ok(())
    }

    /// The database file to open, creating its directory when needed.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        let path = match &self.database.path {
            Some(path) => path.clone(),
            None => Self::project_dirs()
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .join(DB_FILE_NAME),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(path)
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "wholesale", "wholesale-ledger")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
