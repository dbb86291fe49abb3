//! Configuration management for the catalog suggestion subsystem.
//!
//! Every setting is optional and read from the environment, after an optional
//! `.env` file has been loaded.

use crate::error::{ConfigError, ConfigResult};
use crate::matching::TokenScoring;
use crate::search::{IndexConfig, MAX_REBUILD_HEADROOM};
use std::env;
use std::str::FromStr;

/// Configuration for the suggestion service and its search index.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Suggestions returned when a request gives no limit (default: 10)
    pub default_limit: usize,

    /// Upper bound on the limit a request may ask for (default: 50)
    pub max_limit: usize,

    /// Longest accepted query, in characters (default: 500)
    pub max_query_length: usize,

    /// Token scoring policy for multi-word names (default: best)
    pub token_scoring: TokenScoring,

    /// Rebuild the catalog filter when incremental additions outgrow it (default: true)
    pub auto_rebuild: bool,

    /// Capacity multiplier used for filter rebuilds (default: 2.0)
    pub rebuild_headroom: f64,

    /// Names requested per catalog page while loading (default: 500)
    pub catalog_page_size: usize,

    /// Minutes between full catalog reloads, 0 disables (default: 30)
    pub catalog_refresh_minutes: u64,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SUGGEST_DEFAULT_LIMIT`: Default suggestion count (default: 10)
    /// - `SUGGEST_MAX_LIMIT`: Maximum suggestion count (default: 50)
    /// - `SUGGEST_MAX_QUERY_LENGTH`: Maximum query length in chars (default: 500)
    /// - `SUGGEST_TOKEN_SCORING`: `best` or `first` (default: best)
    /// - `SEARCH_FILTER_AUTO_REBUILD`: Rebuild outgrown filters (default: true)
    /// - `SEARCH_FILTER_REBUILD_HEADROOM`: Rebuild capacity multiplier (default: 2.0)
    /// - `CATALOG_PAGE_SIZE`: Names per catalog page (default: 500)
    /// - `CATALOG_REFRESH_MINUTES`: Reload interval, 0 disables (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let default_limit = Self::parse_env_usize("SUGGEST_DEFAULT_LIMIT", defaults.default_limit)?;
        let max_limit = Self::parse_env_usize("SUGGEST_MAX_LIMIT", defaults.max_limit)?;
        let max_query_length =
            Self::parse_env_usize("SUGGEST_MAX_QUERY_LENGTH", defaults.max_query_length)?;
        let token_scoring = Self::parse_env("SUGGEST_TOKEN_SCORING", defaults.token_scoring)?;
        let auto_rebuild = Self::parse_env_bool("SEARCH_FILTER_AUTO_REBUILD", defaults.auto_rebuild)?;
        let rebuild_headroom =
            Self::parse_env_f64("SEARCH_FILTER_REBUILD_HEADROOM", defaults.rebuild_headroom)?;
        let catalog_page_size =
            Self::parse_env_usize("CATALOG_PAGE_SIZE", defaults.catalog_page_size)?;
        let catalog_refresh_minutes =
            Self::parse_env_u64("CATALOG_REFRESH_MINUTES", defaults.catalog_refresh_minutes)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        let config = Config {
            default_limit,
            max_limit,
            max_query_length,
            token_scoring,
            auto_rebuild,
            rebuild_headroom,
            catalog_page_size,
            catalog_refresh_minutes,
            log_level,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SUGGEST_DEFAULT_LIMIT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.max_limit < self.default_limit {
            return Err(ConfigError::InvalidValue {
                var: "SUGGEST_MAX_LIMIT".to_string(),
                reason: format!(
                    "Must be at least SUGGEST_DEFAULT_LIMIT ({})",
                    self.default_limit
                ),
            });
        }

        if self.max_query_length == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SUGGEST_MAX_QUERY_LENGTH".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if !(1.0..=MAX_REBUILD_HEADROOM).contains(&self.rebuild_headroom) {
            return Err(ConfigError::InvalidValue {
                var: "SEARCH_FILTER_REBUILD_HEADROOM".to_string(),
                reason: format!(
                    "Must be between 1.0 and {}, got: {}",
                    MAX_REBUILD_HEADROOM, self.rebuild_headroom
                ),
            });
        }

        if self.catalog_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CATALOG_PAGE_SIZE".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Settings that shape the search index.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            token_scoring: self.token_scoring,
            auto_rebuild: self.auto_rebuild,
            rebuild_headroom: self.rebuild_headroom,
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as f64 with a default value.
    fn parse_env_f64(var_name: &str, default: f64) -> ConfigResult<f64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean with a default value.
    ///
    /// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable through its `FromStr` impl.
    fn parse_env<T>(var_name: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => val.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_limit: 10,
            max_limit: 50,
            max_query_length: 500,
            token_scoring: TokenScoring::BestMatch,
            auto_rebuild: true,
            rebuild_headroom: 2.0,
            catalog_page_size: 500,
            catalog_refresh_minutes: 30,
            log_level: "info".to_string(),
        }
    }
}
