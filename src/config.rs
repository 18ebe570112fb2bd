//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-guard.toml` in current directory
//! 4. `~/.config/sql-guard/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [validator]
//! dialect = "postgresql"        # generic, mysql, postgresql, sqlite, clickhouse
//! strict_grammar = true
//! keywords = ["DROP", "DELETE"] # replaces the built-in list
//! functions = ["pg_sleep"]
//! patterns = ['\.\./']
//! injection_patterns = ['--']
//!
//! [sanitize]
//! max_length = 1000
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_GUARD_DIALECT` | Dialect name |
//! | `SQL_GUARD_STRICT_GRAMMAR` | `true`/`false` |
//! | `SQL_GUARD_SANITIZE_MAX_LENGTH` | Sanitizer length cap |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    error::{AppResult, config_error},
    preprocessor::DEFAULT_SANITIZE_LIMIT,
    validator::SqlDialect
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub sanitize:  SanitizeConfig
}

/// Validator configuration
///
/// Unset deny-lists keep the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub dialect:            SqlDialect,
    pub strict_grammar:     bool,
    pub keywords:           Option<Vec<String>>,
    pub functions:          Option<Vec<String>>,
    pub patterns:           Option<Vec<String>>,
    pub injection_patterns: Option<Vec<String>>
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            dialect:            SqlDialect::default(),
            strict_grammar:     true,
            keywords:           None,
            functions:          None,
            patterns:           None,
            injection_patterns: None
        }
    }
}

/// Prompt-input sanitizer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    pub max_length: usize
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_SANITIZE_LIMIT
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-guard.toml)
    /// 3. Config file in home directory (~/.config/sql-guard/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-guard")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".sql-guard.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env(|name| env::var(name).ok())?;
        Ok(config)
    }

    /// Read one TOML config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse TOML config text
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Override settings from environment-style variables supplied by
    /// `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(name) = lookup("SQL_GUARD_DIALECT") {
            self.validator.dialect = SqlDialect::from_name(&name)
                .ok_or_else(|| config_error(format!("Unknown SQL dialect '{}'", name)))?;
        }

        if let Some(value) = lookup("SQL_GUARD_STRICT_GRAMMAR") {
            self.validator.strict_grammar = parse_flag(&value).ok_or_else(|| {
                config_error(format!(
                    "SQL_GUARD_STRICT_GRAMMAR must be true or false, got '{}'",
                    value
                ))
            })?;
        }

        if let Some(value) = lookup("SQL_GUARD_SANITIZE_MAX_LENGTH") {
            self.sanitize.max_length = value.trim().parse().map_err(|_| {
                config_error(format!(
                    "SQL_GUARD_SANITIZE_MAX_LENGTH must be a number, got '{}'",
                    value
                ))
            })?;
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None
    }
}
