//! Configuration structures
//!
//! Loaded by `covera-infra::config` from the environment or a JSON/TOML file.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// SQLite database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr() }
    }
}

/// Where new-lead notifications go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Mail relay webhook; when unset notifications are only logged.
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_recipient")]
    pub recipient: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { webhook_url: None, recipient: default_recipient() }
    }
}

/// Log output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

/// How amounts are rendered in responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { currency_symbol: default_currency_symbol() }
    }
}

/// Default connection pool size
pub fn default_pool_size() -> u32 {
    8
}

/// Default listen address
pub fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Default notification recipient
pub fn default_recipient() -> String {
    "ops@localhost".to_string()
}

/// Default currency symbol
pub fn default_currency_symbol() -> String {
    "$".to_string()
}
