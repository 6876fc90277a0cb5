//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, if `COVERA_DB_PATH` is set
//! 2. Otherwise the first config file found by [`find_config_file`]
//!
//! ## Environment Variables
//! - `COVERA_DB_PATH`: SQLite database file (required for env loading)
//! - `COVERA_DB_POOL_SIZE`: Connection pool size (default 8)
//! - `COVERA_BIND_ADDR`: HTTP listen address (default `127.0.0.1:8080`)
//! - `COVERA_NOTIFY_WEBHOOK`: Mail relay webhook URL (optional)
//! - `COVERA_NOTIFY_RECIPIENT`: Notification recipient (default `ops@localhost`)
//! - `COVERA_LOG_JSON`: JSON log output (true/false)
//! - `COVERA_CURRENCY_SYMBOL`: Symbol for display amounts (default `$`)
//!
//! ## File Locations
//! `config.{json,toml}` and `covera.{json,toml}` in the working directory,
//! then the same names beside the executable.

use std::path::{Path, PathBuf};

use covera_domain::{
    default_bind_addr, default_currency_symbol, default_pool_size, default_recipient, Config,
    CoveraError, DatabaseConfig, DisplayConfig, LoggingConfig, NotificationConfig, Result,
    ServerConfig,
};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "covera.json", "covera.toml"];

/// Load configuration from the environment, falling back to a config file.
///
/// # Errors
/// Returns `CoveraError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Environment configuration unavailable, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables.
///
/// # Errors
/// Returns `CoveraError::Config` if `COVERA_DB_PATH` is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let path = env_var("COVERA_DB_PATH")?;
    let pool_size = match std::env::var("COVERA_DB_POOL_SIZE") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| CoveraError::Config(format!("Invalid pool size: {e}")))?,
        Err(_) => default_pool_size(),
    };

    Ok(Config {
        database: DatabaseConfig { path, pool_size },
        server: ServerConfig {
            bind_addr: std::env::var("COVERA_BIND_ADDR").unwrap_or_else(|_| default_bind_addr()),
        },
        notifications: NotificationConfig {
            webhook_url: std::env::var("COVERA_NOTIFY_WEBHOOK").ok().filter(|s| !s.trim().is_empty()),
            recipient: std::env::var("COVERA_NOTIFY_RECIPIENT")
                .unwrap_or_else(|_| default_recipient()),
        },
        logging: LoggingConfig { json: env_bool("COVERA_LOG_JSON", false) },
        display: DisplayConfig {
            currency_symbol: std::env::var("COVERA_CURRENCY_SYMBOL")
                .unwrap_or_else(|_| default_currency_symbol()),
        },
    })
}

/// Load configuration from a file, or from the first candidate location when
/// `path` is `None`. Format follows the extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `CoveraError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) if p.exists() => p,
        Some(p) => {
            return Err(CoveraError::Config(format!("Config file not found: {}", p.display())))
        }
        None => find_config_file().ok_or_else(|| {
            CoveraError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CoveraError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CoveraError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CoveraError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CoveraError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the working directory or beside the
/// executable.
pub fn find_config_file() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CoveraError::Config(format!("Missing required environment variable: {key}")))
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
