//! Application configuration.
//!
//! Settings load from a TOML file with per-field defaults, so a missing
//! file or a partial one both yield a runnable configuration pointed at
//! the futures testnet. API credentials never live in the file; they are
//! read from the environment at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use usdm_client::Credentials;

use crate::error::{AppError, AppResult};

/// Environment variable naming the config file, overridden by `--config`.
pub const CONFIG_ENV: &str = "USDM_BOT_CONFIG";

const API_KEY_ENV: &str = "BINANCE_API_KEY";
const SECRET_KEY_ENV: &str = "BINANCE_SECRET_KEY";

/// Exchange endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// REST base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://testnet.binancefuture.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Retry settings for exchange calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per call, counting the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Backoff delay in seconds before the first retry; doubles per retry.
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_secs() -> u64 {
    1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay_secs(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files.
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Log file name prefix.
    #[serde(default = "default_log_prefix")]
    pub file_prefix: String,
    /// Level filter applied when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "trading.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file_prefix: default_log_prefix(),
            level: default_log_level(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Resolve the config path (CLI flag, then `USDM_BOT_CONFIG`, then
    /// `config.toml`) and load it, falling back to defaults when the file
    /// does not exist.
    pub fn load(path_override: Option<&str>) -> AppResult<Self> {
        let path = path_override
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| "config.toml".to_string());

        if Path::new(&path).exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

/// Read API credentials from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`.
pub fn credentials_from_env() -> AppResult<Credentials> {
    let api_key = std::env::var(API_KEY_ENV)
        .map_err(|_| AppError::Config(format!("Missing Binance API credentials: set {API_KEY_ENV}.")))?;
    let secret_key = std::env::var(SECRET_KEY_ENV)
        .map_err(|_| AppError::Config(format!("Missing Binance API credentials: set {SECRET_KEY_ENV}.")))?;
    Ok(Credentials::new(api_key, secret_key))
}
