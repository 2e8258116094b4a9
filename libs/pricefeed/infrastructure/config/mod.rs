use crate::domain::OracleSource;
use crate::infrastructure::client::oracle::{BAND_API_URL, DEFAULT_RPC_URL, DEFAULT_SYMBOL, ETH_USD_AGGREGATOR};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Price widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Ethereum JSON-RPC endpoint used for the Chainlink read
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Chainlink aggregator proxy address
    #[serde(default = "default_aggregator_address")]
    pub aggregator_address: String,
    /// Band `request_prices` endpoint
    #[serde(default = "default_band_api_url")]
    pub band_api_url: String,
    /// Symbol requested from Band
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Oracle selected at startup (chainlink, band)
    #[serde(default = "default_oracle")]
    pub default_oracle: String,
    /// Price poll interval
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Clock refresh interval
    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: u64,
    /// HTTP transport timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log destination for the terminal UI
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_aggregator_address() -> String {
    ETH_USD_AGGREGATOR.to_string()
}

fn default_band_api_url() -> String {
    BAND_API_URL.to_string()
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

fn default_oracle() -> String {
    "chainlink".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_clock_interval() -> u64 {
    1000
}

fn default_request_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/price_widget.log".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            aggregator_address: default_aggregator_address(),
            band_api_url: default_band_api_url(),
            symbol: default_symbol(),
            default_oracle: default_oracle(),
            poll_interval_secs: default_poll_interval(),
            clock_interval_ms: default_clock_interval(),
            request_timeout_secs: default_request_timeout(),
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from YAML file, then apply environment overrides
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let config: WidgetConfig = serde_yaml::from_str(&yaml_content)?;
        config.finish()
    }

    /// Like [`WidgetConfig::load`], but a missing file means defaults
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("Config file {} not found, using defaults", path.display());
            Self::default().finish()
        }
    }

    fn finish(mut self) -> Result<Self> {
        self.apply_env_overrides(|key| std::env::var(key).ok())?;
        self.validate()?;
        Ok(self)
    }

    /// Override fields from environment variables looked up through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rpc_url) = lookup("ETH_RPC_URL") {
            info!("Overriding RPC URL from environment variable");
            self.rpc_url = rpc_url;
        }

        if let Some(band_url) = lookup("BAND_API_URL") {
            info!("Overriding Band API URL from environment variable");
            self.band_api_url = band_url;
        }

        if let Some(interval) = lookup("POLL_INTERVAL_SECS") {
            self.poll_interval_secs = interval.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "POLL_INTERVAL_SECS must be an integer, got {:?}",
                    interval
                ))
            })?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rpc_url cannot be empty".to_string(),
            ));
        }

        if self.band_api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "band_api_url cannot be empty".to_string(),
            ));
        }

        if self.symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "symbol cannot be empty".to_string(),
            ));
        }

        if self.aggregator_address.parse::<Address>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "aggregator_address is not a valid address: {}",
                self.aggregator_address
            )));
        }

        self.initial_oracle()?;

        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.clock_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "clock_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(
                format!("log_level must be one of: {}", valid_levels.join(", ")),
            ));
        }

        Ok(())
    }

    /// Oracle selected at startup
    pub fn initial_oracle(&self) -> Result<OracleSource> {
        self.default_oracle
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("default_oracle: {}", e)))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(&self.log_file)
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  RPC URL: {}", self.rpc_url);
        info!("  Aggregator: {}", self.aggregator_address);
        info!("  Band API URL: {}", self.band_api_url);
        info!("  Symbol: {}", self.symbol);
        info!("  Default oracle: {}", self.default_oracle);
        info!("  Poll interval: {} seconds", self.poll_interval_secs);
        info!("  Log level: {}", self.log_level);
    }
}
