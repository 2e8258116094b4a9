//! CLI utilities for binaries
//!
//! Handles configuration loading and environment variables
//! for all binary executables.

use pricefeed::infrastructure::config::{ConfigError, WidgetConfig};
use std::path::PathBuf;
use tracing::info;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Widget configuration (widget_config.yaml)
    Widget,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Widget => "config/widget_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Environment variable that overrides the path. An explicit custom
    /// path is never overridden.
    pub fn env_var_name(&self) -> Option<&str> {
        match self {
            ConfigType::Widget => Some("WIDGET_CONFIG_PATH"),
            ConfigType::Custom(_) => None,
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use eth_price_widget::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Widget);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    config_type
        .env_var_name()
        .and_then(|name| std::env::var(name).ok())
        .unwrap_or_else(|| config_type.default_path().to_string())
        .into()
}

/// Resolve the config path, then load it (defaults if the file is missing)
pub fn load_widget_config(config_type: ConfigType) -> Result<WidgetConfig, ConfigError> {
    let path = load_config_from_env(config_type);
    info!("Loading configuration from {}", path.display());
    WidgetConfig::load_or_default(path)
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_type_paths() {
        assert_eq!(ConfigType::Widget.default_path(), "config/widget_config.yaml");

        let custom = ConfigType::Custom("custom/path.yaml".to_string());
        assert_eq!(custom.default_path(), "custom/path.yaml");
    }

    #[test]
    fn test_config_type_env_vars() {
        assert_eq!(ConfigType::Widget.env_var_name(), Some("WIDGET_CONFIG_PATH"));
        assert_eq!(ConfigType::Custom("x.yaml".to_string()).env_var_name(), None);
    }
}
