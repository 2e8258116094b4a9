//! ETH/USD Price Widget - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI)
//! - **pricefeed**: Oracle clients, poller and widget (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,no_run
//! use eth_price_widget::bin_common::{load_config_from_env, ConfigType};
//! use eth_price_widget::pricefeed::WidgetConfig;
//!
//! let config = WidgetConfig::load_or_default(load_config_from_env(ConfigType::Widget));
//! ```

// Re-export workspace libraries for convenience
pub use pricefeed;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, load_widget_config, parse_args, ConfigType};
}
