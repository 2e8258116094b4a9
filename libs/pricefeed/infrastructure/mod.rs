//! Infrastructure Layer
//!
//! Contains implementations of external interfaces (oracle clients, config,
//! logging). This layer depends on the domain layer but not on the
//! application layer.

pub mod client;
pub mod config;
pub mod heartbeat;
pub mod logging;
pub mod shutdown;

// Re-export commonly used types from client
pub use client::oracle::{
    fetch_off_chain_price, fetch_on_chain_price, BandClient, ChainClient, EthersChainClient,
    OracleAdapter, OracleError, PriceFetcher, RoundData,
};

// Re-export config types
pub use config::{ConfigError, WidgetConfig};

// Re-export infrastructure services
pub use heartbeat::Heartbeat;
pub use logging::{init_file_tracing, init_tracing};
pub use shutdown::ShutdownManager;
