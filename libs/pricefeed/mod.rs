//! ETH/USD Oracle Price Feed
//!
//! Reads the ETH/USD price from Chainlink (on-chain) or Band Protocol
//! (HTTP), polls the selected oracle on a timer and renders it in a
//! terminal widget.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{App, FeedStatus, PollEvent, PollState, Poller, WidgetView};
pub use domain::{Direction, OracleSource, PriceQuote, PRICE_FEED_PAIR};
pub use infrastructure::{
    init_file_tracing, init_tracing, BandClient, ConfigError, EthersChainClient, Heartbeat,
    OracleAdapter, OracleError, PriceFetcher, ShutdownManager, WidgetConfig,
};
