//! Oracle Price Sources
//!
//! Reads the ETH/USD price from Chainlink (on-chain aggregator) and Band
//! Protocol (HTTP API).
//!
//! # Usage
//!
//! ```rust,ignore
//! use pricefeed::infrastructure::client::oracle::{
//!     BandClient, EthersChainClient, OracleAdapter, PriceFetcher,
//! };
//! use pricefeed::domain::OracleSource;
//! use std::sync::Arc;
//!
//! let chain = Arc::new(EthersChainClient::mainnet("https://eth.merkle.io")?);
//! let adapter = OracleAdapter::new(chain, BandClient::new()?);
//!
//! let quote = adapter.fetch(OracleSource::Chainlink).await?;
//! println!("ETH price: ${:.2}", quote.value);
//! ```

mod adapter;
mod band;
mod chainlink;
mod error;
mod types;

pub use adapter::{OracleAdapter, PriceFetcher};
pub use band::{fetch_off_chain_price, parse_price_response, BandClient, BAND_API_URL, DEFAULT_SYMBOL};
pub use chainlink::{
    fetch_on_chain_price, ChainClient, EthersChainClient, DEFAULT_RPC_URL, ETH_USD_AGGREGATOR,
};
pub use error::{OracleError, Result};
pub use types::{BandPriceResponse, BandPriceResult, RoundData, CHAINLINK_ANSWER_SCALE};
