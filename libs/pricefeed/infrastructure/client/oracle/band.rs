//! Band Protocol off-chain price API

use super::error::{OracleError, Result};
use super::types::BandPriceResponse;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default Band price endpoint
pub const BAND_API_URL: &str = "https://laozi1.bandchain.org/api/oracle/v1/request_prices";

/// Symbol requested from the API
pub const DEFAULT_SYMBOL: &str = "ETH";

/// Default HTTP timeout
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the Band price endpoint
#[derive(Clone)]
pub struct BandClient {
    base_url: String,
    symbol: String,
    client: Client,
}

impl BandClient {
    /// Client for the public endpoint requesting ETH
    pub fn new() -> Result<Self> {
        Self::with_base_url(
            BAND_API_URL,
            DEFAULT_SYMBOL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Client for a custom endpoint and symbol
    pub fn with_base_url(
        base_url: impl Into<String>,
        symbol: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()
            .map_err(|e| OracleError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            symbol: symbol.into(),
            client,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Request the current price and return `px / multiplier` of the first result
    pub async fn fetch_price(&self) -> Result<f64> {
        debug!("[Band] GET {} symbols={}", self.base_url, self.symbol);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("symbols", self.symbol.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Network(format!(
                "Band API returned {}",
                status
            )));
        }

        let body = response.text().await?;
        parse_price_response(&body)
    }
}

/// Parse a `request_prices` body into a decimal price
pub fn parse_price_response(body: &str) -> Result<f64> {
    let parsed: BandPriceResponse = serde_json::from_str(body)?;

    let first = parsed
        .price_results
        .first()
        .ok_or_else(|| OracleError::Decode("price_results is empty".to_string()))?;

    let price = first.price()?;
    debug!(
        "[Band] {} price: {}",
        first.symbol.as_deref().unwrap_or("?"),
        price
    );

    Ok(price)
}

/// Latest ETH/USD price from the Band HTTP API
pub async fn fetch_off_chain_price(client: &BandClient) -> Result<f64> {
    client.fetch_price().await
}
