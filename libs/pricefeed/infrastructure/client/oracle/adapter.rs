//! Price Source Adapter
//!
//! Routes a fetch to the oracle selected by [`OracleSource`] and stamps the
//! result as a [`PriceQuote`].

use super::band::{fetch_off_chain_price, BandClient};
use super::chainlink::{fetch_on_chain_price, ChainClient, EthersChainClient};
use super::error::Result;
use crate::domain::{OracleSource, PriceQuote};
use crate::infrastructure::config::WidgetConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can produce a quote for a given source
#[async_trait]
pub trait PriceFetcher: Send + Sync + 'static {
    async fn fetch(&self, source: OracleSource) -> Result<PriceQuote>;
}

/// Production fetcher over both oracles
pub struct OracleAdapter {
    chain: Arc<dyn ChainClient>,
    band: BandClient,
}

impl OracleAdapter {
    pub fn new(chain: Arc<dyn ChainClient>, band: BandClient) -> Self {
        Self { chain, band }
    }

    /// Build the production adapter: ethers RPC client plus Band HTTP client
    pub fn from_config(config: &WidgetConfig) -> Result<Self> {
        let chain = EthersChainClient::new(&config.rpc_url, &config.aggregator_address)?;
        let band = BandClient::with_base_url(
            config.band_api_url.clone(),
            config.symbol.clone(),
            config.request_timeout(),
        )?;

        Ok(Self::new(Arc::new(chain), band))
    }

    pub fn band(&self) -> &BandClient {
        &self.band
    }
}

#[async_trait]
impl PriceFetcher for OracleAdapter {
    async fn fetch(&self, source: OracleSource) -> Result<PriceQuote> {
        let value = match source {
            OracleSource::Chainlink => fetch_on_chain_price(self.chain.as_ref()).await?,
            OracleSource::Band => fetch_off_chain_price(&self.band).await?,
        };

        Ok(PriceQuote::new(value, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::client::oracle::{OracleError, RoundData};
    use ethers::types::I256;
    use std::time::Duration;

    struct FixedRound(i64);

    #[async_trait]
    impl ChainClient for FixedRound {
        async fn latest_round_data(&self) -> Result<RoundData> {
            Ok(RoundData::with_answer(I256::from_dec_str(&self.0.to_string()).unwrap()))
        }
    }

    fn unreachable_band() -> BandClient {
        // Port 9 (discard) on localhost is not an HTTP server
        BandClient::with_base_url("http://127.0.0.1:9/", "ETH", Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn test_dispatches_chainlink() {
        let adapter = OracleAdapter::new(Arc::new(FixedRound(250_000_000_000)), unreachable_band());

        let quote = adapter.fetch(OracleSource::Chainlink).await.unwrap();
        assert_eq!(quote.value, 2500.0);
        assert_eq!(quote.source, OracleSource::Chainlink);
    }

    #[test]
    fn test_from_config() {
        let mut config = WidgetConfig::default();
        assert!(OracleAdapter::from_config(&config).is_ok());

        config.rpc_url = "::not a url::".to_string();
        assert!(matches!(
            OracleAdapter::from_config(&config),
            Err(OracleError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_dispatches_band() {
        let adapter = OracleAdapter::new(Arc::new(FixedRound(250_000_000_000)), unreachable_band());

        let err = adapter.fetch(OracleSource::Band).await.unwrap_err();
        assert!(matches!(err, OracleError::Network(_)));
    }
}
