//! Chainlink on-chain price feed
//!
//! Reads `latestRoundData()` from the ETH/USD aggregator proxy on Ethereum
//! mainnet. The RPC client is constructed explicitly and handed to the
//! adapter, so tests can substitute their own [`ChainClient`].

use super::error::{OracleError, Result};
use super::types::RoundData;
use async_trait::async_trait;
use ethers::contract::{abigen, ContractError};
use ethers::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// ETH/USD aggregator proxy on Ethereum mainnet
pub const ETH_USD_AGGREGATOR: &str = "0x5f4eC3Df9cbd43714FE2740f5E3616155c5b8419";

/// Public mainnet RPC used when none is configured
pub const DEFAULT_RPC_URL: &str = "https://eth.merkle.io";

abigen!(
    AggregatorV3,
    r#"[
        function latestRoundData() external view returns (uint80 roundId, int256 answer, uint256 startedAt, uint256 updatedAt, uint80 answeredInRound)
        function decimals() external view returns (uint8)
        function description() external view returns (string)
    ]"#
);

/// Read access to an on-chain price aggregator
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn latest_round_data(&self) -> Result<RoundData>;
}

/// [`ChainClient`] backed by an ethers HTTP provider
pub struct EthersChainClient {
    aggregator: AggregatorV3<Provider<Http>>,
}

impl EthersChainClient {
    /// Connect to the aggregator at `address` through `rpc_url`
    pub fn new(rpc_url: &str, address: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| OracleError::InvalidConfig(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

        let address: Address = address
            .parse()
            .map_err(|e| OracleError::InvalidConfig(format!("Invalid aggregator address {}: {}", address, e)))?;

        Ok(Self {
            aggregator: AggregatorV3::new(address, Arc::new(provider)),
        })
    }

    /// Connect to the mainnet ETH/USD aggregator
    pub fn mainnet(rpc_url: &str) -> Result<Self> {
        Self::new(rpc_url, ETH_USD_AGGREGATOR)
    }

    /// Aggregator address this client reads from
    pub fn address(&self) -> Address {
        self.aggregator.address()
    }

    /// Feed description reported by the contract (e.g. "ETH / USD")
    pub async fn description(&self) -> Result<String> {
        self.aggregator
            .description()
            .call()
            .await
            .map_err(classify_contract_error)
    }

    /// Number of decimals the aggregator answer carries
    pub async fn decimals(&self) -> Result<u8> {
        self.aggregator
            .decimals()
            .call()
            .await
            .map_err(classify_contract_error)
    }
}

#[async_trait]
impl ChainClient for EthersChainClient {
    async fn latest_round_data(&self) -> Result<RoundData> {
        let (round_id, answer, started_at, updated_at, answered_in_round) = self
            .aggregator
            .latest_round_data()
            .call()
            .await
            .map_err(classify_contract_error)?;

        debug!(
            "[Chainlink] Round {} answer {} updated at {}",
            round_id, answer, updated_at
        );

        Ok(RoundData {
            round_id,
            answer,
            started_at,
            updated_at,
            answered_in_round,
        })
    }
}

/// Split contract errors into shape problems and everything else
fn classify_contract_error<M: Middleware>(e: ContractError<M>) -> OracleError {
    match &e {
        ContractError::DecodingError(_)
        | ContractError::AbiError(_)
        | ContractError::DetokenizationError(_) => OracleError::Decode(e.to_string()),
        _ => OracleError::Network(e.to_string()),
    }
}

/// Latest ETH/USD price from the on-chain aggregator
pub async fn fetch_on_chain_price(client: &dyn ChainClient) -> Result<f64> {
    let round = client.latest_round_data().await?;
    round.price()
}
