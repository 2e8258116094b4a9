//! Oracle response types
//!
//! Raw shapes returned by the Chainlink aggregator and the Band price API,
//! plus their conversion into a decimal USD price.

use super::error::{OracleError, Result};
use ethers::types::{I256, U256};
use serde::Deserialize;
use serde_json::Value;

/// Fixed-point divisor of the ETH/USD aggregator answer (8 decimals)
pub const CHAINLINK_ANSWER_SCALE: f64 = 1e8;

/// Decoded `latestRoundData()` tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u128,
    pub answer: I256,
    pub started_at: U256,
    pub updated_at: U256,
    pub answered_in_round: u128,
}

impl RoundData {
    /// Round data with only the answer set (other fields zeroed)
    pub fn with_answer(answer: I256) -> Self {
        Self {
            round_id: 0,
            answer,
            started_at: U256::zero(),
            updated_at: U256::zero(),
            answered_in_round: 0,
        }
    }

    /// Answer scaled down to a decimal USD price
    pub fn price(&self) -> Result<f64> {
        if self.answer <= I256::zero() {
            return Err(OracleError::Decode(format!(
                "Aggregator answer must be positive, got {}",
                self.answer
            )));
        }

        let raw = u128::try_from(self.answer.into_raw()).map_err(|_| {
            OracleError::Decode(format!("Aggregator answer out of range: {}", self.answer))
        })?;

        Ok(raw as f64 / CHAINLINK_ANSWER_SCALE)
    }
}

/// Body of `GET /api/oracle/v1/request_prices`
#[derive(Debug, Deserialize)]
pub struct BandPriceResponse {
    pub price_results: Vec<BandPriceResult>,
}

/// One entry of `price_results`.
///
/// `px` and `multiplier` are 64-bit integers; the live API sends them as
/// strings, so both encodings are accepted.
#[derive(Debug, Deserialize)]
pub struct BandPriceResult {
    #[serde(default)]
    pub symbol: Option<String>,
    pub px: Value,
    pub multiplier: Value,
}

impl BandPriceResult {
    /// `px / multiplier`
    pub fn price(&self) -> Result<f64> {
        let px = numeric_field(&self.px, "px")?;
        let multiplier = numeric_field(&self.multiplier, "multiplier")?;

        if multiplier == 0.0 {
            return Err(OracleError::Decode("multiplier is zero".to_string()));
        }

        Ok(px / multiplier)
    }
}

fn numeric_field(value: &Value, name: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| OracleError::Decode(format!("{} is not representable: {}", name, n))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| OracleError::Decode(format!("{} is not numeric: {:?}", name, s))),
        other => Err(OracleError::Decode(format!(
            "{} has unexpected type: {}",
            name, other
        ))),
    }
}
