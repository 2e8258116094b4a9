//! Price quotes and oracle sources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only asset pair the widget tracks
pub const PRICE_FEED_PAIR: &str = "ETH/USD";

/// Oracle provider a quote was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleSource {
    /// On-chain aggregator contract read through an RPC node
    Chainlink,
    /// Off-chain HTTP price oracle
    Band,
}

impl OracleSource {
    /// All sources, in the order the selector shows them
    pub const ALL: [OracleSource; 2] = [OracleSource::Chainlink, OracleSource::Band];

    /// Human-readable name used by the UI
    pub fn display_name(&self) -> &'static str {
        match self {
            OracleSource::Chainlink => "Chainlink",
            OracleSource::Band => "Band Protocol",
        }
    }

    /// Position of this source in [`OracleSource::ALL`]
    pub fn index(&self) -> usize {
        match self {
            OracleSource::Chainlink => 0,
            OracleSource::Band => 1,
        }
    }

    /// The next source in selector order, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous source in selector order, wrapping around
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for OracleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown oracle: {0} (expected 'chainlink' or 'band')")]
pub struct ParseOracleSourceError(pub String);

impl FromStr for OracleSource {
    type Err = ParseOracleSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chainlink" => Ok(OracleSource::Chainlink),
            "band" | "band protocol" | "band_protocol" | "band-protocol" => Ok(OracleSource::Band),
            _ => Err(ParseOracleSourceError(s.to_string())),
        }
    }
}

/// A single price reading. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub value: f64,
    pub source: OracleSource,
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    /// Create a quote stamped with the current time
    pub fn new(value: f64, source: OracleSource) -> Self {
        Self::at(value, source, Utc::now())
    }

    pub fn at(value: f64, source: OracleSource, fetched_at: DateTime<Utc>) -> Self {
        Self {
            value,
            source,
            fetched_at,
        }
    }

    /// Seconds elapsed since this quote was fetched
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.fetched_at).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_parse_oracle_source() {
        assert_eq!("chainlink".parse::<OracleSource>().unwrap(), OracleSource::Chainlink);
        assert_eq!("Chainlink".parse::<OracleSource>().unwrap(), OracleSource::Chainlink);
        assert_eq!("band".parse::<OracleSource>().unwrap(), OracleSource::Band);
        assert_eq!("Band Protocol".parse::<OracleSource>().unwrap(), OracleSource::Band);
        assert!("pyth".parse::<OracleSource>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(OracleSource::Chainlink.to_string(), "Chainlink");
        assert_eq!(OracleSource::Band.to_string(), "Band Protocol");
    }

    #[test]
    fn test_selector_wraps() {
        assert_eq!(OracleSource::Chainlink.next(), OracleSource::Band);
        assert_eq!(OracleSource::Band.next(), OracleSource::Chainlink);
        assert_eq!(OracleSource::Chainlink.prev(), OracleSource::Band);
        assert_eq!(OracleSource::Band.prev(), OracleSource::Chainlink);
    }

    #[test]
    fn test_quote_age() {
        let fetched = Utc::now();
        let quote = PriceQuote::at(3456.78, OracleSource::Chainlink, fetched);

        assert_eq!(quote.age_secs(fetched + Duration::seconds(7)), 7);
        // Clock skew never produces a negative age
        assert_eq!(quote.age_secs(fetched - Duration::seconds(3)), 0);
    }
}
