//! Oracle error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Transport or RPC failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response arrived but had an unexpected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client could not be constructed from the given settings
    #[error("Invalid oracle configuration: {0}")]
    InvalidConfig(String),
}

impl OracleError {
    pub fn is_network(&self) -> bool {
        matches!(self, OracleError::Network(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, OracleError::Decode(_))
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            OracleError::Decode(e.to_string())
        } else {
            OracleError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(e: serde_json::Error) -> Self {
        OracleError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
