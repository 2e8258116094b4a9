//! External API clients

pub mod oracle;

pub use oracle::{
    BandClient, ChainClient, EthersChainClient, OracleAdapter, OracleError, PriceFetcher,
};
