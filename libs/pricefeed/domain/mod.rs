//! Domain Layer
//!
//! Core types for the price widget. No I/O happens here.

pub mod direction;
pub mod quote;

pub use direction::Direction;
pub use quote::{OracleSource, ParseOracleSourceError, PriceQuote, PRICE_FEED_PAIR};
