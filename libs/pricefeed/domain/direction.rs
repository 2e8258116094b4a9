//! Price direction between two consecutive quotes

use super::quote::PriceQuote;
use std::cmp::Ordering;

/// Direction of the latest price move, recomputed on every render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

impl Direction {
    /// Compare the current quote against the previous one, in whole cents
    /// (the precision the price is shown at).
    ///
    /// Neutral when either side is missing or when the two quotes come from
    /// different oracles.
    pub fn between(current: Option<&PriceQuote>, previous: Option<&PriceQuote>) -> Self {
        let (Some(current), Some(previous)) = (current, previous) else {
            return Direction::Neutral;
        };

        if current.source != previous.source {
            return Direction::Neutral;
        }

        match cents(current.value).cmp(&cents(previous.value)) {
            Ordering::Greater => Direction::Up,
            Ordering::Less => Direction::Down,
            Ordering::Equal => Direction::Neutral,
        }
    }
}

fn cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
