//! Poll state shared between the poll task and its observers

use crate::domain::{Direction, OracleSource, PriceQuote};
use crate::infrastructure::client::oracle::OracleError;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared poll state, written by the poll task and read by the UI
pub type SharedPollState = Arc<RwLock<PollState>>;

/// Latest and previous quote plus the oracle currently selected
#[derive(Debug, Clone, PartialEq)]
pub struct PollState {
    pub current: Option<PriceQuote>,
    pub previous: Option<PriceQuote>,
    pub selected: OracleSource,
}

impl PollState {
    pub fn new(selected: OracleSource) -> Self {
        Self {
            current: None,
            previous: None,
            selected,
        }
    }

    /// Shift `current` into `previous` and store the new quote
    pub fn record(&mut self, quote: PriceQuote) {
        self.previous = self.current.take();
        self.current = Some(quote);
    }

    /// Switch oracle. Clears `previous` so no direction is computed across
    /// providers. Returns `false` if `source` was already selected.
    pub fn select(&mut self, source: OracleSource) -> bool {
        if self.selected == source {
            return false;
        }
        self.selected = source;
        self.previous = None;
        true
    }

    pub fn direction(&self) -> Direction {
        Direction::between(self.current.as_ref(), self.previous.as_ref())
    }
}

/// Outcome of one poll tick, delivered to observers
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Updated(PriceQuote),
    Failed {
        source: OracleSource,
        error: OracleError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shifts_current_into_previous() {
        let mut state = PollState::new(OracleSource::Chainlink);
        let first = PriceQuote::new(100.0, OracleSource::Chainlink);
        let second = PriceQuote::new(101.0, OracleSource::Chainlink);

        state.record(first);
        assert_eq!(state.current, Some(first));
        assert_eq!(state.previous, None);

        state.record(second);
        assert_eq!(state.current, Some(second));
        assert_eq!(state.previous, Some(first));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn test_select_clears_previous_only() {
        let mut state = PollState::new(OracleSource::Chainlink);
        state.record(PriceQuote::new(100.0, OracleSource::Chainlink));
        state.record(PriceQuote::new(99.0, OracleSource::Chainlink));

        assert!(!state.select(OracleSource::Chainlink));
        assert!(state.previous.is_some());

        assert!(state.select(OracleSource::Band));
        assert_eq!(state.selected, OracleSource::Band);
        assert_eq!(state.previous, None);
        assert_eq!(state.current.map(|q| q.value), Some(99.0));
        assert_eq!(state.direction(), Direction::Neutral);
    }
}
