//! View state for the widget
//!
//! [`WidgetView`] is everything the UI draws, derived from a [`PollState`]
//! snapshot, the feed health counters and the current wall-clock time.

use super::format::{format_clock, format_price};
use crate::application::poller::{PollEvent, PollState};
use crate::domain::{Direction, OracleSource, PRICE_FEED_PAIR};
use chrono::{DateTime, Local, Utc};

/// Health of the price feed, fed by poll events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedStatus {
    pub updates: u64,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

impl FeedStatus {
    pub fn apply(&mut self, event: &PollEvent) {
        match event {
            PollEvent::Updated(_) => {
                self.updates += 1;
                self.consecutive_failures = 0;
                self.last_error = None;
            }
            PollEvent::Failed { source, error } => {
                self.consecutive_failures += 1;
                self.last_error = Some(format!("{}: {}", source, error));
            }
        }
    }

    pub fn is_failing(&self) -> bool {
        self.consecutive_failures > 0
    }
}

/// Everything a frame needs
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub selected: OracleSource,
    pub pair: &'static str,
    pub price_text: String,
    pub direction: Direction,
    pub clock_text: String,
    pub status_line: String,
    pub failing: bool,
}

impl WidgetView {
    pub fn build(state: &PollState, status: &FeedStatus, clock: DateTime<Local>) -> Self {
        Self {
            selected: state.selected,
            pair: PRICE_FEED_PAIR,
            price_text: format_price(state.current.as_ref()),
            direction: state.direction(),
            clock_text: format_clock(&clock),
            status_line: status_line(state, status, clock.with_timezone(&Utc)),
            failing: status.is_failing(),
        }
    }
}

/// Stale indicator: age of the shown quote plus the latest failure, if any
fn status_line(state: &PollState, status: &FeedStatus, now: DateTime<Utc>) -> String {
    let freshness = match &state.current {
        Some(quote) if quote.source != state.selected => format!(
            "Waiting for {} (showing {} from {}s ago)",
            state.selected,
            quote.source,
            quote.age_secs(now)
        ),
        Some(quote) => format!("Updated {}s ago", quote.age_secs(now)),
        None => format!("Waiting for first price from {}...", state.selected),
    };

    match &status.last_error {
        Some(error) if status.is_failing() => format!(
            "{} | {} failed fetch(es), last: {}",
            freshness, status.consecutive_failures, error
        ),
        _ => freshness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceQuote;
    use crate::infrastructure::client::oracle::OracleError;
    use chrono::{Duration, TimeZone};

    fn clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 15, 4, 9).unwrap()
    }

    #[test]
    fn test_feed_status_counts_failures_until_update() {
        let mut status = FeedStatus::default();
        let failed = PollEvent::Failed {
            source: OracleSource::Band,
            error: OracleError::Network("connection refused".to_string()),
        };

        status.apply(&failed);
        status.apply(&failed);
        assert_eq!(status.consecutive_failures, 2);
        assert!(status.is_failing());
        assert!(status.last_error.as_deref().unwrap().starts_with("Band Protocol"));

        status.apply(&PollEvent::Updated(PriceQuote::new(1.0, OracleSource::Band)));
        assert_eq!(status.updates, 1);
        assert!(!status.is_failing());
        assert_eq!(status.last_error, None);
    }

    #[test]
    fn test_view_before_first_price() {
        let state = PollState::new(OracleSource::Chainlink);
        let view = WidgetView::build(&state, &FeedStatus::default(), clock());

        assert_eq!(view.price_text, "-");
        assert_eq!(view.pair, "ETH/USD");
        assert_eq!(view.direction, Direction::Neutral);
        assert_eq!(view.clock_text, "3/7/2024, 3:04:09 PM");
        assert!(view.status_line.starts_with("Waiting for first price"));
    }

    #[test]
    fn test_view_keeps_last_good_price_on_failure() {
        let now = clock().with_timezone(&Utc);
        let mut state = PollState::new(OracleSource::Chainlink);
        state.record(PriceQuote::at(2500.0, OracleSource::Chainlink, now - Duration::seconds(12)));
        state.record(PriceQuote::at(2490.5, OracleSource::Chainlink, now - Duration::seconds(7)));

        let mut status = FeedStatus::default();
        status.apply(&PollEvent::Failed {
            source: OracleSource::Chainlink,
            error: OracleError::Decode("empty answer".to_string()),
        });

        let view = WidgetView::build(&state, &status, clock());
        assert_eq!(view.price_text, "$2490.50");
        assert_eq!(view.direction, Direction::Down);
        assert!(view.failing);
        assert!(view.status_line.starts_with("Updated 7s ago | 1 failed fetch(es)"));
    }

    #[test]
    fn test_view_after_source_switch() {
        let now = clock().with_timezone(&Utc);
        let mut state = PollState::new(OracleSource::Chainlink);
        state.record(PriceQuote::at(2500.0, OracleSource::Chainlink, now - Duration::seconds(3)));
        state.select(OracleSource::Band);

        let view = WidgetView::build(&state, &FeedStatus::default(), clock());
        assert_eq!(view.selected, OracleSource::Band);
        assert_eq!(view.direction, Direction::Neutral);
        assert!(view.status_line.starts_with("Waiting for Band Protocol"));
    }
}
