//! Heartbeat logging for the headless watcher

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counts poll outcomes and says when a periodic summary is due
pub struct Heartbeat {
    interval: Duration,
    last_beat: DateTime<Utc>,
    updates: u64,
    failures: u64,
}

impl Heartbeat {
    /// Create a new heartbeat with the given interval in seconds
    pub fn new(interval_secs: u64) -> Self {
        Self::starting_at(interval_secs, Utc::now())
    }

    fn starting_at(interval_secs: u64, now: DateTime<Utc>) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs),
            last_beat: now,
            updates: 0,
            failures: 0,
        }
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// Check if enough time has passed since the last beat
    pub fn should_beat(&self) -> bool {
        self.should_beat_at(Utc::now())
    }

    fn should_beat_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.last_beat);
        elapsed.to_std().unwrap_or_default() >= self.interval
    }

    /// Summary of the window since the last beat; resets the counters
    pub fn beat(&mut self) -> String {
        let summary = format!(
            "{} updates, {} failed fetches in the last {}s",
            self.updates,
            self.failures,
            self.interval.as_secs()
        );
        self.last_beat = Utc::now();
        self.updates = 0;
        self.failures = 0;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_should_beat_after_interval() {
        let start = Utc::now();
        let heartbeat = Heartbeat::starting_at(60, start);

        assert!(!heartbeat.should_beat_at(start + ChronoDuration::seconds(59)));
        assert!(heartbeat.should_beat_at(start + ChronoDuration::seconds(60)));
    }

    #[test]
    fn test_beat_summarizes_and_resets() {
        let mut heartbeat = Heartbeat::new(300);
        heartbeat.record_update();
        heartbeat.record_update();
        heartbeat.record_failure();

        assert_eq!(heartbeat.beat(), "2 updates, 1 failed fetches in the last 300s");
        assert_eq!(heartbeat.beat(), "0 updates, 0 failed fetches in the last 300s");
    }
}
