//! Ctrl+C handling for `price_watch`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::time::sleep;
use tracing::info;

/// How often a pending sleep re-checks the run flag
const CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// Shared run flag for the watch loop. Clones observe the same flag.
#[derive(Clone)]
pub struct ShutdownManager {
    flag: Arc<AtomicBool>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flip the run flag when the process receives Ctrl+C
    pub fn spawn_signal_handler(&self) {
        let manager = self.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("[Watch] Ctrl+C received, stopping");
                manager.trigger();
            }
        });
    }

    /// Ask the watch loop to finish its current pass and exit
    pub fn trigger(&self) {
        self.flag.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Wait up to `duration`; returns within one check step of a shutdown request
    pub async fn interruptible_sleep(&self, duration: Duration) {
        let mut elapsed = Duration::ZERO;

        while elapsed < duration && self.is_running() {
            let step = CHECK_INTERVAL.min(duration - elapsed);
            sleep(step).await;
            elapsed += step;
        }
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_trigger_is_shared_between_clones() {
        let manager = ShutdownManager::new();
        let clone = manager.clone();
        assert!(clone.is_running());

        manager.trigger();
        assert!(!clone.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interruptible_sleep_runs_full_duration() {
        let manager = ShutdownManager::new();
        let start = Instant::now();

        manager.interruptible_sleep(Duration::from_millis(120)).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(120));
        assert!(elapsed < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_after_trigger_returns_at_once() {
        let manager = ShutdownManager::new();
        manager.trigger();

        let start = Instant::now();
        manager.interruptible_sleep(Duration::from_secs(5)).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interruptible_sleep_wakes_on_shutdown() {
        let manager = ShutdownManager::new();
        let trigger = manager.clone();

        tokio::spawn(async move {
            sleep(Duration::from_millis(100)).await;
            trigger.trigger();
        });

        let start = Instant::now();
        manager.interruptible_sleep(Duration::from_secs(60)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
