//! Price Poller
//!
//! Owns the poll timer. `start` fetches immediately and then on every
//! interval; `set_source` switches oracle without touching the timer phase;
//! `stop` disarms the timer.
//!
//! ```text
//!            start()                      stop() / drop
//!   Idle ─────────────────▶ Polling ─────────────────────▶ Idle
//!                             │  ▲
//!                             └──┘ tick: fetch(selected)
//!                                  ok  → previous ← current, current ← quote
//!                                  err → state untouched, PollEvent::Failed
//! ```
//!
//! A failed fetch never stops the loop; the next tick is the retry. A result
//! for an oracle that was deselected while its fetch was in flight is dropped.

mod state;

pub use state::{PollEvent, PollState, SharedPollState};

use crate::domain::{OracleSource, PriceQuote};
use crate::infrastructure::client::oracle::{PriceFetcher, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Default poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// One Idle → Polling → Idle cycle
struct PollRun {
    /// Cleared under the state write lock by `stop`
    alive: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Timer-driven price poller
pub struct Poller {
    fetcher: Arc<dyn PriceFetcher>,
    interval: Duration,
    state: SharedPollState,
    events: mpsc::UnboundedSender<PollEvent>,
    runtime: Handle,
    run: Option<PollRun>,
}

impl Poller {
    /// Create an idle poller. Returns the receiving end of the event channel.
    pub fn new(
        fetcher: Arc<dyn PriceFetcher>,
        source: OracleSource,
        interval: Duration,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<PollEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        let poller = Self {
            fetcher,
            interval,
            state: Arc::new(RwLock::new(PollState::new(source))),
            events,
            runtime,
            run: None,
        };

        (poller, receiver)
    }

    /// Idle → Polling. Fetches once right away, then every interval.
    /// No-op while already polling.
    pub fn start(&mut self) {
        if self.is_polling() {
            return;
        }

        let alive = Arc::new(AtomicBool::new(true));
        let task = self.runtime.spawn(poll_loop(
            self.fetcher.clone(),
            self.state.clone(),
            self.events.clone(),
            alive.clone(),
            self.interval,
        ));

        info!(
            "[Poller] Started ({} every {:?})",
            self.state.read().selected,
            self.interval
        );
        self.run = Some(PollRun { alive, task });
    }

    /// Polling → Idle. After this returns no fetch result is applied and no
    /// event is emitted, even for a fetch that was already in flight.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };

        {
            let _state = self.state.write();
            run.alive.store(false, Ordering::Release);
        }
        run.task.abort();

        info!("[Poller] Stopped");
    }

    /// Switch oracle. The timer keeps its phase; the next tick uses `source`.
    pub fn set_source(&self, source: OracleSource) {
        let mut state = self.state.write();
        if state.select(source) {
            info!("[Poller] Oracle switched to {}", source);
        }
    }

    pub fn is_polling(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.task.is_finished())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Copy of the current poll state
    pub fn snapshot(&self) -> PollState {
        self.state.read().clone()
    }

    /// Handle to the shared state for readers that outlive a snapshot
    pub fn shared_state(&self) -> SharedPollState {
        self.state.clone()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(
    fetcher: Arc<dyn PriceFetcher>,
    state: SharedPollState,
    events: mpsc::UnboundedSender<PollEvent>,
    alive: Arc<AtomicBool>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately
        ticker.tick().await;

        let source = state.read().selected;
        debug!("[Poller] Fetching from {}", source);
        let result = fetcher.fetch(source).await;

        if !apply_result(&state, &events, &alive, source, result) {
            break;
        }
    }
}

/// Apply one fetch result. Returns `false` once the run has been stopped.
fn apply_result(
    state: &SharedPollState,
    events: &mpsc::UnboundedSender<PollEvent>,
    alive: &AtomicBool,
    source: OracleSource,
    result: Result<PriceQuote>,
) -> bool {
    let mut state = state.write();
    if !alive.load(Ordering::Acquire) {
        return false;
    }

    // Oracle switched while this fetch was in flight
    if state.selected != source {
        debug!(
            "[Poller] Discarding {} result, {} is selected now",
            source, state.selected
        );
        return true;
    }

    let event = match result {
        Ok(quote) => {
            debug!("[Poller] {} price: {:.2}", quote.source, quote.value);
            state.record(quote);
            PollEvent::Updated(quote)
        }
        Err(error) => {
            warn!("[Poller] Fetch from {} failed: {}", source, error);
            PollEvent::Failed { source, error }
        }
    };

    // Sent under the lock so nothing is emitted after `stop` returns.
    // A dropped receiver is fine: the state still updates.
    let _ = events.send(event);
    true
}
