//! Price Watch - headless ETH/USD poller
//!
//! Polls the configured oracle and logs every update until Ctrl+C.
//! Optional argument: the oracle to watch (`chainlink` or `band`).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{info, warn};

use eth_price_widget::bin_common::{load_widget_config, parse_args, ConfigType};
use eth_price_widget::pricefeed::application::widget::format_price;
use eth_price_widget::pricefeed::{
    init_tracing, Heartbeat, OracleAdapter, OracleSource, PollEvent, Poller, ShutdownManager,
    PRICE_FEED_PAIR,
};

/// Heartbeat summary interval
const HEARTBEAT_INTERVAL_SECS: u64 = 60;

/// How often the event channel is drained
const DRAIN_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = load_widget_config(ConfigType::Widget)?;
    init_tracing(&config.log_level);
    config.log();

    let source = match parse_args().first() {
        Some(arg) => arg.parse::<OracleSource>()?,
        None => config.initial_oracle()?,
    };

    info!("");
    info!("========================================");
    info!("Starting price watch ({})", source);
    info!("Press Ctrl+C to stop");
    info!("========================================");
    info!("");

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();

    let adapter = OracleAdapter::from_config(&config)?;
    let (mut poller, mut events) = Poller::new(
        Arc::new(adapter),
        source,
        config.poll_interval(),
        tokio::runtime::Handle::current(),
    );
    poller.start();

    let mut heartbeat = Heartbeat::new(HEARTBEAT_INTERVAL_SECS);

    while shutdown.is_running() {
        loop {
            match events.try_recv() {
                Ok(PollEvent::Updated(quote)) => {
                    heartbeat.record_update();
                    let state = poller.snapshot();
                    info!(
                        "[Watch] {} {} = {} ({:?})",
                        quote.source,
                        PRICE_FEED_PAIR,
                        format_price(Some(&quote)),
                        state.direction()
                    );
                }
                Ok(PollEvent::Failed { source, error }) => {
                    heartbeat.record_failure();
                    warn!("[Watch] {} unavailable: {}", source, error);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("[Watch] Poller event channel closed");
                    shutdown.trigger();
                    break;
                }
            }
        }

        if heartbeat.should_beat() {
            info!("[Heartbeat] {}", heartbeat.beat());
        }

        shutdown.interruptible_sleep(DRAIN_INTERVAL).await;
    }

    poller.stop();

    info!("");
    info!("========================================");
    info!("Price watch stopped gracefully");
    info!("========================================");

    Ok(())
}
