//! Main application state and logic for the widget

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use super::state::{FeedStatus, WidgetView};
use crate::application::poller::{PollEvent, Poller};
use crate::domain::OracleSource;
use crate::infrastructure::client::oracle::OracleAdapter;
use crate::infrastructure::config::WidgetConfig;

/// Main application state
pub struct App {
    /// Owns the poll task; dropping the app stops polling
    poller: Poller,
    /// Poll outcomes, drained every UI tick
    events: UnboundedReceiver<PollEvent>,
    /// Feed health shown in the footer
    pub status: FeedStatus,
    /// Wall clock shown in the Time cell
    pub clock: DateTime<Local>,
    clock_interval: Duration,
    last_clock_tick: Instant,
    /// Whether to quit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        poller: Poller,
        events: UnboundedReceiver<PollEvent>,
        clock_interval: Duration,
    ) -> Self {
        Self {
            poller,
            events,
            status: FeedStatus::default(),
            clock: Local::now(),
            clock_interval,
            last_clock_tick: Instant::now(),
            should_quit: false,
        }
    }

    /// Build the production oracle adapter and start polling
    pub fn initialize(runtime: Handle, config: &WidgetConfig) -> Result<Self> {
        let adapter = OracleAdapter::from_config(config)?;
        let source = config.initial_oracle()?;

        let (mut poller, events) =
            Poller::new(Arc::new(adapter), source, config.poll_interval(), runtime);
        poller.start();

        info!("[Widget] Initialized with {}", source);
        Ok(Self::new(poller, events, config.clock_interval()))
    }

    pub fn selected(&self) -> OracleSource {
        self.poller.snapshot().selected
    }

    pub fn select(&mut self, source: OracleSource) {
        self.poller.set_source(source);
    }

    pub fn next_oracle(&mut self) {
        self.select(self.selected().next());
    }

    pub fn prev_oracle(&mut self) {
        self.select(self.selected().prev());
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.next_oracle(),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.prev_oracle(),
            KeyCode::Char('1') => self.select(OracleSource::Chainlink),
            KeyCode::Char('2') => self.select(OracleSource::Band),
            _ => {}
        }
    }

    /// Drain poll events and advance the clock. Never blocks.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!("[Widget] {:?}", event);
            self.status.apply(&event);
        }

        if self.last_clock_tick.elapsed() >= self.clock_interval {
            self.clock = Local::now();
            self.last_clock_tick = Instant::now();
        }
    }

    pub fn view(&self) -> WidgetView {
        WidgetView::build(&self.poller.snapshot(), &self.status, self.clock)
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_polling()
    }

    /// Stop polling before the terminal is torn down
    pub fn shutdown(&mut self) {
        info!("[Widget] Shutting down...");
        self.poller.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::widget::ui;
    use crate::domain::{Direction, PriceQuote};
    use crate::infrastructure::client::oracle::{PriceFetcher, Result as OracleResult};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;
    use std::collections::VecDeque;

    /// Serves a fixed sequence of prices, then never completes
    struct PriceScript(Mutex<VecDeque<f64>>);

    impl PriceScript {
        fn new(prices: &[f64]) -> Arc<Self> {
            Arc::new(Self(Mutex::new(prices.iter().copied().collect())))
        }
    }

    #[async_trait]
    impl PriceFetcher for PriceScript {
        async fn fetch(&self, source: OracleSource) -> OracleResult<PriceQuote> {
            let next = self.0.lock().pop_front();
            match next {
                Some(value) => Ok(PriceQuote::new(value, source)),
                None => std::future::pending().await,
            }
        }
    }

    fn app(prices: &[f64]) -> App {
        let (mut poller, events) = Poller::new(
            PriceScript::new(prices),
            OracleSource::Chainlink,
            Duration::from_secs(5),
            Handle::current(),
        );
        poller.start();
        App::new(poller, events, Duration::from_secs(1))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Tick the app until it has seen `updates` successful polls
    async fn wait_for_updates(app: &mut App, updates: u64) {
        while app.status.updates < updates {
            tokio::time::sleep(Duration::from_millis(10)).await;
            app.on_tick();
        }
    }

    fn render(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let view = app.view();
        terminal.draw(|frame| ui::draw(frame, &view)).unwrap();
        terminal
    }

    /// Position of the first occurrence of `needle` in the rendered buffer
    fn find(terminal: &Terminal<TestBackend>, needle: &str) -> Option<(u16, u16)> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width;

        for y in 0..buffer.area.height {
            let row: String = (0..width).map(|x| buffer[(x, y)].symbol()).collect();
            if let Some(offset) = row.find(needle) {
                // Borders are multi-byte, count columns not bytes
                let col = row[..offset].chars().count();
                return Some((col as u16, y));
            }
        }
        None
    }

    #[tokio::test(start_paused = true)]
    async fn test_rendered_price_follows_direction() {
        let mut app = app(&[100.004, 103.2]);

        let terminal = render(&app);
        assert!(find(&terminal, "Chainlink").is_some());
        assert!(find(&terminal, "Band Protocol").is_some());
        assert!(find(&terminal, "ETH/USD").is_some());
        for label in ["Oracle", "Price Feed", "USD", "Time"] {
            assert!(find(&terminal, label).is_some(), "missing label {}", label);
        }

        wait_for_updates(&mut app, 1).await;
        let terminal = render(&app);
        let (x, y) = find(&terminal, "$100.00").expect("first price rendered");
        assert_ne!(terminal.backend().buffer()[(x, y)].fg, Color::Green);
        assert_eq!(app.view().direction, Direction::Neutral);

        wait_for_updates(&mut app, 2).await;
        let terminal = render(&app);
        let (x, y) = find(&terminal, "$103.20").expect("second price rendered");
        assert_eq!(app.view().direction, Direction::Up);
        assert_eq!(terminal.backend().buffer()[(x, y)].fg, Color::Green);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_switch_oracle() {
        let mut app = app(&[]);
        assert_eq!(app.selected(), OracleSource::Chainlink);

        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.selected(), OracleSource::Band);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.selected(), OracleSource::Chainlink);
        app.handle_key(press(KeyCode::Char('h')));
        assert_eq!(app.selected(), OracleSource::Band);
        app.handle_key(press(KeyCode::Char('1')));
        assert_eq!(app.selected(), OracleSource::Chainlink);
        app.handle_key(press(KeyCode::Char('2')));
        assert_eq!(app.selected(), OracleSource::Band);

        assert!(!app.should_quit);
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ctrl_c_quits_and_release_is_ignored() {
        let mut app = app(&[]);

        let mut release = press(KeyCode::Right);
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert_eq!(app.selected(), OracleSource::Chainlink);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_polling() {
        let mut app = app(&[1.0]);
        assert!(app.is_polling());

        app.shutdown();
        assert!(!app.is_polling());
    }
}
