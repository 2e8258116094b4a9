//! Price Widget - Terminal UI for the ETH/USD oracle price
//!
//! Shows the selected oracle, the price feed pair, the latest price colored
//! by direction and a live clock. Logs go to the configured log file.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use eth_price_widget::bin_common::{load_widget_config, ConfigType};
use eth_price_widget::pricefeed::application::widget::{ui, App};
use eth_price_widget::pricefeed::init_file_tracing;

/// How long to wait for input before redrawing
const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = load_widget_config(ConfigType::Widget)?;

    // Logging must not touch the alternate screen
    if let Err(e) = init_file_tracing(&config.log_level, config.log_file_path()) {
        eprintln!("Logging disabled ({}): {}", config.log_file, e);
    }
    config.log();

    // Create tokio runtime for the poll task
    let runtime = tokio::runtime::Runtime::new()?;

    // Builds the oracle clients and starts polling
    let mut app = App::initialize(runtime.handle().clone(), &config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop polling before the runtime goes away
    app.shutdown();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.on_tick();

        let view = app.view();
        terminal.draw(|frame| ui::draw(frame, &view))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
