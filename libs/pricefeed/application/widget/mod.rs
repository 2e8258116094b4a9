//! Price Widget
//!
//! Terminal UI showing the selected oracle, the ETH/USD pair, the latest
//! price colored by direction and a live clock.

pub mod app;
pub mod format;
pub mod state;
pub mod ui;

pub use app::App;
pub use format::{direction_color, format_clock, format_price};
pub use state::{FeedStatus, WidgetView};
