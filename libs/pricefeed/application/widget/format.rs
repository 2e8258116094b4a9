//! Display formatting for prices, clock and direction

use crate::domain::{Direction, PriceQuote};
use chrono::{DateTime, TimeZone};
use ratatui::style::Color;
use std::fmt::Display;

/// Shown in place of a price before the first successful fetch
pub const NO_PRICE: &str = "-";

/// `$1234.57`, or `-` when there is no quote yet
pub fn format_price(quote: Option<&PriceQuote>) -> String {
    match quote {
        Some(quote) => format!("${:.2}", quote.value),
        None => NO_PRICE.to_string(),
    }
}

/// `M/D/YYYY, h:mm:ss AM/PM`
pub fn format_clock<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn direction_color(direction: Direction) -> Color {
    match direction {
        Direction::Up => Color::Green,
        Direction::Down => Color::Red,
        Direction::Neutral => Color::Reset,
    }
}
