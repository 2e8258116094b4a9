//! UI widgets for the price widget

pub mod oracle_tabs;
pub mod value_grid;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::WidgetView;

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, view: &WidgetView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Oracle tabs
            Constraint::Min(0),    // Value grid
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    oracle_tabs::draw(frame, view, chunks[0]);
    value_grid::draw(frame, view, chunks[1]);
    draw_footer(frame, view, chunks[2]);
}

fn draw_footer(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let color = if view.failing { Color::Yellow } else { Color::DarkGray };
    let footer_text = format!(" {} | q=quit ←/→=oracle 1/2=select", view.status_line);

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
