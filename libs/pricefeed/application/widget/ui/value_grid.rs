//! Value grid - Oracle, Price Feed, USD and Time in a 2x2 layout

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::widget::format::direction_color;
use crate::application::widget::WidgetView;

pub fn draw(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = split_columns(rows[0]);
    let bottom = split_columns(rows[1]);

    draw_cell(frame, "Oracle", view.selected.display_name(), Style::default(), top[0]);
    draw_cell(frame, "Price Feed", view.pair, Style::default(), top[1]);

    let price_style = Style::default()
        .fg(direction_color(view.direction))
        .add_modifier(Modifier::BOLD);
    draw_cell(frame, "USD", &view.price_text, price_style, bottom[0]);
    draw_cell(frame, "Time", &view.clock_text, Style::default(), bottom[1]);
}

fn split_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn draw_cell(frame: &mut Frame, label: &str, value: &str, style: Style, area: Rect) {
    let title = format!(" {} ", label);

    let cell = Paragraph::new(value.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(cell, area);
}
