//! Oracle selector - one tab per price source

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::application::widget::WidgetView;
use crate::domain::OracleSource;

pub fn draw(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let titles: Vec<Line> = OracleSource::ALL
        .iter()
        .map(|source| Line::from(source.display_name()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(view.selected.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" Select Oracle "));

    frame.render_widget(tabs, area);
}
