//! Connection details panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::status_bar::status_color;
use crate::store::DashboardView;

const DATA_SOURCE: &str = "Binance WebSocket API";
const UPDATE_FREQUENCY: &str = "Real-time (~1-2s)";

/// Renders the connection info panel.
pub fn render(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let block = Block::default()
        .title(" Connection Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Pair:       ", label),
            Span::raw(view.selected.as_str()),
        ]),
        Line::from(vec![
            Span::styled(" Status:     ", label),
            Span::styled(
                view.status.label(),
                Style::default().fg(status_color(view.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Source:     ", label),
            Span::raw(DATA_SOURCE),
        ]),
        Line::from(vec![
            Span::styled(" Frequency:  ", label),
            Span::raw(UPDATE_FREQUENCY),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
