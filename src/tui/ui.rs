//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::App;
use super::components::{info_panel, price_card, status_bar, tab_bar};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let view = app.view();
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Pair selector
            Constraint::Length(1), // Status bar
            Constraint::Min(12),   // Price card + connection info
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], &view);
    status_bar::render(frame, main_layout[1], &view);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[2]);

    price_card::render(frame, content[0], &view);
    info_panel::render(frame, content[1], &view);

    render_keybindings(frame, main_layout[3]);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let line = Line::from(vec![
        Span::styled(" ←/→ 1-5", key),
        Span::raw(" select pair  "),
        Span::styled("r", key),
        Span::raw(" retry connection  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
