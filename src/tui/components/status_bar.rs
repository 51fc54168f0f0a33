//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::ConnectionStatus;
use crate::store::DashboardView;

/// Color used for a connection status everywhere on screen.
pub fn status_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Open => Color::Green,
        ConnectionStatus::Connecting | ConnectionStatus::Closing => Color::Yellow,
        ConnectionStatus::Closed => Color::Red,
        ConnectionStatus::Uninstantiated => Color::Gray,
    }
}

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let status_span = Span::styled(
        format!(" ● {} ", view.status.label()),
        Style::default().fg(status_color(view.status)),
    );

    let loading_span = if view.loading {
        Span::styled(" Loading… ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let error_span = if let Some(ref error) = view.error {
        Span::styled(format!(" {error} "), Style::default().fg(Color::Red))
    } else {
        Span::raw("")
    };

    let pair_info = format!(" {} ", view.selected.as_str());

    let line = Line::from(vec![
        status_span,
        Span::raw("│"),
        loading_span,
        error_span,
        Span::raw(format!(
            "{:>width$}",
            pair_info,
            width = area.width.saturating_sub(40) as usize
        )),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
