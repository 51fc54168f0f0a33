//! Pair selector component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::format::format_quick_price;
use crate::store::DashboardView;

/// Renders one tab per pair with its latest quick price and change.
pub fn render(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let mut spans: Vec<Span> = Vec::new();

    for (i, (symbol, record)) in view.previews.iter().enumerate() {
        let is_active = *symbol == view.selected;

        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        spans.push(Span::styled(format!(" {} {} ", i + 1, symbol.as_str()), style));
        if let Some(record) = record {
            let change_color = if record.change_percent >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            spans.push(Span::raw(format!(" {}", format_quick_price(record.price))));
            spans.push(Span::styled(
                format!(" {:+.2}%", record.change_percent),
                Style::default().fg(change_color),
            ));
        }
        spans.push(Span::raw("  "));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    frame.render_widget(para, area);
}
