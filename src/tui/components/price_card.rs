//! Main price card for the selected pair.

use std::time::SystemTime;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::format::{format_age, format_price, format_volume};
use crate::models::PriceRecord;
use crate::store::DashboardView;

/// Renders the price card.
///
/// Shows, in order of precedence, an error with a retry hint, a loading
/// message, a waiting message, or the latest record.
pub fn render(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let block = Block::default()
        .title(format!(" {} ", view.selected.name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = if let Some(error) = &view.error {
        vec![
            Line::from(""),
            Line::styled(error.as_str(), Style::default().fg(Color::Red)),
            Line::from(""),
            Line::styled(
                "Press r to retry connection",
                Style::default().fg(Color::DarkGray),
            ),
        ]
    } else if view.loading {
        vec![
            Line::from(""),
            Line::styled(
                format!("Loading {} price data…", view.selected.as_str()),
                Style::default().fg(Color::Yellow),
            ),
        ]
    } else if let Some(record) = &view.price {
        record_lines(record, view.selected.base_asset())
    } else {
        vec![
            Line::from(""),
            Line::styled("Waiting for data…", Style::default().fg(Color::DarkGray)),
        ]
    };

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

fn record_lines(record: &PriceRecord, base_asset: &str) -> Vec<Line<'static>> {
    let rising = record.change_percent >= 0.0;
    let change_color = if rising { Color::Green } else { Color::Red };
    let arrow = if rising { "↗" } else { "↘" };
    let label = Style::default().fg(Color::DarkGray);

    let age = SystemTime::now()
        .duration_since(record.received_at)
        .unwrap_or_default();

    vec![
        Line::from(""),
        Line::styled(
            format!("${}", format_price(record.price)),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            format!(
                "{arrow} {:+.2}% (${:.4})",
                record.change_percent,
                record.change.abs()
            ),
            Style::default().fg(change_color),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("24h High  ", label),
            Span::styled(
                format!("${}", format_price(record.high_24h)),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("24h Low   ", label),
            Span::styled(
                format!("${}", format_price(record.low_24h)),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::styled("24h Vol   ", label),
            Span::raw(format!("{} {base_asset}", format_volume(record.volume))),
        ]),
        Line::from(""),
        Line::styled(format!("Last updated {}", format_age(age)), label),
    ]
}
