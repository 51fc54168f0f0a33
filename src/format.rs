//! Display formatting for prices, volumes and update ages.

use std::time::Duration;

/// Formats a price for the main card.
///
/// Prices of 1000 and above get two decimals and thousands separators;
/// smaller prices keep between four and eight decimals.
pub fn format_price(price: f64) -> String {
    if price >= 1000.0 {
        return group_thousands(&format!("{price:.2}"));
    }
    let mut text = format!("{price:.8}");
    if let Some(dot) = text.find('.') {
        let min_len = dot + 1 + 4;
        while text.len() > min_len && text.ends_with('0') {
            text.pop();
        }
    }
    group_thousands(&text)
}

/// Short dollar price for the selector tabs.
pub fn format_quick_price(price: f64) -> String {
    if price >= 1000.0 {
        format!("${}", group_thousands(&format!("{price:.0}")))
    } else if price >= 1.0 {
        format!("${price:.2}")
    } else {
        format!("${price:.4}")
    }
}

/// Abbreviates a volume with a B, M or K suffix.
pub fn format_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("{:.2}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.2}M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.2}K", volume / 1e3)
    } else {
        format!("{volume:.2}")
    }
}

/// Describes how long ago something happened.
pub fn format_age(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        0 => "just now".to_string(),
        1..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        _ => format!("{}h ago", secs / 3600),
    }
}

/// Inserts `,` between groups of three integer digits.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}{frac_part}")
}
