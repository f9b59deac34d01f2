use ratatui::prelude::*;

/// Style for a status cell based on its severity or availability label
pub fn status_style(status: &str) -> Style {
    let color = match status {
        "CRITICAL" => Color::Red,
        "HIGH" => Color::LightRed,
        "AVERAGE" => Color::LightYellow,
        "WARNING" => Color::Yellow,
        "INFORMATION" => Color::Cyan,
        "UNAVAILABLE" => Color::Magenta,
        _ => Color::DarkGray,
    };

    Style::default().fg(color)
}

/// Check/cross glyph for the acknowledgement column
pub fn ack_glyph(ack: bool) -> &'static str {
    if ack {
        "✓"
    } else {
        "✗"
    }
}
