use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the loading screen shown before the first page of a search
/// arrives.
pub fn render_loading(frame: &mut Frame, area: Rect) {
    let loading_block = Block::default()
        .title("Searching")
        .borders(Borders::ALL)
        .style(Style::default());

    // Create spinner animation (simple rotating character)
    let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % spinner_chars.len();
    let spinner = spinner_chars[spinner_idx];

    let loading_text = vec![
        Line::from(""),
        Line::from(format!("{} Searching the catalog...", spinner)),
    ];

    let loading_paragraph = Paragraph::new(loading_text)
        .block(loading_block)
        .alignment(Alignment::Center);

    frame.render_widget(loading_paragraph, area);
}
