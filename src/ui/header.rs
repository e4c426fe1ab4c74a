use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the title bar. While the search prompt is open it doubles as the
/// input line.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default().borders(Borders::ALL).style(Style::default());

    let line = if app.searching {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Cyan)),
            Span::raw(app.search_term.as_str()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ])
    } else if app.query.is_empty() {
        Line::from(Span::styled(
            "Movie Search",
            Style::default().add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("Movie Search", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" - "),
            Span::styled(
                format!("\"{}\"", app.query),
                Style::default().fg(Color::Yellow),
            ),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(title_block), area);
}
