use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.searching {
        "(Enter) to search, (Esc) to cancel"
    } else {
        match app.current_screen {
            CurrentScreen::Main => {
                if app.fetch.page().is_some() {
                    "(↑↓/jk) select, (←→/hl) page, (Enter) details, (/) new search, (q) quit"
                } else {
                    "(/) to search movies, (q) to quit"
                }
            }
            CurrentScreen::Detail => "(Esc/b) to go back, (q) to quit",
        }
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom =
        Paragraph::new(Text::styled(instruction_text, Style::default())).block(bottom_block);

    frame.render_widget(bottom, area);
}
