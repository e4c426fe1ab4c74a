mod footer;
mod header;
mod loading;
mod movie_detail;
mod pagination;
mod results;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::fetch::FetchPhase;
use crate::app::tmdb::TmdbError;
use crate::app::{App, CurrentScreen};

use self::footer::render_footer;
use self::header::render_header;
use self::loading::render_loading;
use self::movie_detail::{render_error, render_missing_token, render_movie_detail};
use self::results::render_results;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    // Create the main layout: header, content area, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.fetch.phase() {
        FetchPhase::Idle => render_idle(frame, chunks[1]),
        FetchPhase::Error => match app.fetch.error() {
            Some(TmdbError::MissingToken) => render_missing_token(frame, chunks[1]),
            error => render_error(frame, chunks[1], error),
        },
        // The loading screen only shows before any page exists; once a page
        // was fetched the stale results stay visible while the next loads.
        FetchPhase::Loading if app.fetch.page().is_none() => render_loading(frame, chunks[1]),
        _ => render_results(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);

    if app.current_screen == CurrentScreen::Detail {
        render_movie_detail(frame, app);
    }

    render_toast(frame, app);
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let empty_block = Block::default()
        .title("No search yet - press '/' to search the catalog")
        .borders(Borders::ALL)
        .style(Style::default());

    frame.render_widget(empty_block, area);
}

/// Draws the transient notification on top of everything else.
fn render_toast(frame: &mut Frame, app: &App) {
    let Some(toast) = &app.toast else { return };

    let area = frame.area();
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + 1,
        width,
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, rect);
    let message = Paragraph::new(toast.message.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(message, rect);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::app::config::Config;
    use crate::app::tmdb::{Movie, SearchPage};
    use crate::app::{App, FetchMessage};

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| super::ui(frame, app)).unwrap();
        format!("{:?}", terminal.backend().buffer())
    }

    fn seeded_app(total_pages: u32) -> App {
        let mut app = App::new(Config { tmdb_token: None }, None);
        app.submit_search("batman");
        app.handle_message(FetchMessage::SearchFinished {
            key: ("batman".to_string(), 1),
            outcome: Ok(SearchPage {
                results: vec![Movie {
                    id: 1,
                    title: "Batman".to_string(),
                    overview: String::new(),
                    release_date: Some("1989-06-23".to_string()),
                    vote_average: Some(7.2),
                    poster_path: Some("/x.jpg".to_string()),
                    backdrop_path: None,
                }],
                total_pages,
                total_results: 50,
            }),
        });
        app
    }

    #[test]
    fn paginator_needs_more_than_one_page() {
        let mut app = seeded_app(1);
        let frame = draw(&mut app);
        assert!(frame.contains("Batman"));
        assert!(!frame.contains("Page 1 of"));

        let mut app = seeded_app(3);
        let frame = draw(&mut app);
        assert!(frame.contains("Page 1 of 3"));
    }

    #[test]
    fn empty_completion_shows_the_toast() {
        let mut app = App::new(Config { tmdb_token: None }, None);
        app.submit_search("zzzz");
        app.handle_message(FetchMessage::SearchFinished {
            key: ("zzzz".to_string(), 1),
            outcome: Ok(SearchPage {
                results: vec![],
                total_pages: 1,
                total_results: 0,
            }),
        });

        let frame = draw(&mut app);
        assert!(frame.contains("No movies found"));
    }
}
