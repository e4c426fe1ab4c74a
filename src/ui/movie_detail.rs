use crate::app::tmdb::{Movie, TmdbError};
use crate::app::{App, PosterState};
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage};
use tui_big_text::{BigText, PixelSize};

/// Renders the detail overlay for the selected movie on top of the results.
pub fn render_movie_detail(frame: &mut Frame, app: &mut App) {
    let Some(movie) = app.selected.clone() else {
        return;
    };

    let area = centered_rect(frame.area(), 80, 80);
    frame.render_widget(Clear, area);

    let outer_block = Block::default()
        .title(format!(" {} ", movie.title))
        .borders(Borders::ALL)
        .style(Style::default());

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Poster
            Constraint::Percentage(60), // Details
        ])
        .split(inner_area);

    render_poster_section(frame, chunks[0], app);
    render_info_section(frame, chunks[1], &movie);
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, area: Rect, app: &mut App) {
    match &mut app.poster {
        Some(PosterState::Loading) => {
            // Show loading spinner
            let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % spinner_chars.len();
            let spinner = spinner_chars[spinner_idx];

            let loading_text = vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Downloading poster...", spinner),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
            ];

            let loading_paragraph = Paragraph::new(loading_text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Poster"));

            frame.render_widget(loading_paragraph, area);
        }
        Some(PosterState::Ready(protocol)) => {
            // Render the poster
            let image = StatefulImage::default().resize(Resize::Fit(None));

            let poster_block = Block::default().borders(Borders::ALL).title("Poster");

            let inner_area = poster_block.inner(area);
            frame.render_widget(poster_block, area);
            frame.render_stateful_widget(image, inner_area, protocol);
        }
        _ => {
            // Show placeholder
            let placeholder_text = vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    "No poster available",
                    Style::default().fg(Color::Gray),
                )),
            ];

            let placeholder_paragraph = Paragraph::new(placeholder_text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Poster"));

            frame.render_widget(placeholder_paragraph, area);
        }
    }
}

/// Renders the title line, rating line and overview for the selected movie.
fn render_info_section(frame: &mut Frame, area: Rect, movie: &Movie) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title info
            Constraint::Min(5),    // Overview
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let mut title_spans = vec![Span::styled(
        movie.title.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(year) = movie.release_year() {
        title_spans.push(Span::styled(
            format!("  ({})", year),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(rating) = movie.vote_average {
        title_spans.push(Span::styled(
            format!("  {:.1}/10", rating),
            Style::default().fg(Color::Cyan),
        ));
    }

    let title_paragraph = Paragraph::new(Line::from(title_spans))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title_paragraph, chunks[0]);

    let overview = if movie.overview.is_empty() {
        "No overview available."
    } else {
        movie.overview.as_str()
    };
    let overview_paragraph = Paragraph::new(overview)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    frame.render_widget(overview_paragraph, chunks[1]);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Press (Esc) or (b) to go back, (q) to quit",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[2]);
}

/// Renders the missing-token screen with big text
pub fn render_missing_token(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Big text
            Constraint::Min(5),    // Instructions
        ])
        .split(area);

    // Big red text
    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .lines(vec!["TOKEN".into(), "REQUIRED!".into()])
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[0]);

    // Instructions
    let instructions = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Please set your TMDB API read access token to search for movies",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "1. Get a token at: https://www.themoviedb.org/settings/api",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "2. Set environment variable: export TMDB_TOKEN=your_token_here",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "3. Restart the application",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (/) to try another search, (q) to quit",
            Style::default().fg(Color::Gray),
        )),
    ];

    let instructions_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let instructions_paragraph = Paragraph::new(instructions)
        .block(instructions_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(instructions_paragraph, chunks[1]);
}

/// Renders the generic error panel for a failed search.
pub fn render_error(frame: &mut Frame, area: Rect, error: Option<&TmdbError>) {
    let error_block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .style(Style::default());

    let mut error_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to search for movies",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(error) = error {
        error_text.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
        error_text.push(Line::from(""));
    }

    error_text.extend([
        Line::from(Span::styled(
            "This might happen if:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "- The TMDB token is invalid or expired",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "- Network connection issues",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "- API rate limit reached",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (/) to try another search, (←→/hl) to change page",
            Style::default().fg(Color::Gray),
        )),
    ]);

    let error_paragraph = Paragraph::new(error_text)
        .block(error_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
