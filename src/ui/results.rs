use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::pagination::render_pagination;

/// Renders the result list for the current search, with the paginator strip
/// below it when the result set spans more than one page.
pub fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(page) = app.fetch.page() else {
        return;
    };

    if page.results.is_empty() {
        // Nothing to list; the one-shot notification is the controller's job.
        let empty_block = Block::default()
            .title(format!("No results for \"{}\"", app.query))
            .borders(Borders::ALL)
            .style(Style::default());

        frame.render_widget(empty_block, area);
        return;
    }

    let chunks: Vec<Rect> = if page.total_pages > 1 {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area)
            .to_vec()
    } else {
        vec![area]
    };

    let mut title = format!("Results - {} movies", page.total_results);
    if app.fetch.is_loading() {
        // Stale page kept on screen while the next one is fetched.
        title.push_str("  (updating...)");
    }

    let items: Vec<ListItem> = page
        .results
        .iter()
        .map(|movie| {
            let detail = match (movie.release_year(), movie.vote_average) {
                (Some(year), Some(rating)) => format!("  {}   {:.1}/10", year, rating),
                (Some(year), None) => format!("  {}", year),
                (None, Some(rating)) => format!("  {:.1}/10", rating),
                (None, None) => "  release date unknown".to_string(),
            };

            let content = vec![
                Line::from(Span::styled(
                    movie.title.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
            ];

            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, chunks[0], &mut app.list_state);

    if page.total_pages > 1 {
        render_pagination(frame, app.page, page.total_pages, chunks[1]);
    }
}
