use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
};

/// Renders the paginator strip. Only called when there is more than one
/// page. The tab selection index is zero-based; the app's page numbers are
/// 1-based, translated here at the widget boundary.
pub fn render_pagination(frame: &mut Frame, current_page: u32, total_pages: u32, area: Rect) {
    let window = page_window(current_page, total_pages, 9);
    let titles: Vec<String> = window.iter().map(|page| page.to_string()).collect();
    let selected = window
        .iter()
        .position(|page| *page == current_page)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Page {} of {}", current_page, total_pages)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Pages shown in the strip: a window of up to `max` page numbers around the
/// current page, clamped to [1, total].
fn page_window(current: u32, total: u32, max: u32) -> Vec<u32> {
    let half = max / 2;
    let start = current.saturating_sub(half).max(1);
    let end = (start + max - 1).min(total);
    let start = end.saturating_sub(max - 1).max(1);
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_covers_small_result_sets() {
        assert_eq!(page_window(1, 3, 9), vec![1, 2, 3]);
        assert_eq!(page_window(3, 3, 9), vec![1, 2, 3]);
    }

    #[test]
    fn window_centers_on_the_current_page() {
        assert_eq!(page_window(7, 500, 9), (3..=11).collect::<Vec<u32>>());
    }

    #[test]
    fn window_clamps_at_the_last_page() {
        assert_eq!(page_window(500, 500, 9), (492..=500).collect::<Vec<u32>>());
    }

    #[test]
    fn window_always_contains_the_current_page() {
        for current in 1..=20 {
            assert!(page_window(current, 20, 9).contains(&current));
        }
    }
}
