mod app;
use app::App;

mod ui;

use std::error::Error;
use std::io;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::{Backend, CrosstermBackend};
use ratatui_image::picker::Picker;

use crate::app::CurrentScreen;
use crate::app::config::Config;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    // Read once; a missing token fails the first search, not the startup.
    let config = Config::from_env();

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    // Query the terminal for image support while raw mode is active; without
    // it posters fall back to the text placeholder.
    let picker = Picker::from_query_stdio().ok();

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let mut app = App::new(config, picker);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file under the platform data dir; stdout and stderr belong
/// to the terminal UI.
fn init_logging() {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tmdb_tui");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("tui.log"))
    else {
        return;
    };

    // Allow RUST_LOG override; default to info for app code but suppress
    // connection-level noise from HTTP client internals.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    tracing::info!("tmdb_tui starting");
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>>
where
    <B as Backend>::Error: 'static,
{
    loop {
        // Apply finished background work before drawing
        app.poll_fetch_messages();
        app.tick();

        terminal.draw(|f| ui::ui(f, app))?;

        // Poll for events with a timeout to allow UI updates
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    // Skip events that are not KeyEventKind::Press
                    continue;
                }

                // Handle search input when the prompt is active
                if app.searching {
                    match key.code {
                        KeyCode::Char(c) => {
                            app.search_term.push(c);
                        }
                        KeyCode::Backspace => {
                            app.search_term.pop();
                        }
                        KeyCode::Enter => {
                            app.searching = false;
                            let term = app.search_term.clone();
                            app.submit_search(&term);
                        }
                        KeyCode::Esc => {
                            app.searching = false;
                            app.search_term.clear();
                        }
                        _ => {}
                    }
                    continue;
                }

                match app.current_screen {
                    CurrentScreen::Main => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('/') => {
                            app.searching = true;
                            app.search_term.clear();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            app.next_movie();
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.previous_movie();
                        }
                        KeyCode::Right | KeyCode::Char('l') => {
                            app.next_page();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            app.previous_page();
                        }
                        KeyCode::Enter => {
                            app.select_highlighted();
                        }
                        _ => {}
                    },
                    CurrentScreen::Detail => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Esc | KeyCode::Char('b') => {
                            app.close_overlay();
                        }
                        _ => {}
                    },
                }
            }
        }
    }
}
