pub mod config;
pub mod fetch;
pub mod tmdb;

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use image::DynamicImage;
use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tracing::{debug, info, warn};

use crate::app::config::Config;
use crate::app::fetch::{FetchPhase, SearchFetch, SearchKey};
use crate::app::tmdb::{Movie, SearchPage, TmdbError};

/// Results from the worker threads, applied on the control thread.
pub enum FetchMessage {
    SearchFinished {
        key: SearchKey,
        outcome: Result<SearchPage, TmdbError>,
    },
    PosterReady {
        movie_id: u64,
        image: Box<DynamicImage>,
    },
    PosterFailed {
        movie_id: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Main,
    Detail,
}

pub enum PosterState {
    Loading,
    Ready(StatefulProtocol),
    Unavailable,
}

/// Transient on-screen notification.
pub struct Toast {
    pub message: String,
    expires_at: Instant,
}

impl Toast {
    const LIFETIME: Duration = Duration::from_secs(3);

    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            expires_at: Instant::now() + Self::LIFETIME,
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

pub struct App {
    pub config: Config,
    pub current_screen: CurrentScreen,
    pub searching: bool,
    pub search_term: String,
    /// The active query. Empty means no search is active.
    pub query: String,
    /// 1-based page number, reset to 1 on every new query.
    pub page: u32,
    pub fetch: SearchFetch,
    pub selected: Option<Movie>,
    pub poster: Option<PosterState>,
    pub picker: Option<Picker>,
    pub selected_index: usize,
    pub list_state: ListState,
    pub toast: Option<Toast>,
    notified_key: Option<SearchKey>,
    tx: mpsc::Sender<FetchMessage>,
    rx: mpsc::Receiver<FetchMessage>,
}

impl App {
    pub fn new(config: Config, picker: Option<Picker>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            config,
            current_screen: CurrentScreen::Main,
            searching: false,
            search_term: String::new(),
            query: String::new(),
            page: 1,
            fetch: SearchFetch::new(),
            selected: None,
            poster: None,
            picker,
            selected_index: 0,
            list_state,
            toast: None,
            notified_key: None,
            tx,
            rx,
        }
    }

    fn current_key(&self) -> Option<SearchKey> {
        if self.query.is_empty() {
            None
        } else {
            Some((self.query.clone(), self.page))
        }
    }

    fn refresh(&mut self) {
        let key = self.current_key();
        if self.fetch.set_key(key.clone()) {
            if let Some(key) = key {
                self.spawn_search(key);
            }
        } else if self.fetch.phase() == FetchPhase::Success {
            // Cache hit: the visible page changed without a fetch.
            self.selected_index = 0;
            self.list_state.select(Some(0));
        }
    }

    fn spawn_search(&self, key: SearchKey) {
        let token = self.config.tmdb_token.clone();
        let tx = self.tx.clone();
        debug!(query = %key.0, page = key.1, "spawning search fetch");
        thread::spawn(move || {
            let outcome = tmdb::search_movies(&key.0, key.1, token.as_deref());
            let _ = tx.send(FetchMessage::SearchFinished { key, outcome });
        });
    }

    fn spawn_poster(&self, movie_id: u64, poster_path: String) {
        let tx = self.tx.clone();
        thread::spawn(move || match tmdb::download_poster(&poster_path) {
            Ok(image) => {
                let _ = tx.send(FetchMessage::PosterReady {
                    movie_id,
                    image: Box::new(image),
                });
            }
            Err(error) => {
                warn!(movie_id, %error, "poster download failed");
                let _ = tx.send(FetchMessage::PosterFailed { movie_id });
            }
        });
    }

    /// Starts a new search. Whitespace-only input clears the active search
    /// instead of fetching.
    pub fn submit_search(&mut self, text: &str) {
        let query = text.trim().to_string();
        info!(%query, "search submitted");
        self.query = query;
        self.page = 1;
        self.refresh();
    }

    pub fn next_page(&mut self) {
        let Some(total_pages) = self.fetch.page().map(|page| page.total_pages) else {
            return;
        };
        if self.page < total_pages {
            self.page += 1;
            self.refresh();
        }
    }

    pub fn previous_page(&mut self) {
        if self.fetch.page().is_none() {
            return;
        }
        if self.page > 1 {
            self.page -= 1;
            self.refresh();
        }
    }

    pub fn next_movie(&mut self) {
        let count = self.visible_movie_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
        self.list_state.select(Some(self.selected_index));
    }

    pub fn previous_movie(&mut self) {
        let count = self.visible_movie_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    fn visible_movie_count(&self) -> usize {
        self.fetch
            .page()
            .map(|page| page.results.len())
            .unwrap_or(0)
    }

    /// Opens the detail overlay for the highlighted movie. Uses the data
    /// already on hand; only the poster image is fetched, best-effort.
    pub fn select_highlighted(&mut self) {
        let Some(movie) = self
            .fetch
            .page()
            .and_then(|page| page.results.get(self.selected_index))
            .cloned()
        else {
            return;
        };
        self.select_movie(movie);
    }

    pub fn select_movie(&mut self, movie: Movie) {
        self.poster = match &movie.poster_path {
            Some(path) if self.picker.is_some() => {
                self.spawn_poster(movie.id, path.clone());
                Some(PosterState::Loading)
            }
            _ => Some(PosterState::Unavailable),
        };
        self.selected = Some(movie);
        self.current_screen = CurrentScreen::Detail;
    }

    pub fn close_overlay(&mut self) {
        self.selected = None;
        self.poster = None;
        self.current_screen = CurrentScreen::Main;
    }

    /// Drains the worker channel. Called once per event-loop iteration, so
    /// every state change lands between two draws.
    pub fn poll_fetch_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
        }
    }

    pub(crate) fn handle_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::SearchFinished { key, outcome } => {
                self.apply_search_result(key, outcome);
            }
            FetchMessage::PosterReady { movie_id, image } => {
                if self.selected.as_ref().map(|movie| movie.id) != Some(movie_id) {
                    return;
                }
                if let Some(picker) = &mut self.picker {
                    let protocol = picker.new_resize_protocol(*image);
                    self.poster = Some(PosterState::Ready(protocol));
                }
            }
            FetchMessage::PosterFailed { movie_id } => {
                if self.selected.as_ref().map(|movie| movie.id) == Some(movie_id) {
                    self.poster = Some(PosterState::Unavailable);
                }
            }
        }
    }

    fn apply_search_result(&mut self, key: SearchKey, outcome: Result<SearchPage, TmdbError>) {
        if let Err(error) = &outcome {
            warn!(query = %key.0, page = key.1, %error, "search fetch failed");
        }

        if !self.fetch.complete(key.clone(), outcome) {
            debug!(query = %key.0, page = key.1, "discarding superseded fetch result");
            return;
        }
        if self.fetch.phase() != FetchPhase::Success {
            return;
        }

        self.selected_index = 0;
        self.list_state.select(Some(0));

        // One-shot notification on the transition into an empty success;
        // re-renders and duplicate completions must not repeat it.
        let empty = self
            .fetch
            .page()
            .map(|page| page.results.is_empty())
            .unwrap_or(false);
        if empty && self.notified_key.as_ref() != Some(&key) {
            self.toast = Some(Toast::new("No movies found for your request."));
            self.notified_key = Some(key);
        }
    }

    /// Housekeeping between draws: expire the toast.
    pub fn tick(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.expired() {
                self.toast = None;
            }
        }
    }
}
