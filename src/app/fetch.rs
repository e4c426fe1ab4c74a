use std::collections::HashMap;

use crate::app::tmdb::{SearchPage, TmdbError};

/// One search request is identified by its query and 1-based page number.
pub type SearchKey = (String, u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Keyed cache and sequencer for search fetches.
///
/// The control thread sets the current key and applies finished fetches;
/// worker threads never touch this directly. Rules:
/// - an empty key means idle, nothing is fetched;
/// - a key change while a fetch is in flight abandons that fetch: its result
///   is discarded on arrival (last key requested wins);
/// - the previously applied page stays visible while the current key loads;
/// - a failed fetch stays failed until the key changes. No retries.
#[derive(Default)]
pub struct SearchFetch {
    cache: HashMap<SearchKey, SearchPage>,
    current: Option<SearchKey>,
    in_flight: Option<SearchKey>,
    last_applied: Option<SearchKey>,
    error: Option<TmdbError>,
}

impl SearchFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `key` the current key. Returns true when the caller must spawn
    /// a fetch for it; false on a cache hit, an unchanged key, or no key.
    pub fn set_key(&mut self, key: Option<SearchKey>) -> bool {
        if self.current == key {
            // Unchanged key: an in-flight fetch or a sticky error stays as-is.
            return false;
        }

        self.current = key.clone();
        self.error = None;

        let Some(key) = key else {
            self.in_flight = None;
            return false;
        };

        if self.cache.contains_key(&key) {
            self.in_flight = None;
            self.last_applied = Some(key);
            return false;
        }

        self.in_flight = Some(key);
        true
    }

    /// Applies a finished fetch. Returns false when the result arrived for a
    /// key that is no longer current and was discarded.
    pub fn complete(&mut self, key: SearchKey, outcome: Result<SearchPage, TmdbError>) -> bool {
        if self.current.as_ref() != Some(&key) {
            return false;
        }

        self.in_flight = None;
        match outcome {
            Ok(page) => {
                self.cache.insert(key.clone(), page);
                self.last_applied = Some(key);
                self.error = None;
            }
            Err(error) => {
                self.error = Some(error);
            }
        }
        true
    }

    /// The page to show: the current key's page once fetched, otherwise the
    /// previously applied page while the fetch is outstanding. None when
    /// idle or before anything was fetched.
    pub fn page(&self) -> Option<&SearchPage> {
        let current = self.current.as_ref()?;
        if let Some(page) = self.cache.get(current) {
            return Some(page);
        }
        self.last_applied
            .as_ref()
            .and_then(|key| self.cache.get(key))
    }

    /// True while the current key's fetch is outstanding. The page shown in
    /// the meantime, if any, belongs to the previous key.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&TmdbError> {
        self.error.as_ref()
    }

    pub fn phase(&self) -> FetchPhase {
        if self.current.is_none() {
            FetchPhase::Idle
        } else if self.error.is_some() {
            FetchPhase::Error
        } else if self.in_flight.is_some() {
            FetchPhase::Loading
        } else {
            FetchPhase::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tmdb::Movie;

    fn key(query: &str, page: u32) -> SearchKey {
        (query.to_string(), page)
    }

    fn page_titled(title: &str, total_pages: u32) -> SearchPage {
        SearchPage {
            results: vec![Movie {
                id: 1,
                title: title.to_string(),
                overview: String::new(),
                release_date: None,
                vote_average: None,
                poster_path: None,
                backdrop_path: None,
            }],
            total_pages,
            total_results: 1,
        }
    }

    fn remote_error() -> TmdbError {
        TmdbError::Remote(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[test]
    fn empty_key_is_idle() {
        let mut fetch = SearchFetch::new();
        assert!(!fetch.set_key(None));
        assert_eq!(fetch.phase(), FetchPhase::Idle);
        assert!(fetch.page().is_none());
        assert!(!fetch.is_loading());
    }

    #[test]
    fn first_request_for_a_key_spawns() {
        let mut fetch = SearchFetch::new();
        assert!(fetch.set_key(Some(key("batman", 1))));
        assert_eq!(fetch.phase(), FetchPhase::Loading);
        assert!(fetch.page().is_none());
    }

    #[test]
    fn in_flight_key_is_not_respawned() {
        let mut fetch = SearchFetch::new();
        assert!(fetch.set_key(Some(key("batman", 1))));
        assert!(!fetch.set_key(Some(key("batman", 1))));
    }

    #[test]
    fn cache_hit_spawns_nothing() {
        let mut fetch = SearchFetch::new();
        fetch.set_key(Some(key("batman", 1)));
        fetch.complete(key("batman", 1), Ok(page_titled("Batman", 3)));
        fetch.set_key(Some(key("batman", 2)));
        fetch.complete(key("batman", 2), Ok(page_titled("Batman Returns", 3)));

        assert!(!fetch.set_key(Some(key("batman", 1))));
        assert_eq!(fetch.phase(), FetchPhase::Success);
        assert_eq!(fetch.page().unwrap().results[0].title, "Batman");
    }

    #[test]
    fn previous_page_stays_visible_while_loading() {
        let mut fetch = SearchFetch::new();
        fetch.set_key(Some(key("batman", 1)));
        fetch.complete(key("batman", 1), Ok(page_titled("Batman", 3)));

        assert!(fetch.set_key(Some(key("batman", 2))));
        assert_eq!(fetch.phase(), FetchPhase::Loading);
        assert_eq!(fetch.page().unwrap().results[0].title, "Batman");

        fetch.complete(key("batman", 2), Ok(page_titled("Batman Returns", 3)));
        assert_eq!(fetch.phase(), FetchPhase::Success);
        assert_eq!(fetch.page().unwrap().results[0].title, "Batman Returns");
    }

    #[test]
    fn last_requested_key_wins() {
        let mut fetch = SearchFetch::new();
        fetch.set_key(Some(key("batman", 1)));
        fetch.set_key(Some(key("superman", 1)));

        // The slow fetch for the abandoned key resolves after the newer one
        // was issued; its result must not become visible.
        assert!(!fetch.complete(key("batman", 1), Ok(page_titled("Batman", 1))));
        assert_eq!(fetch.phase(), FetchPhase::Loading);
        assert!(fetch.page().is_none());

        assert!(fetch.complete(key("superman", 1), Ok(page_titled("Superman", 1))));
        assert_eq!(fetch.page().unwrap().results[0].title, "Superman");
    }

    #[test]
    fn clearing_the_key_ignores_late_results() {
        let mut fetch = SearchFetch::new();
        fetch.set_key(Some(key("batman", 1)));
        fetch.set_key(None);

        assert!(!fetch.complete(key("batman", 1), Ok(page_titled("Batman", 1))));
        assert_eq!(fetch.phase(), FetchPhase::Idle);
        assert!(fetch.page().is_none());
    }

    #[test]
    fn error_is_sticky_until_the_key_changes() {
        let mut fetch = SearchFetch::new();
        fetch.set_key(Some(key("batman", 1)));
        assert!(fetch.complete(key("batman", 1), Err(remote_error())));
        assert_eq!(fetch.phase(), FetchPhase::Error);

        // Same key again: no retry, the error stands.
        assert!(!fetch.set_key(Some(key("batman", 1))));
        assert_eq!(fetch.phase(), FetchPhase::Error);

        // A key change clears it and starts a fresh attempt.
        assert!(fetch.set_key(Some(key("batman", 2))));
        assert_eq!(fetch.phase(), FetchPhase::Loading);
        assert!(fetch.error().is_none());
    }

    #[test]
    fn error_does_not_clobber_the_cache() {
        let mut fetch = SearchFetch::new();
        fetch.set_key(Some(key("batman", 1)));
        fetch.complete(key("batman", 1), Ok(page_titled("Batman", 3)));
        fetch.set_key(Some(key("batman", 2)));
        fetch.complete(key("batman", 2), Err(remote_error()));

        assert_eq!(fetch.phase(), FetchPhase::Error);
        // Going back to the cached page works without a new fetch.
        assert!(!fetch.set_key(Some(key("batman", 1))));
        assert_eq!(fetch.phase(), FetchPhase::Success);
        assert_eq!(fetch.page().unwrap().results[0].title, "Batman");
    }
}
