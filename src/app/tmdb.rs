use std::error::Error;

use chrono::{Datelike, NaiveDate};
use image::DynamicImage;
use serde::Deserialize;
use thiserror::Error;

const API_BASE: &str = "https://api.themoviedb.org/3";
const POSTER_CDN_BASE: &str = "https://image.tmdb.org/t/p/w342";

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDB_TOKEN is not set")]
    MissingToken,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("tmdb returned status {0}")]
    Remote(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One movie as returned by the TMDB search endpoint. The same shape backs
/// both the result list and the detail overlay; there is no second fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl Movie {
    /// Release year, when TMDB supplies a parseable release date.
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }
}

/// One page of the search response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchPage {
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

fn search_url(query: &str, page: u32) -> String {
    format!(
        "{}/search/movie?query={}&page={}",
        API_BASE,
        urlencoding::encode(query),
        page
    )
}

pub fn poster_url(poster_path: &str) -> String {
    format!("{}{}", POSTER_CDN_BASE, poster_path)
}

/// Fetches one page of movie search results from TMDB.
///
/// A single GET, no retries. Zero results is an ordinary success; the caller
/// decides what to make of an empty page.
pub fn search_movies(query: &str, page: u32, token: Option<&str>) -> Result<SearchPage, TmdbError> {
    let token = token.ok_or(TmdbError::MissingToken)?;

    let response = reqwest::blocking::Client::new()
        .get(search_url(query, page))
        .bearer_auth(token)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(TmdbError::Remote(status));
    }

    // Decode from the raw body so a malformed payload is distinguishable
    // from a transport failure.
    let body = response.text()?;
    let page: SearchPage = serde_json::from_str(&body)?;

    Ok(page)
}

/// Downloads and decodes a poster image for terminal rendering.
pub fn download_poster(poster_path: &str) -> Result<DynamicImage, Box<dyn Error>> {
    let response = reqwest::blocking::get(poster_url(poster_path))?;

    if !response.status().is_success() {
        return Err(format!("poster request failed with status {}", response.status()).into());
    }

    let bytes = response.bytes()?;
    Ok(image::load_from_memory(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "page": 1,
        "results": [
            {
                "id": 268,
                "title": "Batman",
                "overview": "The Dark Knight of Gotham City begins his war on crime.",
                "poster_path": "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg",
                "backdrop_path": "/2va32apQP97gvUxaMnL5wYt4CRB.jpg",
                "release_date": "1989-06-23",
                "vote_average": 7.2
            },
            {
                "id": 272,
                "title": "Batman Begins",
                "overview": "",
                "poster_path": null,
                "backdrop_path": null,
                "release_date": "",
                "vote_average": 0.0
            }
        ],
        "total_pages": 3,
        "total_results": 50
    }"#;

    #[test]
    fn decodes_search_envelope() {
        let page: SearchPage = serde_json::from_str(SEARCH_BODY).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_results, 50);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].title, "Batman");
        assert_eq!(page.results[0].release_year(), Some(1989));
        assert!(page.results[1].poster_path.is_none());
        assert_eq!(page.results[1].release_year(), None);
    }

    #[test]
    fn zero_results_decodes_as_success() {
        let body = r#"{"page":1,"results":[],"total_pages":1,"total_results":0}"#;
        let page: SearchPage = serde_json::from_str(body).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = serde_json::from_str::<SearchPage>(r#"{"results": 12}"#).unwrap_err();
        assert!(matches!(TmdbError::from(err), TmdbError::Decode(_)));
    }

    #[test]
    fn missing_token_fails_before_any_request() {
        assert!(matches!(
            search_movies("batman", 1, None),
            Err(TmdbError::MissingToken)
        ));
    }

    #[test]
    fn search_url_encodes_the_query() {
        assert_eq!(
            search_url("the dark knight", 2),
            "https://api.themoviedb.org/3/search/movie?query=the%20dark%20knight&page=2"
        );
    }

    #[test]
    fn poster_url_joins_the_cdn_base() {
        assert_eq!(poster_url("/x.jpg"), "https://image.tmdb.org/t/p/w342/x.jpg");
    }
}
