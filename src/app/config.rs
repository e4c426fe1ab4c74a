use std::env;

/// Process-wide configuration, read once at startup.
pub struct Config {
    /// TMDB API read access token. A missing token is not fatal here: the
    /// first search fails with an authorization error instead.
    pub tmdb_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let tmdb_token = env::var("TMDB_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Self { tmdb_token }
    }
}
