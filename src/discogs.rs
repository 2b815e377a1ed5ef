//! Discogs API client — the primary marketplace catalog.
//!
//! Discogs carries the richest genre/style vocabulary of the sources this
//! crate consults, so it is searched first. Search results already include
//! genre/style tags; the full release record adds the credited artists
//! needed for match verification.
//!
//! Authentication: personal access token from the environment
//! (`DISCOGS_USER_TOKEN`). Authenticated clients get 60 req/min, hence the
//! 1 s default interval. A User-Agent is mandatory per the API terms.

use serde::Deserialize;

use crate::catalog::{ArtistHit, CatalogRelease, Marketplace, ReleaseHit, TagSource};
use crate::config::Config;
use crate::error::ScoutError;
use crate::rate_limiter::RateLimiter;

const API_BASE: &str = "https://api.discogs.com";

// ── API response types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiSearchResponse {
    #[serde(default)]
    results: Vec<ApiSearchResult>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchResult {
    id: u64,
    title: String,
    #[serde(default)]
    genre: Vec<String>,
    #[serde(default)]
    style: Vec<String>,
    year: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRelease {
    id: u64,
    title: String,
    #[serde(default)]
    artists: Vec<ApiArtist>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    styles: Vec<String>,
    year: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiArtist {
    name: String,
}

// ── Client ───────────────────────────────────────────────────────────────────

pub struct DiscogsClient {
    token: String,
    user_agent: String,
    limiter: RateLimiter,
}

impl DiscogsClient {
    pub fn new(config: &Config) -> Self {
        DiscogsClient {
            token: config.discogs_token.clone(),
            user_agent: config.user_agent.clone(),
            limiter: RateLimiter::new("Discogs", config.discogs_interval),
        }
    }

    /// One paced, authenticated GET.
    fn get(&mut self, url: &str, params: &[(&str, &str)]) -> Result<ureq::Response, ScoutError> {
        self.limiter.wait_if_needed();

        let mut request = ureq::get(url)
            .set("User-Agent", &self.user_agent)
            .set("Authorization", &format!("Discogs token={}", self.token));
        for (key, value) in params {
            request = request.query(key, value);
        }

        Ok(request.call()?)
    }
}

impl Marketplace for DiscogsClient {
    fn search_release(
        &mut self,
        query: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ReleaseHit>, ScoutError> {
        let url = format!("{}/database/search", API_BASE);
        let per_page = limit.to_string();

        let mut params = vec![
            ("q", query),
            ("type", "release"),
            ("per_page", per_page.as_str()),
        ];
        if let Some(artist) = artist {
            params.push(("artist", artist));
        }

        let response = self.get(&url, &params)?;
        let api: ApiSearchResponse = serde_json::from_reader(response.into_reader())?;

        Ok(api
            .results
            .into_iter()
            .map(|r| ReleaseHit {
                id: r.id,
                title: r.title,
                genres: r.genre,
                styles: r.style,
                year: r.year,
            })
            .collect())
    }

    fn search_artist(&mut self, name: &str, limit: u32) -> Result<Vec<ArtistHit>, ScoutError> {
        let url = format!("{}/database/search", API_BASE);
        let per_page = limit.to_string();

        let response = self.get(
            &url,
            &[
                ("q", name),
                ("type", "artist"),
                ("per_page", per_page.as_str()),
            ],
        )?;
        let api: ApiSearchResponse = serde_json::from_reader(response.into_reader())?;

        // For artist hits the `title` field carries the artist name.
        Ok(api
            .results
            .into_iter()
            .map(|r| ArtistHit {
                id: r.id,
                name: r.title,
            })
            .collect())
    }

    fn fetch_release(&mut self, id: u64) -> Result<CatalogRelease, ScoutError> {
        let url = format!("{}/releases/{}", API_BASE, id);

        let response = self.get(&url, &[])?;
        let api: ApiRelease = serde_json::from_reader(response.into_reader())?;

        Ok(CatalogRelease {
            id: api.id,
            title: api.title,
            artists: api.artists.into_iter().map(|a| a.name).collect(),
            genres: api.genres,
            styles: api.styles,
            year: api.year,
            source: TagSource::Discogs,
        })
    }
}
