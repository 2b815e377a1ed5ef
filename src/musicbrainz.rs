//! MusicBrainz API client — the encyclopedia catalog.
//!
//! MusicBrainz has no per-release genre field worth using; the useful
//! vocabulary hangs off the *artist* as community tags. The resolver
//! therefore searches for a release or recording, follows the credited
//! artist's MBID and fetches that artist's tags.
//!
//! No credentials, but the service requires a descriptive User-Agent and
//! at most ~1 request per second.

use serde::Deserialize;

use crate::catalog::{Encyclopedia, EncycloRecord};
use crate::config::Config;
use crate::error::ScoutError;
use crate::rate_limiter::RateLimiter;

const API_BASE: &str = "https://musicbrainz.org/ws/2";

// ── API response types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiReleaseSearch {
    #[serde(default)]
    releases: Vec<ApiEntity>,
}

#[derive(Debug, Deserialize)]
struct ApiRecordingSearch {
    #[serde(default)]
    recordings: Vec<ApiEntity>,
}

/// Shared shape of release and recording search entries: id, title and the
/// artist credit.
#[derive(Debug, Deserialize)]
struct ApiEntity {
    id: String,
    title: String,
    #[serde(rename = "artist-credit", default)]
    artist_credit: Vec<ApiArtistCredit>,
}

#[derive(Debug, Deserialize)]
struct ApiArtistCredit {
    name: String,
    artist: Option<ApiArtistRef>,
}

#[derive(Debug, Deserialize)]
struct ApiArtistRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiArtistTags {
    #[serde(default)]
    tags: Vec<ApiTag>,
}

#[derive(Debug, Deserialize)]
struct ApiTag {
    name: String,
    #[serde(default)]
    count: i64,
}

// ── Client ───────────────────────────────────────────────────────────────────

pub struct MusicBrainzClient {
    user_agent: String,
    limiter: RateLimiter,
}

impl MusicBrainzClient {
    pub fn new(config: &Config) -> Self {
        MusicBrainzClient {
            user_agent: config.user_agent.clone(),
            limiter: RateLimiter::new("MusicBrainz", config.musicbrainz_interval),
        }
    }

    fn get(&mut self, url: &str, params: &[(&str, &str)]) -> Result<ureq::Response, ScoutError> {
        self.limiter.wait_if_needed();

        let mut request = ureq::get(url).set("User-Agent", &self.user_agent);
        for (key, value) in params {
            request = request.query(key, value);
        }

        Ok(request.call()?)
    }
}

/// Build a `field:"value" AND field:"value"` Lucene query expression.
/// Embedded quotes would break the grammar; replace them with spaces.
fn field_query(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(field, value)| format!("{}:\"{}\"", field, value.replace('"', " ")))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn to_record(entity: ApiEntity) -> EncycloRecord {
    let (artist_name, artist_id) = entity
        .artist_credit
        .into_iter()
        .next()
        .map(|credit| (credit.name, credit.artist.map(|a| a.id)))
        .unwrap_or_default();

    EncycloRecord {
        id: entity.id,
        title: entity.title,
        artist_name,
        artist_id,
    }
}

impl Encyclopedia for MusicBrainzClient {
    fn search_release(
        &mut self,
        title: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<Vec<EncycloRecord>, ScoutError> {
        let mut fields = vec![("release", title)];
        if let Some(artist) = artist {
            fields.push(("artist", artist));
        }
        let query = field_query(&fields);
        let limit = limit.to_string();

        let url = format!("{}/release/", API_BASE);
        let response = self.get(
            &url,
            &[("query", &query), ("fmt", "json"), ("limit", &limit)],
        )?;
        let api: ApiReleaseSearch = serde_json::from_reader(response.into_reader())?;

        Ok(api.releases.into_iter().map(to_record).collect())
    }

    fn search_recording(
        &mut self,
        title: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<Vec<EncycloRecord>, ScoutError> {
        let mut fields = vec![("recording", title)];
        if let Some(artist) = artist {
            fields.push(("artist", artist));
        }
        let query = field_query(&fields);
        let limit = limit.to_string();

        let url = format!("{}/recording/", API_BASE);
        let response = self.get(
            &url,
            &[("query", &query), ("fmt", "json"), ("limit", &limit)],
        )?;
        let api: ApiRecordingSearch = serde_json::from_reader(response.into_reader())?;

        Ok(api.recordings.into_iter().map(to_record).collect())
    }

    fn artist_tags(&mut self, artist_id: &str) -> Result<Vec<String>, ScoutError> {
        let url = format!("{}/artist/{}", API_BASE, artist_id);
        let response = self.get(&url, &[("inc", "tags"), ("fmt", "json")])?;
        let api: ApiArtistTags = serde_json::from_reader(response.into_reader())?;

        // Most-voted tags first, so the best-supported genres lead the
        // merged result.
        let mut tags = api.tags;
        tags.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(tags.into_iter().map(|t| t.name).collect())
    }
}
