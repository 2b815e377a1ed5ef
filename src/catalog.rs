//! Catalog-neutral record types and the adapter contracts.
//!
//! The resolver only sees these traits; the concrete Discogs, MusicBrainz
//! and AllMusic clients implement them. Adapters are pure I/O boundaries:
//! one network request per call, errors mapped onto [`ScoutError`]
//! (`Transient` for connect/timeout/429/5xx, `NotFound` when the remote
//! reports no match), and a stable client identifier on every request.

use crate::error::ScoutError;

/// Which catalog a record (or set of tags) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSource {
    Discogs,
    MusicBrainz,
    AllMusic,
}

/// A lightweight marketplace search hit, before fetching the full record.
/// Search results may already carry genre/style tags.
#[derive(Debug, Clone)]
pub struct ReleaseHit {
    pub id: u64,
    pub title: String,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub year: Option<String>,
}

/// A marketplace artist-index hit.
#[derive(Debug, Clone)]
pub struct ArtistHit {
    pub id: u64,
    pub name: String,
}

/// A full release record.
#[derive(Debug, Clone)]
pub struct CatalogRelease {
    pub id: u64,
    pub title: String,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub year: Option<u32>,
    pub source: TagSource,
}

/// An encyclopedia search record: enough to verify the hit and follow the
/// credited artist to their tag list.
#[derive(Debug, Clone)]
pub struct EncycloRecord {
    pub id: String,
    pub title: String,
    pub artist_name: String,
    pub artist_id: Option<String>,
}

/// The marketplace catalog (Discogs).
pub trait Marketplace {
    /// Free-text release search, optionally constrained to an artist.
    fn search_release(
        &mut self,
        query: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ReleaseHit>, ScoutError>;

    /// Artist-index search.
    fn search_artist(&mut self, name: &str, limit: u32) -> Result<Vec<ArtistHit>, ScoutError>;

    /// Fetch the full record for a search hit.
    fn fetch_release(&mut self, id: u64) -> Result<CatalogRelease, ScoutError>;
}

/// The encyclopedia catalog (MusicBrainz).
pub trait Encyclopedia {
    fn search_release(
        &mut self,
        title: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<Vec<EncycloRecord>, ScoutError>;

    fn search_recording(
        &mut self,
        title: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<Vec<EncycloRecord>, ScoutError>;

    /// Tags attached to an artist entity, most-voted first.
    fn artist_tags(&mut self, artist_id: &str) -> Result<Vec<String>, ScoutError>;
}

/// Last-resort free-text web lookup (AllMusic).
pub trait WebLookup {
    /// Best-effort (genres, styles) for a free-text title/artist query.
    fn genres_for(
        &mut self,
        title: &str,
        artist: Option<&str>,
    ) -> Result<(Vec<String>, Vec<String>), ScoutError>;
}
