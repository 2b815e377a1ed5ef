//! Multi-strategy genre/style resolution.
//!
//! One track descriptor in, one merged tag result out. Strategies run in
//! strict priority order and stop at the first verified match:
//!
//! 1. album search on the marketplace (when an album name is known)
//! 2. track search on the marketplace
//! 3. artist-only search on the marketplace
//! 4. encyclopedia release search, then recording search
//! 5. free-text web lookup
//!
//! Each marketplace strategy walks every artist candidate the splitter
//! produced before giving up. A candidate that errors is logged and
//! skipped — one bad candidate never aborts the resolution. Only a
//! transient error that survived its retry budget escalates out.

use crate::aggregate::{merge, TagSet};
use crate::artist::search_candidates;
use crate::catalog::{Encyclopedia, Marketplace, WebLookup};
use crate::config::Config;
use crate::error::ScoutError;
use crate::retry::{call_with_retry, RetryPolicy};
use crate::similarity::is_similar;

/// One track as delivered by the playlist layer.
#[derive(Debug, Clone)]
pub struct TrackDescriptor {
    pub track: String,
    /// Raw artist credit, possibly several names in one string.
    pub artist: String,
    pub album: Option<String>,
}

/// Which strategy produced the accepted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Album,
    Track,
    ArtistOnly,
    Encyclopedia,
    WebFallback,
}

/// Terminal output of one resolution. An unresolvable track yields an
/// empty-but-valid result, never an error.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    /// Deduplicated, contribution-ordered genre names.
    pub genres: Vec<String>,
    /// Deduplicated, contribution-ordered style names.
    pub styles: Vec<String>,
    pub matched: bool,
    pub strategy: Option<Strategy>,
}

impl ResolutionResult {
    fn unmatched() -> Self {
        ResolutionResult {
            genres: Vec::new(),
            styles: Vec::new(),
            matched: false,
            strategy: None,
        }
    }

    fn matched(tags: TagSet, strategy: Strategy) -> Self {
        let merged = merge(&[tags]);
        ResolutionResult {
            genres: merged.genres,
            styles: merged.styles,
            matched: true,
            strategy: Some(strategy),
        }
    }
}

/// The strategy cascade. Holds the catalog client handles for the whole
/// run; construct once and reuse across tracks.
pub struct Resolver<M, E, W> {
    marketplace: M,
    encyclopedia: E,
    web: W,
    threshold: f64,
    limit: u32,
    retry: RetryPolicy,
}

impl<M: Marketplace, E: Encyclopedia, W: WebLookup> Resolver<M, E, W> {
    pub fn new(marketplace: M, encyclopedia: E, web: W, config: &Config) -> Self {
        Resolver {
            marketplace,
            encyclopedia,
            web,
            threshold: config.similarity_threshold,
            limit: config.search_limit,
            retry: config.retry,
        }
    }

    /// Resolve one track to its genre/style tags.
    pub fn resolve(&mut self, track: &TrackDescriptor) -> Result<ResolutionResult, ScoutError> {
        let candidates = search_candidates(&track.artist);
        log::debug!(
            "resolving '{}' / '{}': {} artist candidate(s)",
            track.artist,
            track.track,
            candidates.len()
        );

        if let Some(album) = track.album.as_deref() {
            if let Some(tags) = self.album_strategy(album, &candidates)? {
                return Ok(ResolutionResult::matched(tags, Strategy::Album));
            }
        }

        if let Some(tags) = self.track_strategy(&track.track, &candidates)? {
            return Ok(ResolutionResult::matched(tags, Strategy::Track));
        }

        if let Some(tags) = self.artist_strategy(&candidates)? {
            return Ok(ResolutionResult::matched(tags, Strategy::ArtistOnly));
        }

        if let Some(tags) = self.encyclopedia_strategy(track)? {
            return Ok(ResolutionResult::matched(tags, Strategy::Encyclopedia));
        }

        if let Some(tags) = self.web_strategy(track)? {
            return Ok(ResolutionResult::matched(tags, Strategy::WebFallback));
        }

        log::debug!("'{}' / '{}': all strategies exhausted", track.artist, track.track);
        Ok(ResolutionResult::unmatched())
    }

    // ── Strategies ───────────────────────────────────────────────────────────

    /// Search by album name; accept on album-title OR artist similarity.
    fn album_strategy(
        &mut self,
        album: &str,
        candidates: &[String],
    ) -> Result<Option<TagSet>, ScoutError> {
        for candidate in candidates {
            let attempt = self.verified_release(album, candidate, Some(album));
            if let Some(tags) = absorb("album search", candidate, attempt)? {
                return Ok(Some(tags));
            }
        }
        Ok(None)
    }

    /// Search by track name; accept on artist similarity only — release
    /// titles rarely resemble track titles.
    fn track_strategy(
        &mut self,
        track_name: &str,
        candidates: &[String],
    ) -> Result<Option<TagSet>, ScoutError> {
        for candidate in candidates {
            let attempt = self.verified_release(track_name, candidate, None);
            if let Some(tags) = absorb("track search", candidate, attempt)? {
                return Ok(Some(tags));
            }
        }
        Ok(None)
    }

    /// Search the artist index; on a similar artist, take their most
    /// relevant release unconditionally.
    fn artist_strategy(&mut self, candidates: &[String]) -> Result<Option<TagSet>, ScoutError> {
        for candidate in candidates {
            let attempt = self.artist_top_release(candidate);
            if let Some(tags) = absorb("artist search", candidate, attempt)? {
                return Ok(Some(tags));
            }
        }
        Ok(None)
    }

    /// Encyclopedia: release search first, then recording search. The
    /// credited artist's community tags become genres (the encyclopedia
    /// has no style vocabulary).
    fn encyclopedia_strategy(
        &mut self,
        track: &TrackDescriptor,
    ) -> Result<Option<TagSet>, ScoutError> {
        if let Some(album) = track.album.as_deref() {
            let attempt = self.encyclopedia_tags(album, &track.artist, true);
            if let Some(tags) = absorb("encyclopedia release", &track.artist, attempt)? {
                return Ok(Some(tags));
            }
        }

        let attempt = self.encyclopedia_tags(&track.track, &track.artist, false);
        if let Some(tags) = absorb("encyclopedia recording", &track.artist, attempt)? {
            return Ok(Some(tags));
        }

        Ok(None)
    }

    /// Last resort: free-text web lookup.
    fn web_strategy(&mut self, track: &TrackDescriptor) -> Result<Option<TagSet>, ScoutError> {
        let retry = self.retry;
        let web = &mut self.web;

        let attempt = call_with_retry(&retry, || {
            web.genres_for(&track.track, Some(&track.artist))
        })
        .map(|(genres, styles)| {
            let tags = TagSet { genres, styles };
            if tags.is_empty() {
                None
            } else {
                Some(tags)
            }
        });

        absorb("web lookup", &track.artist, attempt)
    }

    // ── Per-candidate lookups ────────────────────────────────────────────────

    /// One marketplace query for one artist candidate: scan the hits in
    /// order, fetch each full release, return the first that verifies.
    /// `accept_title` additionally accepts a release whose title matches it.
    fn verified_release(
        &mut self,
        query: &str,
        candidate: &str,
        accept_title: Option<&str>,
    ) -> Result<Option<TagSet>, ScoutError> {
        let retry = self.retry;
        let limit = self.limit;
        let threshold = self.threshold;
        let marketplace = &mut self.marketplace;

        let hits = call_with_retry(&retry, || {
            marketplace.search_release(query, Some(candidate), limit)
        })?;

        for hit in hits {
            let release = match call_with_retry(&retry, || marketplace.fetch_release(hit.id)) {
                Ok(release) => release,
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            };

            let title_ok = accept_title
                .map_or(false, |title| is_similar(&release.title, title, threshold));
            let artist_ok = release
                .artists
                .iter()
                .any(|artist| is_similar(artist, candidate, threshold));

            if title_ok || artist_ok {
                log::debug!(
                    "verified release {} '{}' for candidate '{}'",
                    release.id,
                    release.title,
                    candidate
                );
                return Ok(Some(TagSet {
                    genres: release.genres,
                    styles: release.styles,
                }));
            }
        }

        Ok(None)
    }

    /// Artist-index lookup for one candidate: verify the top artist hit,
    /// then take their most relevant release.
    fn artist_top_release(&mut self, candidate: &str) -> Result<Option<TagSet>, ScoutError> {
        let retry = self.retry;
        let limit = self.limit;
        let threshold = self.threshold;
        let marketplace = &mut self.marketplace;

        let artists = call_with_retry(&retry, || marketplace.search_artist(candidate, limit))?;
        let artist = match artists.first() {
            Some(artist) if is_similar(&artist.name, candidate, threshold) => artist,
            _ => return Ok(None),
        };

        let releases = call_with_retry(&retry, || {
            marketplace.search_release("", Some(&artist.name), limit)
        })?;
        let first = match releases.first() {
            Some(first) => first,
            None => return Ok(None),
        };

        // Search hits usually carry tags already; only fetch the full
        // record when they don't.
        if !first.genres.is_empty() || !first.styles.is_empty() {
            return Ok(Some(TagSet {
                genres: first.genres.clone(),
                styles: first.styles.clone(),
            }));
        }

        let release = call_with_retry(&retry, || marketplace.fetch_release(first.id))?;
        Ok(Some(TagSet {
            genres: release.genres,
            styles: release.styles,
        }))
    }

    /// One encyclopedia query: follow the first hit's credited artist to
    /// their tags.
    fn encyclopedia_tags(
        &mut self,
        title: &str,
        artist: &str,
        by_release: bool,
    ) -> Result<Option<TagSet>, ScoutError> {
        let retry = self.retry;
        let limit = self.limit;
        let encyclopedia = &mut self.encyclopedia;

        let records = if by_release {
            call_with_retry(&retry, || {
                encyclopedia.search_release(title, Some(artist), limit)
            })?
        } else {
            call_with_retry(&retry, || {
                encyclopedia.search_recording(title, Some(artist), limit)
            })?
        };

        let artist_id = match records.first().and_then(|r| r.artist_id.clone()) {
            Some(id) => id,
            None => return Ok(None),
        };

        let tags = call_with_retry(&retry, || encyclopedia.artist_tags(&artist_id))?;
        if tags.is_empty() {
            return Ok(None);
        }

        Ok(Some(TagSet {
            genres: tags,
            styles: Vec::new(),
        }))
    }
}

/// Per-candidate error boundary: transient errors (already past their
/// retry budget) escalate, everything else becomes "try the next
/// candidate".
fn absorb(
    what: &str,
    candidate: &str,
    result: Result<Option<TagSet>, ScoutError>,
) -> Result<Option<TagSet>, ScoutError> {
    match result {
        Ok(tags) => Ok(tags),
        Err(e) if e.is_transient() => Err(e),
        Err(e) if e.is_not_found() => {
            log::debug!("{} for '{}': {}", what, candidate, e);
            Ok(None)
        }
        Err(e) => {
            log::warn!("{} for '{}' failed: {}", what, candidate, e);
            Ok(None)
        }
    }
}
