pub mod aggregate;
pub mod allmusic;
pub mod artist;
pub mod catalog;
pub mod config;
pub mod discogs;
pub mod error;
pub mod musicbrainz;
pub mod rate_limiter;
pub mod resolver;
pub mod retry;
pub mod similarity;
pub mod text;

pub use aggregate::{merge, TagSet};
pub use allmusic::AllMusicScraper;
pub use artist::{search_candidates, split_artists};
pub use catalog::{CatalogRelease, Encyclopedia, Marketplace, TagSource, WebLookup};
pub use config::Config;
pub use discogs::DiscogsClient;
pub use error::ScoutError;
pub use musicbrainz::MusicBrainzClient;
pub use resolver::{ResolutionResult, Resolver, Strategy, TrackDescriptor};
pub use retry::{call_with_retry, RetryPolicy};
pub use similarity::is_similar;
pub use text::normalize;
