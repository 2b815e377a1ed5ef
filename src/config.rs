//! Runtime configuration.
//!
//! Credentials come from the environment (a `.env` file is honored, as the
//! catalogs' terms require per-user tokens); missing credentials are a
//! fatal startup error, never a per-call one. Tunables have built-in
//! defaults that can be overridden from `~/.state/tagscout/defaults.toml`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ScoutError;
use crate::retry::RetryPolicy;
use crate::similarity::DEFAULT_THRESHOLD;

/// Base client identifier sent to every catalog.
const USER_AGENT_BASE: &str = "tagscout/0.1";

/// Optional tunable overrides read from the defaults file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Defaults {
    pub similarity_threshold: Option<f64>,
    pub search_limit: Option<u32>,
    pub max_retries: Option<u32>,
    pub retry_base_delay_ms: Option<u64>,
    pub discogs_interval_ms: Option<u64>,
    pub musicbrainz_interval_ms: Option<u64>,
}

impl Defaults {
    /// Defaults file path (~/.state/tagscout/defaults.toml).
    fn path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            Path::new(&home)
                .join(".state")
                .join("tagscout")
                .join("defaults.toml"),
        )
    }

    /// Load the defaults file; a missing file is an empty override set,
    /// an unreadable one is a configuration error.
    fn load() -> Result<Self, ScoutError> {
        let path = match Self::path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Defaults::default()),
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| ScoutError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ScoutError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Resolved configuration, built once at process start and handed to the
/// clients and the resolver. No global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discogs personal access token (DISCOGS_USER_TOKEN).
    pub discogs_token: String,
    /// Client identifier for every outbound request.
    pub user_agent: String,
    /// Match verification threshold in [0, 1].
    pub similarity_threshold: f64,
    /// Search hits examined per query.
    pub search_limit: u32,
    pub retry: RetryPolicy,
    pub discogs_interval: Duration,
    pub musicbrainz_interval: Duration,
}

impl Config {
    /// Read credentials from the environment and tunables from the
    /// defaults file.
    pub fn load() -> Result<Self, ScoutError> {
        dotenvy::dotenv().ok();

        let token = required_env("DISCOGS_USER_TOKEN")?;
        let contact = std::env::var("TAGSCOUT_CONTACT").ok();
        let defaults = Defaults::load()?;

        Ok(Self::resolve(token, contact, defaults))
    }

    fn resolve(discogs_token: String, contact: Option<String>, defaults: Defaults) -> Self {
        let user_agent = match contact {
            Some(c) if !c.trim().is_empty() => format!("{} ( {} )", USER_AGENT_BASE, c.trim()),
            _ => USER_AGENT_BASE.to_string(),
        };

        let base = RetryPolicy::default();
        let retry = RetryPolicy {
            max_retries: defaults.max_retries.unwrap_or(base.max_retries),
            base_delay: defaults
                .retry_base_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(base.base_delay),
        };

        Config {
            discogs_token,
            user_agent,
            similarity_threshold: defaults.similarity_threshold.unwrap_or(DEFAULT_THRESHOLD),
            search_limit: defaults.search_limit.unwrap_or(5),
            retry,
            // Authenticated Discogs allows 60 req/min; MusicBrainz asks for
            // at most 1 req/s.
            discogs_interval: Duration::from_millis(
                defaults.discogs_interval_ms.unwrap_or(1000),
            ),
            musicbrainz_interval: Duration::from_millis(
                defaults.musicbrainz_interval_ms.unwrap_or(1100),
            ),
        }
    }
}

fn required_env(name: &str) -> Result<String, ScoutError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ScoutError::Config(format!("{} is not set", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_built_in_defaults() {
        let cfg = Config::resolve("tok".into(), None, Defaults::default());
        assert_eq!(cfg.discogs_token, "tok");
        assert_eq!(cfg.user_agent, "tagscout/0.1");
        assert_eq!(cfg.similarity_threshold, 0.8);
        assert_eq!(cfg.search_limit, 5);
        assert_eq!(cfg.retry.max_retries, 3);
        assert_eq!(cfg.musicbrainz_interval, Duration::from_millis(1100));
    }

    #[test]
    fn test_resolve_contact_goes_into_user_agent() {
        let cfg = Config::resolve("tok".into(), Some("ops@example.org".into()), Defaults::default());
        assert_eq!(cfg.user_agent, "tagscout/0.1 ( ops@example.org )");
    }

    #[test]
    fn test_defaults_file_overrides() {
        let defaults: Defaults = toml::from_str(
            r#"
            similarity_threshold = 0.9
            search_limit = 3
            max_retries = 1
            retry_base_delay_ms = 250
            "#,
        )
        .unwrap();

        let cfg = Config::resolve("tok".into(), None, defaults);
        assert_eq!(cfg.similarity_threshold, 0.9);
        assert_eq!(cfg.search_limit, 3);
        assert_eq!(cfg.retry.max_retries, 1);
        assert_eq!(cfg.retry.base_delay, Duration::from_millis(250));
    }
}
