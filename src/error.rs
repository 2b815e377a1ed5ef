//! Error taxonomy shared by all catalog clients and the resolver.
//!
//! The distinction that matters downstream is retryability: `Transient`
//! errors are worth retrying with backoff, `NotFound` means "move on to the
//! next candidate", and everything else is absorbed at the per-candidate
//! boundary by the resolver.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    /// Connection failure, timeout, 429 or 5xx — retried with backoff.
    #[error("transient catalog error: {0}")]
    Transient(String),

    /// The remote explicitly reported no match (404 / empty result).
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or invalid credentials/configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// A response that could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Anything else a catalog call produced.
    #[error("catalog error: {0}")]
    Unexpected(String),
}

impl ScoutError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ScoutError::Transient(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ScoutError::NotFound(_))
    }
}

impl From<ureq::Error> for ScoutError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(404, _) => ScoutError::NotFound("HTTP 404".to_string()),
            ureq::Error::Status(code, _) => {
                if code == 429 || code >= 500 {
                    ScoutError::Transient(format!("HTTP {}", code))
                } else {
                    ScoutError::Unexpected(format!("HTTP {}", code))
                }
            }
            ureq::Error::Transport(t) => ScoutError::Transient(t.to_string()),
        }
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(e: serde_json::Error) -> Self {
        ScoutError::Parse(e.to_string())
    }
}

// Reading a response body can fail mid-stream; treat it like any other
// network interruption.
impl From<std::io::Error> for ScoutError {
    fn from(e: std::io::Error) -> Self {
        ScoutError::Transient(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ScoutError::Transient("timeout".into()).is_transient());
        assert!(!ScoutError::NotFound("x".into()).is_transient());
        assert!(!ScoutError::Config("x".into()).is_transient());
        assert!(ScoutError::NotFound("x".into()).is_not_found());
    }
}
