//! Minimum-interval pacing for catalog requests.
//!
//! Every catalog this crate talks to enforces a request rate (MusicBrainz
//! ~1 req/s, Discogs 60 req/min authenticated). Each client owns one
//! limiter and calls [`RateLimiter::wait_if_needed`] before every request.
//! Backoff after failures is the retry wrapper's job, not the limiter's.

use std::thread;
use std::time::{Duration, Instant};

/// Enforces a minimum interval between consecutive requests.
pub struct RateLimiter {
    name: String,
    interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// * `name` — label for log messages (e.g. "Discogs", "MusicBrainz")
    /// * `interval` — minimum time between requests
    pub fn new(name: &str, interval: Duration) -> Self {
        RateLimiter {
            name: name.to_string(),
            interval,
            last_request: None,
        }
    }

    /// Convenience: minimum interval in milliseconds.
    pub fn from_millis(name: &str, millis: u64) -> Self {
        Self::new(name, Duration::from_millis(millis))
    }

    /// Sleep if not enough time has elapsed since the last request.
    /// Must be called *before* making a request.
    pub fn wait_if_needed(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                log::debug!(
                    "[{}] rate limiting: waiting {:.2}s",
                    self.name,
                    wait.as_secs_f64()
                );
                thread::sleep(wait);
            }
        }
        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_does_not_wait() {
        let mut rl = RateLimiter::from_millis("test", 500);
        let start = Instant::now();
        rl.wait_if_needed();
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_second_call_waits_out_the_interval() {
        let mut rl = RateLimiter::from_millis("test", 50);
        let start = Instant::now();
        rl.wait_if_needed();
        rl.wait_if_needed();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
