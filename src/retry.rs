//! Retry with exponential backoff and jitter.
//!
//! [`call_with_retry`] wraps any fallible operation without the operation
//! knowing: only [`ScoutError::Transient`] failures are retried, everything
//! else propagates on first occurrence. After the retry budget is spent the
//! last error propagates unchanged.

use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::error::ScoutError;

/// Retry budget and backoff base shared by all catalog calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt; `max_retries = 2` means at most
    /// 3 invocations.
    pub max_retries: u32,
    /// Backoff before retry n is `base_delay * 2^(n-1) * jitter`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Backoff before retry number `attempt` (1-based), with jitter drawn
/// uniformly from [0.8, 1.2] to avoid thundering-herd retries.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let jitter: f64 = rand::thread_rng().gen_range(0.8..=1.2);
    base.mul_f64(2f64.powi(attempt.saturating_sub(1) as i32) * jitter)
}

/// Invoke `op`, retrying transient failures with exponential backoff.
pub fn call_with_retry<T, F>(policy: &RetryPolicy, mut op: F) -> Result<T, ScoutError>
where
    F: FnMut() -> Result<T, ScoutError>,
{
    let mut attempt = 0u32;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = backoff_delay(policy.base_delay, attempt);
                log::debug!(
                    "transient error ({}), retry {}/{} in {:.2}s",
                    e,
                    attempt,
                    policy.max_retries,
                    delay.as_secs_f64()
                );
                thread::sleep(delay);
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn quick_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let mut calls = 0;
        let start = Instant::now();
        let result = call_with_retry(&quick_policy(3), || {
            calls += 1;
            if calls < 3 {
                Err(ScoutError::Transient("flaky".into()))
            } else {
                Ok(calls)
            }
        });

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
        // Two sleeps: >= 10ms*1*0.8 + 10ms*2*0.8 = 24ms
        assert!(start.elapsed() >= Duration::from_millis(24));
    }

    #[test]
    fn test_exhaustion_propagates_last_error() {
        let mut calls = 0;
        let result: Result<(), _> = call_with_retry(&quick_policy(2), || {
            calls += 1;
            Err(ScoutError::Transient("still down".into()))
        });

        // initial + 2 retries
        assert_eq!(calls, 3);
        assert!(matches!(result, Err(ScoutError::Transient(_))));
    }

    #[test]
    fn test_non_retryable_propagates_immediately() {
        let mut calls = 0;
        let result: Result<(), _> = call_with_retry(&quick_policy(5), || {
            calls += 1;
            Err(ScoutError::NotFound("no release".into()))
        });

        assert_eq!(calls, 1);
        assert!(matches!(result, Err(ScoutError::NotFound(_))));
    }

    #[test]
    fn test_zero_retries_means_single_attempt() {
        let mut calls = 0;
        let result: Result<(), _> = call_with_retry(&quick_policy(0), || {
            calls += 1;
            Err(ScoutError::Transient("down".into()))
        });

        assert_eq!(calls, 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_backoff_delay_bounds() {
        let base = Duration::from_millis(100);
        for attempt in 1..=4u32 {
            let factor = 2f64.powi(attempt as i32 - 1);
            for _ in 0..20 {
                let d = backoff_delay(base, attempt).as_secs_f64();
                assert!(d >= 0.1 * factor * 0.8 - 1e-9);
                assert!(d <= 0.1 * factor * 1.2 + 1e-9);
            }
        }
    }
}
