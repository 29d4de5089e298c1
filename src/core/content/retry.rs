//! Retry with exponential backoff.

use crate::core::error::Result;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// How many times and how patiently to retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before retry number `attempt` (0-based), jitter included
    fn delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let backoff = base_ms.saturating_mul(2u64.saturating_pow(attempt));
        let jitter = if base_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..base_ms)
        };
        Duration::from_millis(backoff.saturating_add(jitter))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

/// Run `f` until it succeeds, fails permanently, or retries run out
///
/// Only errors for which [`is_retryable`](crate::core::error::WealthpressError::is_retryable)
/// holds are retried.
pub async fn retry_with_backoff<F, Fut, T>(policy: RetryPolicy, what: &str, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retries = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_retryable() {
                    warn!(target_name = what, error = %e, "Non-retryable error, failing fast");
                    return Err(e);
                }

                if retries >= policy.max_retries {
                    warn!(
                        target_name = what,
                        error = %e,
                        "Max retries ({}) exceeded",
                        policy.max_retries
                    );
                    return Err(e);
                }

                let delay = policy.delay(retries);
                warn!(
                    target_name = what,
                    error = %e,
                    "Retryable error, attempt {}/{}, retrying in {}ms",
                    retries + 1,
                    policy.max_retries,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                retries += 1;
            }
        }
    }
}
