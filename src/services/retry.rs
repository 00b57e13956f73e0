//! Uniform retry-then-fail policy for deadline fetches

use std::{future::Future, time::Duration};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::FetchError;

/// Bounded retry with exponential backoff.
///
/// Every failure is treated as retryable. A zero `initial_backoff` retries
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            ..Self::default()
        }
    }

    /// Retry without waiting between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn backoff_for(&self, failed_attempt: u32) -> Duration {
        if self.initial_backoff.is_zero() || failed_attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 1u32 << (failed_attempt - 1).min(16);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff.max(self.initial_backoff))
    }

    /// Run `op` until it succeeds or `max_attempts` is reached
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Fetch succeeded on attempt {}/{}", attempt, max_attempts);
                    }
                    return Ok(value);
                }
                Err(e) if attempt >= max_attempts => {
                    return Err(FetchError::Exhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.backoff_for(attempt);
                    warn!(
                        "Fetch attempt {}/{} failed: {}, retrying in {}ms",
                        attempt,
                        max_attempts,
                        e,
                        delay.as_millis()
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
        }
    }
}
