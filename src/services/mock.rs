//! Simulated deadline backend for running without a live server

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use futures::{future::BoxFuture, FutureExt};
use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use super::{DeadlineFetcher, DeadlineResponse, FetchError};

/// Seconds reported by the mock backend unless configured otherwise
pub const DEFAULT_MOCK_SECONDS: u64 = 35;

/// Injected latency of a mocked call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockDelay {
    Fixed(Duration),
    Random { min: Duration, max: Duration },
}

impl MockDelay {
    pub fn sample(&self) -> Duration {
        match *self {
            MockDelay::Fixed(delay) => delay,
            MockDelay::Random { min, max } if max <= min => min,
            MockDelay::Random { min, max } => {
                let millis = rand::thread_rng()
                    .gen_range(min.as_millis() as u64..=max.as_millis() as u64);
                Duration::from_millis(millis)
            }
        }
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        MockDelay::Random {
            min: Duration::from_millis(200),
            max: Duration::from_millis(1000),
        }
    }
}

/// Returns a fixed deadline after a delay, failing now and then
#[derive(Debug)]
pub struct MockFetcher {
    seconds_left: u64,
    delay: MockDelay,
    failure_rate: f64,
    calls: AtomicU64,
}

impl MockFetcher {
    pub fn new(seconds_left: u64) -> Self {
        Self {
            seconds_left,
            delay: MockDelay::default(),
            failure_rate: 0.1,
            calls: AtomicU64::new(0),
        }
    }

    pub fn with_delay(mut self, delay: MockDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Probability in `[0, 1]` that a call fails
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        self
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Number of calls made so far
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    async fn respond(&self) -> Result<DeadlineResponse, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        let delay = self.delay.sample();
        let fail = rand::thread_rng().gen_bool(self.failure_rate);

        debug!("Mock deadline call #{} answering in {}ms", call, delay.as_millis());
        sleep(delay).await;

        if fail {
            return Err(FetchError::Network("Simulated network failure".to_string()));
        }
        Ok(DeadlineResponse::new(self.seconds_left))
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_SECONDS)
    }
}

impl DeadlineFetcher for MockFetcher {
    fn get(&self) -> BoxFuture<'_, Result<DeadlineResponse, FetchError>> {
        self.respond().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_delay_stays_in_bounds() {
        let delay = MockDelay::default();
        for _ in 0..200 {
            let d = delay.sample();
            assert!(d >= Duration::from_millis(200) && d <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn inverted_random_range_uses_min() {
        let delay = MockDelay::Random {
            min: Duration::from_millis(500),
            max: Duration::from_millis(100),
        };
        assert_eq!(delay.sample(), Duration::from_millis(500));
    }

    #[test]
    fn failure_rate_is_clamped() {
        assert_eq!(MockFetcher::default().with_failure_rate(3.0).failure_rate(), 1.0);
        assert_eq!(MockFetcher::default().with_failure_rate(-1.0).failure_rate(), 0.0);
        assert_eq!(MockFetcher::default().with_failure_rate(f64::NAN).failure_rate(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn answers_with_configured_seconds_after_delay() {
        let fetcher = MockFetcher::default()
            .with_delay(MockDelay::Fixed(Duration::from_millis(2500)))
            .with_failure_rate(0.0);

        let started = tokio::time::Instant::now();
        let response = fetcher.get().await.unwrap();

        assert_eq!(response.seconds(), DEFAULT_MOCK_SECONDS);
        assert!(started.elapsed() >= Duration::from_millis(2500));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn always_failing_mock_reports_network_error() {
        let fetcher = MockFetcher::new(10)
            .with_delay(MockDelay::Fixed(Duration::ZERO))
            .with_failure_rate(1.0);

        let err = fetcher.get().await.unwrap_err();
        assert_eq!(err, FetchError::Network("Simulated network failure".to_string()));
    }
}
