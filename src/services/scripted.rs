//! Fetcher that replays predetermined outcomes

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, PoisonError,
    },
    time::Duration,
};
use futures::{future::BoxFuture, FutureExt};
use tokio::time::sleep;

use super::{DeadlineFetcher, DeadlineResponse, FetchError};

/// Replays queued outcomes in order; once the queue is drained the last
/// outcome repeats.
#[derive(Debug)]
pub struct ScriptedFetcher {
    outcomes: Mutex<VecDeque<Result<u64, FetchError>>>,
    last: Mutex<Option<Result<u64, FetchError>>>,
    delay: Duration,
    calls: AtomicU64,
}

impl ScriptedFetcher {
    pub fn new(outcomes: impl IntoIterator<Item = Result<u64, FetchError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            last: Mutex::new(None),
            delay: Duration::ZERO,
            calls: AtomicU64::new(0),
        }
    }

    /// Always answer with `seconds_left`
    pub fn always(seconds_left: u64) -> Self {
        Self::new([Ok(seconds_left)])
    }

    /// Always fail with `error`
    pub fn failing(error: FetchError) -> Self {
        Self::new([Err(error)])
    }

    /// Wait this long before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn push(&self, outcome: Result<u64, FetchError>) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> Result<u64, FetchError> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            *last = Some(next);
        }
        (*last)
            .clone()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted outcome".to_string())))
    }

    async fn answer(&self) -> Result<DeadlineResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.next_outcome();
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        outcome.map(DeadlineResponse::new)
    }
}

impl DeadlineFetcher for ScriptedFetcher {
    fn get(&self) -> BoxFuture<'_, Result<DeadlineResponse, FetchError>> {
        self.answer().boxed()
    }
}
