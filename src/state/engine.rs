//! Countdown engine: the single writer of deadline state

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::{sync::watch, task::JoinHandle, time::Instant};
use tracing::{debug, info, warn};

use super::DeadlineState;
use crate::{
    services::{DeadlineFetcher, FetchError, RetryPolicy},
    utils::PerformanceTracker,
};

const COMPONENT: &str = "CountdownEngine";

/// Owns the remaining-time state and reconciles remote fetches with local ticks.
///
/// Every mutation happens under one lock and is published to subscribers
/// before the lock is released, so subscribers observe writes in the order
/// they were applied. A fetch result always replaces the current value in
/// full, even if ticks were applied while the fetch was in flight.
pub struct CountdownEngine {
    fetcher: Arc<dyn DeadlineFetcher>,
    retry: RetryPolicy,
    tracker: Arc<PerformanceTracker>,
    state: Mutex<DeadlineState>,
    state_tx: watch::Sender<DeadlineState>,
}

impl CountdownEngine {
    pub fn new(fetcher: Arc<dyn DeadlineFetcher>, retry: RetryPolicy) -> Self {
        Self::with_tracker(fetcher, retry, Arc::new(PerformanceTracker::new()))
    }

    pub fn with_tracker(
        fetcher: Arc<dyn DeadlineFetcher>,
        retry: RetryPolicy,
        tracker: Arc<PerformanceTracker>,
    ) -> Self {
        let (state_tx, _) = watch::channel(DeadlineState::new());
        Self {
            fetcher,
            retry,
            tracker,
            state: Mutex::new(DeadlineState::new()),
            state_tx,
        }
    }

    pub fn tracker(&self) -> &Arc<PerformanceTracker> {
        &self.tracker
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Current state
    pub fn snapshot(&self) -> DeadlineState {
        self.lock_state().clone()
    }

    /// Receive every published state
    pub fn subscribe(&self) -> watch::Receiver<DeadlineState> {
        self.state_tx.subscribe()
    }

    fn lock_state(&self) -> MutexGuard<'_, DeadlineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `updater` and publish the result
    fn update<F>(&self, updater: F) -> DeadlineState
    where
        F: FnOnce(&mut DeadlineState),
    {
        let mut state = self.lock_state();
        updater(&mut state);
        let new_state = state.clone();
        self.state_tx.send_replace(new_state.clone());
        new_state
    }

    /// Fetch the authoritative deadline, retrying per the policy.
    ///
    /// Failures are recorded in the state and returned; the current
    /// `seconds_left` is kept.
    pub async fn fetch_deadline(&self) -> Result<DeadlineState, FetchError> {
        self.tracker
            .measure_async(COMPONENT, "fetchDeadline", self.fetch_and_apply())
            .await
    }

    async fn fetch_and_apply(&self) -> Result<DeadlineState, FetchError> {
        let started = Instant::now();
        let fetcher: &dyn DeadlineFetcher = self.fetcher.as_ref();

        match self.retry.run(move || fetcher.get()).await {
            Ok(response) => {
                let seconds_left = response.seconds();
                let latency_ms = started.elapsed().as_millis() as u64;
                let state = self.update(|s| s.apply_success(seconds_left, latency_ms));
                debug!("Deadline fetched: {}s left", seconds_left);
                Ok(state)
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Deadline fetch failed: {}", message);
                self.update(|s| s.apply_failure(message));
                Err(e)
            }
        }
    }

    /// Manual refresh: mark the state as loading, then fetch
    pub async fn refresh(&self) -> Result<DeadlineState, FetchError> {
        self.begin_refresh();
        self.tracker
            .measure_async(COMPONENT, "refreshDeadline", self.fetch_deadline())
            .await
    }

    /// Fire-and-forget refresh. `loading` is set before this returns, and
    /// the returned state is the one published at that point.
    pub fn spawn_refresh(self: &Arc<Self>) -> (DeadlineState, JoinHandle<()>) {
        let state = self.begin_refresh();
        let engine = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let result = engine
                .tracker
                .measure_async(COMPONENT, "refreshDeadline", engine.fetch_deadline())
                .await;
            if let Err(e) = result {
                debug!("Manual refresh failed: {}", e);
            }
        });
        (state, handle)
    }

    fn begin_refresh(&self) -> DeadlineState {
        info!("Refreshing deadline");
        self.update(DeadlineState::begin_refresh)
    }

    /// One local second elapsed. Returns the remaining seconds, if known.
    pub fn tick(&self) -> Option<u64> {
        let mut state = self.lock_state();
        if state.tick() {
            self.state_tx.send_replace(state.clone());
        }
        state.seconds_left
    }
}

impl std::fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("retry", &self.retry)
            .field("state", &*self.lock_state())
            .finish_non_exhaustive()
    }
}
