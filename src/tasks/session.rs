//! Scoped ownership of the countdown's background tasks

use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tracing::info;

use super::{auto_refresh_task, countdown_tick_task, state_observer_task};
use crate::state::CountdownEngine;

/// Timer periods for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Local decrement period
    pub tick_interval: Duration,
    /// Remote refresh period
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            poll_interval: Duration::from_secs(10),
        }
    }
}

/// The tick loop, the auto-refresh loop and the state observer for one
/// consumer of an engine.
///
/// Dropping the session aborts every task, so no timer keeps mutating the
/// engine after its consumer is gone.
#[derive(Debug)]
pub struct CountdownSession {
    tasks: Vec<JoinHandle<()>>,
}

impl CountdownSession {
    /// Spawn the session's tasks onto the current runtime
    pub fn start(engine: &Arc<CountdownEngine>, config: &SessionConfig) -> Self {
        info!(
            "Starting countdown session: tick={}ms, poll={}ms",
            config.tick_interval.as_millis(),
            config.poll_interval.as_millis()
        );

        let tasks = vec![
            tokio::spawn(state_observer_task(engine.subscribe())),
            tokio::spawn(countdown_tick_task(Arc::clone(engine), config.tick_interval)),
            tokio::spawn(auto_refresh_task(Arc::clone(engine), config.poll_interval)),
        ];

        Self { tasks }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    /// Abort every task and wait until they are gone
    pub async fn shutdown(mut self) {
        for task in &self.tasks {
            task.abort();
        }
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
        info!("Countdown session stopped");
    }
}

impl Drop for CountdownSession {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{FetchError, RetryPolicy, ScriptedFetcher};
    use tokio::time::sleep;

    fn session_config() -> SessionConfig {
        SessionConfig {
            tick_interval: Duration::from_secs(1),
            poll_interval: Duration::from_secs(3600),
        }
    }

    fn engine(fetcher: ScriptedFetcher) -> Arc<CountdownEngine> {
        Arc::new(CountdownEngine::new(Arc::new(fetcher), RetryPolicy::immediate(3)))
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_on_start_then_counts_down() {
        let engine = engine(ScriptedFetcher::always(60));
        let session = CountdownSession::start(&engine, &session_config());

        sleep(Duration::from_millis(2500)).await;
        let state = engine.snapshot();
        assert_eq!(state.seconds_left, Some(58));
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert!(session.is_running());

        session.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_ticking() {
        let engine = engine(ScriptedFetcher::always(60));
        let session = CountdownSession::start(&engine, &session_config());
        sleep(Duration::from_millis(2500)).await;

        session.shutdown().await;
        sleep(Duration::from_secs(10)).await;
        assert_eq!(engine.snapshot().seconds_left, Some(58));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_session_stops_ticking() {
        let engine = engine(ScriptedFetcher::always(60));
        {
            let _session = CountdownSession::start(&engine, &session_config());
            sleep(Duration::from_millis(1500)).await;
        }
        assert_eq!(engine.snapshot().seconds_left, Some(59));

        sleep(Duration::from_secs(10)).await;
        assert_eq!(engine.snapshot().seconds_left, Some(59));
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_refresh_resets_the_local_estimate() {
        let fetcher = ScriptedFetcher::new([Ok(60), Ok(100)]);
        let engine = engine(fetcher);
        let session = CountdownSession::start(
            &engine,
            &SessionConfig {
                tick_interval: Duration::from_secs(1),
                poll_interval: Duration::from_millis(5500),
            },
        );

        sleep(Duration::from_millis(5200)).await;
        assert_eq!(engine.snapshot().seconds_left, Some(55));

        sleep(Duration::from_millis(500)).await;
        assert_eq!(engine.snapshot().seconds_left, Some(100));
        assert_eq!(engine.snapshot().fetch_count, 2);

        session.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_counting_while_the_backend_fails() {
        let fetcher = ScriptedFetcher::new([
            Ok(20),
            Err(FetchError::Network("connection refused".to_string())),
        ]);
        let engine = engine(fetcher);
        let session = CountdownSession::start(
            &engine,
            &SessionConfig {
                tick_interval: Duration::from_secs(1),
                poll_interval: Duration::from_millis(2500),
            },
        );

        sleep(Duration::from_millis(4200)).await;
        let state = engine.snapshot();
        assert_eq!(state.seconds_left, Some(16));
        assert!(state.error.is_some());
        assert!(!state.loading);

        session.shutdown().await;
    }
}
