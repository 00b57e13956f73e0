//! Periodic remote refresh background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::state::CountdownEngine;

/// Fetch the deadline immediately, then once per `poll_interval`.
///
/// Failures are already recorded in the engine state; the loop keeps going
/// and the local countdown carries on in the meantime.
pub async fn auto_refresh_task(engine: Arc<CountdownEngine>, poll_interval: Duration) {
    info!("Starting auto-refresh task ({}s period)", poll_interval.as_secs_f64());

    let mut interval = interval(poll_interval.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        match engine.fetch_deadline().await {
            Ok(state) => debug!("Scheduled refresh: {:?}s left", state.seconds_left),
            Err(e) => warn!("Scheduled refresh failed: {}", e),
        }
    }
}
