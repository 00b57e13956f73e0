//! Local countdown background task

use std::{sync::Arc, time::Duration};
use tracing::{info, trace};

use super::Clock;
use crate::state::CountdownEngine;

/// Decrement the engine once per clock period, forever
pub async fn countdown_tick_task(engine: Arc<CountdownEngine>, period: Duration) {
    let mut clock = Clock::new(period);
    info!("Starting countdown tick task ({}ms period)", clock.period().as_millis());

    loop {
        clock.tick().await;
        if let Some(remaining) = engine.tick() {
            trace!("Tick: {}s left", remaining);
        }
    }
}
