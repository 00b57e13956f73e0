//! Background task that reports engine state changes to the log

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{display::Severity, state::DeadlineState};

/// Something worth reporting between two consecutive states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    SecondsChanged(u64),
    SeverityChanged { from: Severity, to: Severity },
    FetchCompleted { count: u64, latency_ms: u64 },
    FetchFailed(String),
    DeadlineReached,
}

/// Compare two consecutive states
pub fn state_events(prev: &DeadlineState, next: &DeadlineState) -> Vec<StateEvent> {
    let mut events = Vec::new();

    if next.fetch_count > prev.fetch_count {
        events.push(StateEvent::FetchCompleted {
            count: next.fetch_count,
            latency_ms: next.last_fetch_latency_ms.unwrap_or(0),
        });
    }

    if let Some(error) = &next.error {
        if prev.error.as_ref() != Some(error) {
            events.push(StateEvent::FetchFailed(error.clone()));
        }
    }

    if let Some(seconds) = next.seconds_left {
        if prev.seconds_left != Some(seconds) {
            events.push(StateEvent::SecondsChanged(seconds));

            let from = severity_of(prev);
            let to = severity_of(next);
            if prev.seconds_left.is_none() || from != to {
                events.push(StateEvent::SeverityChanged { from, to });
            }
            if seconds == 0 {
                events.push(StateEvent::DeadlineReached);
            }
        }
    }

    events
}

fn severity_of(state: &DeadlineState) -> Severity {
    Severity::from_seconds(state.seconds_left.map(|s| s.min(i64::MAX as u64) as i64))
}

fn report(event: &StateEvent) {
    match event {
        StateEvent::SecondsChanged(seconds) => debug!("Seconds left: {}", seconds),
        StateEvent::SeverityChanged { from, to } => info!("Countdown is now {} (was {})", to, from),
        StateEvent::FetchCompleted { count, latency_ms } => {
            debug!("API call #{} completed in {}ms", count, latency_ms)
        }
        StateEvent::FetchFailed(error) => warn!("Error loading deadline: {}", error),
        StateEvent::DeadlineReached => info!("Deadline reached!"),
    }
}

/// Log state transitions until the engine goes away
pub async fn state_observer_task(mut state_rx: watch::Receiver<DeadlineState>) {
    info!("Starting state observer task");

    let mut last = state_rx.borrow_and_update().clone();
    while state_rx.changed().await.is_ok() {
        let current = state_rx.borrow_and_update().clone();
        for event in state_events(&last, &current) {
            report(&event);
        }
        last = current;
    }

    debug!("State observer stopped: engine dropped");
}
