//! Deadline state structure and its mutations

use serde::{Deserialize, Serialize};

/// Remaining-time state owned by the countdown engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineState {
    /// Remaining seconds, unset until the first successful fetch
    pub seconds_left: Option<u64>,
    /// A fetch is outstanding and its outcome has not been applied yet
    pub loading: bool,
    /// Description of the last fetch failure
    pub error: Option<String>,
    pub last_fetch_latency_ms: Option<u64>,
    /// Number of successful fetches
    pub fetch_count: u64,
}

impl DeadlineState {
    /// Initial state: no value, no error, loading
    pub fn new() -> Self {
        Self {
            seconds_left: None,
            loading: true,
            error: None,
            last_fetch_latency_ms: None,
            fetch_count: 0,
        }
    }

    pub fn has_value(&self) -> bool {
        self.seconds_left.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.seconds_left == Some(0)
    }

    /// Decrement by one second, floored at 0. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        match self.seconds_left {
            Some(seconds) if seconds > 0 => {
                self.seconds_left = Some(seconds - 1);
                true
            }
            _ => false,
        }
    }

    /// Apply an authoritative value; it replaces any locally ticked value
    pub fn apply_success(&mut self, seconds_left: u64, latency_ms: u64) {
        self.seconds_left = Some(seconds_left);
        self.error = None;
        self.loading = false;
        self.last_fetch_latency_ms = Some(latency_ms);
        self.fetch_count += 1;
    }

    /// Record a failed fetch; `seconds_left` is left untouched
    pub fn apply_failure(&mut self, error: String) {
        self.error = Some(error);
        self.loading = false;
    }

    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }
}

impl Default for DeadlineState {
    fn default() -> Self {
        Self::new()
    }
}
