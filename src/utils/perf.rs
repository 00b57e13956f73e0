//! Method-level timing through explicit wrapper functions

use std::{
    collections::VecDeque,
    future::Future,
    sync::{Mutex, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of metrics kept; older entries are dropped first
pub const MAX_METRICS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetric {
    pub component_name: String,
    pub event_name: String,
    pub duration_ms: f64,
    pub timestamp: DateTime<Utc>,
}

/// Bounded in-memory log of timed operations
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    metrics: Mutex<VecDeque<PerformanceMetric>>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` and record how long it took
    pub fn measure<T>(&self, component: &str, event: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.record(component, event, start);
        result
    }

    /// Await `fut` and record how long it took
    pub async fn measure_async<F: Future>(&self, component: &str, event: &str, fut: F) -> F::Output {
        let start = Instant::now();
        let result = fut.await;
        self.record(component, event, start);
        result
    }

    fn record(&self, component: &str, event: &str, start: Instant) {
        self.add_metric(PerformanceMetric {
            component_name: component.to_string(),
            event_name: event.to_string(),
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
            timestamp: Utc::now(),
        });
    }

    pub fn add_metric(&self, metric: PerformanceMetric) {
        debug!(
            "Performance: {} - {}: {:.2}ms",
            metric.component_name, metric.event_name, metric.duration_ms
        );

        let mut metrics = self.metrics.lock().unwrap_or_else(PoisonError::into_inner);
        metrics.push_back(metric);
        while metrics.len() > MAX_METRICS {
            metrics.pop_front();
        }
    }

    /// Recorded metrics, oldest first
    pub fn metrics(&self) -> Vec<PerformanceMetric> {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
