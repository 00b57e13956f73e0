//! Utility functions module
//!
//! Shutdown signal handling and performance tracking.

pub mod perf;
pub mod signals;

// Re-export main items
pub use perf::{PerformanceMetric, PerformanceTracker};
pub use signals::shutdown_signal;
