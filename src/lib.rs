//! Deadline Countdown - polls a remote deadline and counts it down locally
//!
//! The countdown engine owns the remaining-time state, reconciles periodic
//! remote fetches with a local one-second tick, and publishes every change
//! to subscribers. A small HTTP API exposes the state and its formatting.

pub mod api;
pub mod config;
pub mod display;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use display::{DisplayInfo, Severity};
pub use services::{DeadlineFetcher, FetchError, HttpFetcher, MockFetcher, RetryPolicy};
pub use state::{AppState, CountdownEngine, DeadlineState};
pub use tasks::{CountdownSession, SessionConfig};
pub use utils::signals::shutdown_signal;
