//! State management module
//!
//! The deadline state, the countdown engine that owns it, and the shared
//! state served by the HTTP API.

pub mod app_state;
pub mod deadline_state;
pub mod engine;

// Re-export main types
pub use app_state::AppState;
pub use deadline_state::DeadlineState;
pub use engine::CountdownEngine;
