//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::{self, DisplayInfo},
    state::DeadlineState,
    utils::PerformanceMetric,
};

/// Full countdown status as rendered for a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub state: DeadlineState,
    pub display: DisplayInfo,
    pub message: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub almost_deadline: bool,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusResponse {
    pub fn from_state(state: DeadlineState, uptime: String) -> Self {
        Self {
            display: DisplayInfo::from_state(&state),
            message: display::status_message(state.seconds_left),
            title: state.seconds_left.map(display::title),
            description: state.seconds_left.map(display::description),
            almost_deadline: display::is_almost_deadline(state.seconds_left),
            state,
            uptime,
            timestamp: Utc::now(),
        }
    }
}

/// Response to a state-changing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub state: DeadlineState,
}

impl ApiResponse {
    pub fn new(status: String, message: String, state: DeadlineState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            state,
        }
    }

    /// A refresh was started
    pub fn refreshing(state: DeadlineState) -> Self {
        Self::new(
            "refreshing".to_string(),
            "Deadline refresh started".to_string(),
            state,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub count: usize,
    pub metrics: Vec<PerformanceMetric>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
