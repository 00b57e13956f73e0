//! Remote deadline fetcher contract

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body returned by `GET /api/deadline`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineResponse {
    pub seconds_left: f64,
}

impl DeadlineResponse {
    pub fn new(seconds_left: u64) -> Self {
        Self {
            seconds_left: seconds_left as f64,
        }
    }

    /// Remaining whole seconds, truncated toward zero and clamped at 0
    pub fn seconds(&self) -> u64 {
        if self.seconds_left.is_finite() && self.seconds_left > 0.0 {
            self.seconds_left.trunc() as u64
        } else {
            0
        }
    }
}

/// Every way a deadline fetch can fail. The engine only ever sees the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Error {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid deadline response: {0}")]
    Decode(String),

    #[error("{last} (gave up after {attempts} attempts)")]
    Exhausted { attempts: u32, last: Box<FetchError> },
}

impl FetchError {
    /// The error of the final attempt, unwrapping retry exhaustion
    pub fn root(&self) -> &FetchError {
        match self {
            FetchError::Exhausted { last, .. } => last.root(),
            other => other,
        }
    }
}

/// Source of authoritative `secondsLeft` values
pub trait DeadlineFetcher: Send + Sync {
    /// Perform one fetch. No side effects besides the network call.
    fn get(&self) -> BoxFuture<'_, Result<DeadlineResponse, FetchError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_wire_name() {
        let parsed: DeadlineResponse = serde_json::from_str(r#"{"secondsLeft": 42}"#).unwrap();
        assert_eq!(parsed.seconds(), 42);

        let json = serde_json::to_string(&DeadlineResponse::new(7)).unwrap();
        assert_eq!(json, r#"{"secondsLeft":7.0}"#);
    }

    #[test]
    fn response_seconds_clamp_and_truncate() {
        assert_eq!(DeadlineResponse { seconds_left: -5.0 }.seconds(), 0);
        assert_eq!(DeadlineResponse { seconds_left: 12.9 }.seconds(), 12);
        assert_eq!(DeadlineResponse { seconds_left: f64::NAN }.seconds(), 0);
    }

    #[test]
    fn exhausted_error_reads_like_the_last_failure() {
        let err = FetchError::Exhausted {
            attempts: 3,
            last: Box::new(FetchError::Network("connection refused".to_string())),
        };
        assert_eq!(
            err.to_string(),
            "Network error: connection refused (gave up after 3 attempts)"
        );
        assert_eq!(
            err.root(),
            &FetchError::Network("connection refused".to_string())
        );
    }
}
