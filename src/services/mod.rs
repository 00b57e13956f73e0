//! Remote deadline fetching module
//!
//! This module contains the fetcher contract, its HTTP and mocked
//! implementations, and the retry policy wrapped around every fetch.

pub mod fetcher;
pub mod http;
pub mod mock;
pub mod retry;
pub mod scripted;

// Re-export main types
pub use fetcher::{DeadlineFetcher, DeadlineResponse, FetchError};
pub use http::{HttpFetcher, DEADLINE_PATH};
pub use mock::{MockDelay, MockFetcher, DEFAULT_MOCK_SECONDS};
pub use retry::RetryPolicy;
pub use scripted::ScriptedFetcher;
