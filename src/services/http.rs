//! HTTP deadline fetcher

use futures::{future::BoxFuture, FutureExt};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error};

use super::{DeadlineFetcher, DeadlineResponse, FetchError};

/// Default path of the deadline endpoint
pub const DEADLINE_PATH: &str = "/api/deadline";

/// Fetches the deadline with `GET {url}`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<DeadlineResponse, FetchError> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            error!("Error {}: {}", status.as_u16(), message);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<DeadlineResponse>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl DeadlineFetcher for HttpFetcher {
    fn get(&self) -> BoxFuture<'_, Result<DeadlineResponse, FetchError>> {
        self.fetch().boxed()
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Pick the most useful description of a failed response: the body's
/// `message`, then the status reason phrase.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_body_message() {
        let msg = error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"statusCode":500,"message":"deadline store offline"}"#,
        );
        assert_eq!(msg, "deadline store offline");
    }

    #[test]
    fn falls_back_to_reason_phrase() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, "<html>"), "Not Found");
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, r#"{"message":""}"#),
            "Bad Gateway"
        );
    }

    #[test]
    fn unknown_status_without_body() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(error_message(status, ""), "Unknown error");
    }
}
