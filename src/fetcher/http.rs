//! HTTP client helper shared by the job-board sources
//!
//! Provides a thin GET wrapper with:
//! - Per-source default headers (User-Agent, API keys)
//! - Status classification into [`FetcherError`] variants
//! - Bounded connect and request timeouts
//!
//! Failed requests are not retried; the pagination failure policy decides
//! what happens next.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::fetcher::{FetcherError, FetcherResult};

/// HTTP connect timeout (seconds) - time to establish TCP connection
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// HTTP request timeout (seconds) - overall time for the entire request
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build a pooled HTTP client with explicit timeouts
///
/// One client is built per source and reused for every page and language,
/// so connections to the same host are pooled.
pub fn pooled_client() -> FetcherResult<Arc<Client>> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .build()
        .map(Arc::new)
        .map_err(|e| FetcherError::NetworkError(format!("Failed to build HTTP client: {e}")))
}

/// Unified HTTP client for job-board API requests
pub struct JobBoardHttpClient {
    client: Arc<Client>,
    base_url: String,
    headers: HeaderMap,
}

impl JobBoardHttpClient {
    /// Create new HTTP client
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client (Arc for cheap cloning)
    /// * `base_url` - Full endpoint URL (e.g., "<https://api.hh.ru/vacancies>")
    pub fn new(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Add a header sent with every request
    ///
    /// # Errors
    /// Returns [`FetcherError::InvalidRequest`] when the value is not a valid header value
    pub fn with_header(mut self, name: &'static str, value: &str) -> FetcherResult<Self> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetcherError::InvalidRequest(format!("Invalid value for {name}: {e}")))?;
        self.headers.insert(HeaderName::from_static(name), value);
        Ok(self)
    }

    /// Headers sent with every request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Execute GET request with generic deserialization
    ///
    /// # Arguments
    /// * `params` - Query parameters as key-value pairs
    ///
    /// # Errors
    /// Returns FetcherError on network, status, or parse errors
    pub async fn get<T>(&self, params: &[(&str, String)]) -> FetcherResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(
            "Making GET request to: {} with {} params",
            self.base_url,
            params.len()
        );

        let response = self
            .client
            .get(&self.base_url)
            .headers(self.headers.clone())
            .query(params)
            .send()
            .await
            .map_err(|e| FetcherError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, &error_text));
        }

        response.json::<T>().await.map_err(|e| {
            FetcherError::ParseError(format!("Failed to deserialize response: {e}"))
        })
    }
}

/// Classify a non-success status
pub fn status_error(status: StatusCode, body: &str) -> FetcherError {
    if status.is_server_error() {
        FetcherError::HttpError(format!("Server error {status}: {body}"))
    } else if status.is_client_error() {
        FetcherError::HttpError(format!("Client error {status}: {body}"))
    } else {
        FetcherError::HttpError(format!("Unexpected status {status}: {body}"))
    }
}
