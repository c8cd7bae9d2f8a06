//! HTTP client abstraction for testability.
//!
//! Catalog and app-list fetches go through [`AsyncHttpClient`] so tests can
//! substitute a mock and never touch the network.

use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors from an HTTP fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    /// The client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or timed out.
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be read.
    #[error("failed to read response from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Trait for async HTTP GET operations.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the body bytes.
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, HttpError>>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new client with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Creates a new client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("depotsize/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, HttpError>> {
        Box::pin(async move {
            let response =
                self.client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| HttpError::Request {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })?;

            if !response.status().is_success() {
                return Err(HttpError::Status {
                    url: url.to_string(),
                    status: response.status().as_u16(),
                });
            }

            response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| HttpError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
        })
    }
}
