//! HTTP transport capability
//!
//! The attribute client never talks to the network directly; it goes through
//! an injected [`HttpTransport`]. Implementations return the raw response
//! body for every HTTP status. Only I/O failures are errors.

use async_trait::async_trait;
use bytes::Bytes;
use errors::{CmdbError, CmdbResult};
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::time::Duration;
use tracing::debug;

/// Minimal async HTTP capability
///
/// Implementors provide [`HttpTransport::request`]; the verb helpers delegate
/// to it. Implementations must be safe to share between tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<Bytes>,
    ) -> CmdbResult<Bytes>;

    async fn get(&self, url: &str, headers: &HeaderMap, body: Option<Bytes>) -> CmdbResult<Bytes> {
        self.request(Method::GET, url, headers, body).await
    }

    async fn post(&self, url: &str, headers: &HeaderMap, body: Option<Bytes>) -> CmdbResult<Bytes> {
        self.request(Method::POST, url, headers, body).await
    }

    async fn put(&self, url: &str, headers: &HeaderMap, body: Option<Bytes>) -> CmdbResult<Bytes> {
        self.request(Method::PUT, url, headers, body).await
    }

    async fn delete(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: Option<Bytes>,
    ) -> CmdbResult<Bytes> {
        self.request(Method::DELETE, url, headers, body).await
    }
}

/// [`HttpTransport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> CmdbResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CmdbError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<Bytes>,
    ) -> CmdbResult<Bytes> {
        debug!(%method, url, "Sending request");

        let mut request = self.client.request(method, url).headers(headers.clone());
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(%status, len = bytes.len(), "Received response");
        Ok(bytes)
    }
}
