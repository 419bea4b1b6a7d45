//! Shared HTTP plumbing for provider adapters.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Deadline-bounded JSON fetcher shared by all HTTP adapters.
///
/// Cloning is cheap; clones share the client and the request limiter.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher with the given per-request deadline and outbound
    /// concurrency limit.
    pub fn new(timeout: Duration, max_concurrent: usize) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Http)?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(
                max_concurrent.clamp(1, Semaphore::MAX_PERMITS),
            )),
            timeout,
        })
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Waiting for a request slot counts toward the deadline.
    pub async fn get_json(&self, url: Url) -> Result<Value, FetchError> {
        match tokio::time::timeout(self.timeout, self.send(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout.as_millis())),
        }
    }

    async fn send(&self, url: Url) -> Result<Value, FetchError> {
        // The semaphore is never closed, so acquiring only waits.
        let _permit = self.permits.acquire().await;

        debug!("Provider request: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body)
            .map_err(|e| FetchError::malformed(format!("invalid JSON body: {}", e)))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_millis())
        } else {
            FetchError::Http(err)
        }
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .field("available_permits", &self.permits.available_permits())
            .finish()
    }
}
