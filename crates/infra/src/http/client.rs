//! Retrying HTTP client used for outbound webhooks
//!
//! Server errors and connection failures are retried with exponential
//! backoff; client errors are returned as-is.

use std::time::Duration;

use covera_domain::{CoveraError, Result};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with retry and timeout support
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Borrow the underlying reqwest client to build requests.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Send `builder`, retrying transient failures.
    ///
    /// The request body must be cloneable (JSON bodies are).
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let mut attempt = 1;
        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| CoveraError::Internal("request body cannot be retried".into()))?
                .build()
                .map_err(|err| CoveraError::from(InfraError::from(err)))?;
            let url = request.url().clone();
            let last_attempt = attempt >= self.max_attempts;

            match self.client.execute(request).await {
                Ok(response) if response.status().is_server_error() && !last_attempt => {
                    debug!(attempt, %url, status = %response.status(), "server error, retrying");
                }
                Ok(response) => return Ok(response),
                Err(err) if is_transient(&err) && !last_attempt => {
                    debug!(attempt, %url, error = %err, "request failed, retrying");
                }
                Err(err) => return Err(InfraError::from(err).into()),
            }

            tokio::time::sleep(self.backoff(attempt)).await;
            attempt += 1;
        }
    }

    fn backoff(&self, attempt: usize) -> Duration {
        let shift = u32::try_from(attempt.saturating_sub(1).min(6)).unwrap_or(6);
        self.base_backoff.saturating_mul(1 << shift)
    }
}

/// Builder for [`HttpClient`]
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: concat!("covera/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts, including the first.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(|err| CoveraError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
