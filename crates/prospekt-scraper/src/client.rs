//! HTTP access for catalog pages.
//!
//! [`PageFetcher`] is the seam between the orchestrator and the network: the
//! production implementation is [`HttpFetcher`] over a shared `reqwest`
//! connection pool, and tests substitute instrumented fakes.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Performs a single GET for a page body. Implementations make exactly one
/// attempt per call; retries and deadlines belong to the caller.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ScraperError>> + Send;
}

impl<T: PageFetcher> PageFetcher for &T {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ScraperError>> + Send {
        (**self).fetch(url)
    }
}

/// `reqwest`-backed [`PageFetcher`] sharing one connection pool across all
/// concurrent fetches.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates an `HttpFetcher` with the given request timeout, connect
    /// timeout, and `User-Agent`.
    ///
    /// A zero `timeout` leaves the client without an overall request deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout: Duration,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent);
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ScraperError> {
        tracing::debug!(url, "requesting page");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "de-DE,de;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    ScraperError::InvalidUrl {
                        url: url.to_owned(),
                        reason: e.to_string(),
                    }
                } else {
                    ScraperError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

/// One [`PageFetcher::fetch`] bounded by `timeout`. A zero `timeout` means
/// no deadline.
///
/// # Errors
///
/// Returns [`ScraperError::Timeout`] when the deadline elapses, otherwise
/// whatever the fetcher returned.
pub async fn fetch_with_deadline<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, ScraperError> {
    if timeout.is_zero() {
        return fetcher.fetch(url).await;
    }
    tokio::time::timeout(timeout, fetcher.fetch(url))
        .await
        .map_err(|_| ScraperError::Timeout {
            url: url.to_owned(),
            timeout_ms: timeout.as_millis(),
        })?
}
