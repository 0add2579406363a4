//! Bounded-concurrency fetch orchestration.
//!
//! [`Orchestrator::fetch_all`] fans one [`Orchestrator::fetch_one`] future out
//! per target and joins them in input order. A semaphore caps how many
//! targets are in flight at once; each target keeps its permit across its
//! own retries and retry delays, so a backing-off target never holds up
//! another target's permit acquisition beyond its own slot.
//!
//! Per-target failures never escape: a target that exhausts its attempts
//! becomes an absent [`FetchResult`].

use futures::future::join_all;
use tokio::sync::Semaphore;

use prospekt_core::{FetchResult, FetchTarget, OrchestratorConfig};

use crate::client::{fetch_with_deadline, PageFetcher};
use crate::discovery;
use crate::error::ScraperError;
use crate::retry::retry_with_delay;

/// Fetches batches of pages through a [`PageFetcher`] under one
/// [`OrchestratorConfig`].
pub struct Orchestrator<F> {
    fetcher: F,
    config: OrchestratorConfig,
    gate: Semaphore,
}

impl<F: PageFetcher> Orchestrator<F> {
    #[must_use]
    pub fn new(fetcher: F, config: OrchestratorConfig) -> Self {
        let permits = config.max_concurrency().min(Semaphore::MAX_PERMITS);
        Self {
            fetcher,
            config,
            gate: Semaphore::new(permits),
        }
    }

    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Fetches the shop directory under `base_url` and returns the targets it
    /// lists. See [`discovery::discover`].
    ///
    /// # Errors
    ///
    /// Propagates any discovery failure; these are fatal for a run.
    pub async fn discover(&self, base_url: &str) -> Result<Vec<FetchTarget>, ScraperError> {
        discovery::discover(&self.fetcher, base_url, self.config.timeout()).await
    }

    /// Fetches every target and returns one result per target, where
    /// `results[i].target_index == i` regardless of completion order.
    ///
    /// Returns only after every target has either succeeded or exhausted its
    /// attempts.
    pub async fn fetch_all(&self, targets: &[FetchTarget]) -> Vec<FetchResult> {
        tracing::info!(
            targets = targets.len(),
            max_concurrency = self.config.max_concurrency(),
            max_retries = self.config.max_retries(),
            "starting fetch batch"
        );

        let results = join_all(
            targets
                .iter()
                .enumerate()
                .map(|(index, target)| self.fetch_one(index, target)),
        )
        .await;

        let fetched = results.iter().filter(|r| !r.is_absent()).count();
        tracing::info!(
            targets = targets.len(),
            fetched,
            failed = targets.len() - fetched,
            "fetch batch complete"
        );
        results
    }

    /// Fetches a single target under the concurrency gate, retrying failed
    /// attempts after the configured delay.
    pub async fn fetch_one(&self, index: usize, target: &FetchTarget) -> FetchResult {
        let Ok(_permit) = self.gate.acquire().await else {
            tracing::error!(shop = %target.id, "concurrency gate closed; target not fetched");
            return FetchResult {
                target_index: index,
                content: None,
                attempts: 0,
            };
        };

        let timeout = self.config.timeout();
        let outcome = retry_with_delay(
            self.config.max_retries(),
            self.config.retry_delay(),
            &target.url,
            || fetch_with_deadline(&self.fetcher, &target.url, timeout),
        )
        .await;

        match outcome.result {
            Ok(body) => {
                tracing::debug!(
                    shop = %target.id,
                    url = %target.url,
                    attempts = outcome.attempts,
                    bytes = body.len(),
                    "fetched target"
                );
                FetchResult {
                    target_index: index,
                    content: Some(body),
                    attempts: outcome.attempts,
                }
            }
            Err(err) => {
                tracing::warn!(
                    shop = %target.id,
                    url = %target.url,
                    attempts = outcome.attempts,
                    error = %err,
                    "giving up on target"
                );
                FetchResult {
                    target_index: index,
                    content: None,
                    attempts: outcome.attempts,
                }
            }
        }
    }
}
