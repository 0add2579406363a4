//! Fixed-delay retry loop for per-target page fetches.
//!
//! Every transient failure (network error, timeout, non-2xx status) is
//! retried after the configured delay until the attempt budget is spent.
//! Failures that cannot change between attempts are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Final outcome of [`retry_with_delay`] together with the number of
/// attempts it took.
#[derive(Debug)]
pub(crate) struct Attempted<T> {
    pub result: Result<T, ScraperError>,
    pub attempts: u32,
}

/// Returns `true` if `err` may resolve itself on a later attempt.
///
/// Not retriable:
/// - [`ScraperError::InvalidUrl`]: the request can never be built.
/// - [`ScraperError::MissingElement`]: a markup problem, not a transport one.
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. } | ScraperError::Timeout { .. }
    )
}

/// Executes `operation` up to `max_attempts` times, sleeping `delay` between
/// consecutive attempts.
///
/// On success the value is returned immediately. Each failed attempt is
/// logged at `warn` with `label` (usually the URL). No sleep follows the last
/// attempt. The sleep suspends only the calling task.
///
/// `max_attempts` of `0` is treated as `1`.
pub(crate) async fn retry_with_delay<T, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    label: &str,
    mut operation: F,
) -> Attempted<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let err = match operation().await {
            Ok(value) => {
                return Attempted {
                    result: Ok(value),
                    attempts: attempt,
                }
            }
            Err(err) => err,
        };

        tracing::warn!(
            url = label,
            attempt,
            max_attempts,
            error = %err,
            "fetch attempt failed"
        );

        if !is_retriable(&err) || attempt >= max_attempts {
            return Attempted {
                result: Err(err),
                attempts: attempt,
            };
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
