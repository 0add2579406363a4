//! Validated settings for one fetch orchestrator instance.

use std::time::Duration;

use crate::ConfigError;

/// Concurrency, retry, and deadline policy for a batch of page fetches.
///
/// Fields are private so every instance has passed validation; use
/// [`OrchestratorConfig::new`] or [`OrchestratorConfig::from_secs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    max_concurrency: usize,
    max_retries: u32,
    timeout: Duration,
    retry_delay: Duration,
}

impl OrchestratorConfig {
    pub const DEFAULT_MAX_CONCURRENCY: usize = 5;
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;
    pub const DEFAULT_RETRY_DELAY_SECS: f64 = 1.0;

    /// Builds a config from already-typed durations.
    ///
    /// `max_retries` is the total number of attempts per target, not the
    /// number of extra attempts after the first. A zero `timeout` disables
    /// the per-attempt deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `max_concurrency` or
    /// `max_retries` is zero.
    pub fn new(
        max_concurrency: usize,
        max_retries: u32,
        timeout: Duration,
        retry_delay: Duration,
    ) -> Result<Self, ConfigError> {
        if max_concurrency < 1 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency",
                reason: "number of concurrent requests must be greater than 0".to_string(),
            });
        }
        if max_retries < 1 {
            return Err(ConfigError::InvalidValue {
                field: "max_retries",
                reason: "number of retries must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            max_concurrency,
            max_retries,
            timeout,
            retry_delay,
        })
    }

    /// Builds a config from raw, possibly user-supplied numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for non-positive
    /// concurrency/retries and for negative or non-finite seconds.
    pub fn from_secs(
        max_concurrency: i64,
        max_retries: i64,
        timeout_secs: f64,
        retry_delay_secs: f64,
    ) -> Result<Self, ConfigError> {
        let max_concurrency =
            usize::try_from(max_concurrency).map_err(|_| ConfigError::InvalidValue {
                field: "max_concurrency",
                reason: "number of concurrent requests must be greater than 0".to_string(),
            })?;
        let max_retries = u32::try_from(max_retries).map_err(|_| ConfigError::InvalidValue {
            field: "max_retries",
            reason: "number of retries must be greater than 0".to_string(),
        })?;
        let timeout = non_negative_secs("timeout", timeout_secs)?;
        let retry_delay = non_negative_secs("retry_delay", retry_delay_secs)?;
        Self::new(max_concurrency, max_retries, timeout, retry_delay)
    }

    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: Self::DEFAULT_MAX_CONCURRENCY,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            timeout: Duration::from_secs_f64(Self::DEFAULT_TIMEOUT_SECS),
            retry_delay: Duration::from_secs_f64(Self::DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

fn non_negative_secs(field: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{secs} is not a finite number of seconds"),
        });
    }
    if secs < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be a non-negative number".to_string(),
        });
    }
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}
