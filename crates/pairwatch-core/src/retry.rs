//! Fixed-delay retry around an idempotent async operation.
//!
//! The analysis core never retries on its own; the request layer wraps a whole
//! analysis (both fetches included) in [`retry_async`].

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Attempt count and pause for re-running a failed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Pause before every retry.
    pub delay: Duration,
}

impl Default for RetryConfig {
    /// One retry after two seconds.
    fn default() -> Self {
        Self::fixed(DEFAULT_RETRY_DELAY, DEFAULT_MAX_RETRIES)
    }
}

impl RetryConfig {
    pub const fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self { max_retries, delay }
    }

    pub const fn no_retry() -> Self {
        Self::fixed(Duration::ZERO, 0)
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Runs `operation` until it succeeds or the retries are spent.
///
/// Each retry re-invokes `operation` from scratch; the last error is returned
/// unchanged.
pub async fn retry_async<T, E, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < config.max_retries => {
                let delay = config.delay;
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_attempts = config.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(error) => return Err(error),
        }
    }
}
