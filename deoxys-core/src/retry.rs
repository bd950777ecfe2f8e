//! Bounded retry policy for adapter-local transient failures.

use crate::error::AiError;
use std::future::Future;
use std::time::Duration;

/// Retry configuration: a fixed number of attempts with a flat delay between
/// them.
///
/// Only errors for which [`AiError::is_retryable`] holds are retried; anything
/// else is returned to the caller after the first attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Flat delay between a fixed number of attempts
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Policy used for model warm-up: two attempts, 1.5s apart
    pub fn warmup() -> Self {
        Self::fixed(2, Duration::from_millis(1500))
    }

    /// Maximum number of attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Execute `operation` under this policy
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, AiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AiError>>,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !e.is_retryable() || attempt >= self.max_attempts {
                        return Err(e);
                    }

                    tracing::debug!(
                        "Retry attempt {}/{} after {}, waiting {:?}",
                        attempt + 1,
                        self.max_attempts,
                        e,
                        self.delay
                    );

                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::warmup()
    }
}
