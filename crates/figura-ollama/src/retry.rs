use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{OllamaError, Result};

/// Pause between attempts used when nothing else is configured
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Attempt budget used when nothing else is configured
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Source of the pause between attempts
///
/// Swappable so tests can observe the backoff without waiting for it.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded retry with a fixed pause between attempts
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_DELAY)
    }
}

impl RetryPolicy {
    /// Create a policy; an attempt budget of zero is raised to one
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeper
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `operation` until it succeeds, fails permanently, or the budget runs out
    ///
    /// `n` attempts are separated by `n - 1` pauses; there is no pause after
    /// the final failure. `endpoint` is recorded in the terminal error.
    pub async fn run<F, Fut, T>(&self, endpoint: &str, max_attempts: Option<u32>, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = max_attempts.unwrap_or(self.max_attempts).max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= max_attempts => {
                    tracing::error!(%endpoint, attempts = attempt, error = %e, "model call failed, giving up");
                    return Err(OllamaError::RetriesExhausted {
                        endpoint: endpoint.to_owned(),
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        %endpoint,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "model call failed, retrying"
                    );
                    self.sleeper.sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
