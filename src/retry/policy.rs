//! Fixed-delay retry policy

use crate::error::{Error, Result};
use crate::types::PageRequest;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bookkeeping for one `RetryPolicy::attempt` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Attempts started so far
    pub attempts_made: u32,
    /// Attempts allowed in total
    pub max_attempts: u32,
    /// Pause between two attempts
    pub backoff_delay: Duration,
}

impl RetryState {
    /// Fresh state, nothing attempted yet
    pub fn new(max_attempts: u32, backoff_delay: Duration) -> Self {
        Self {
            attempts_made: 0,
            max_attempts,
            backoff_delay,
        }
    }

    /// Attempts still available
    pub fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_made)
    }

    /// True once no attempt is left
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

/// Retry policy with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    /// Create a policy. `max_retries` counts total attempts and is at least 1.
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            retry_delay,
        }
    }

    /// Total attempts allowed per page
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay slept between attempts
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Run `operation` for `request` until it succeeds, fails fatally,
    /// or the attempt budget is spent.
    ///
    /// The delay is only slept between attempts, never after the last one.
    /// Every error leaving this function names the request's endpoint and
    /// page.
    pub async fn attempt<T, F, Fut>(&self, request: &PageRequest, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut state = RetryState::new(self.max_retries, self.retry_delay);

        loop {
            state.attempts_made += 1;

            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => {
                    return Err(err.for_page(request.endpoint(), request.page()));
                }
                Err(err) => err,
            };

            warn!(
                "HTTP error for {} - {}, retries left: {}",
                request.url(),
                err,
                state.remaining()
            );

            if state.is_exhausted() {
                return Err(Error::RequestExhausted {
                    endpoint: request.endpoint().to_string(),
                    page: request.page(),
                    attempts: state.attempts_made,
                    source: Box::new(err),
                });
            }

            tokio::time::sleep(state.backoff_delay).await;
        }
    }
}
