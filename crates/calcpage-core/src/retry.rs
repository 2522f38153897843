//! Retry with exponential backoff.
//!
//! [`retry`] runs a fallible async action up to [`RetryPolicy::max_attempts`]
//! times, sleeping `base_delay * 2^attempt` between failures. There is no
//! jitter and no delay cap; attempt counts are expected to stay small.
//!
//! # Example
//!
//! ```no_run
//! use calcpage_core::retry::{retry, RetryPolicy};
//!
//! # async fn flaky() -> Result<u32, std::io::Error> { Ok(1) }
//! # async fn run() -> Result<(), std::io::Error> {
//! let value = retry(&RetryPolicy::default(), || flaky()).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of attempts and base delay for [`retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never less than 1.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
        }
    }

    /// Attempts actually made, honouring the lower bound of 1 even for
    /// policies deserialized with `max_attempts: 0`.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to sleep after the failed attempt with 0-based index `attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        Duration::from_millis(self.base_delay_ms).saturating_mul(factor)
    }

    /// Sum of all sleeps when every attempt fails.
    pub fn worst_case_delay(&self) -> Duration {
        (0..self.attempts().saturating_sub(1))
            .map(|attempt| self.delay_for_attempt(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Runs `action` until it succeeds or the policy's attempts are exhausted.
///
/// Returns the first success, or the error from the final attempt. No sleep
/// happens after the final failure.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut action: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts();
    let mut attempt = 0;
    loop {
        match action().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 >= attempts => return Err(e),
            Err(e) => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
