//! Click with nested retry.
//!
//! A click is a wait-for-displayed followed by a click. When that fails, one
//! recovery pass runs immediately: the wait is retried under the policy and
//! the click is attempted once more. The whole sequence is itself wrapped in
//! [`retry`], so with a policy of `n` attempts a click can be issued up to
//! `2n` times.

use std::time::Duration;

use tracing::warn;

use crate::driver::{DriverError, ElementHandle};
use crate::error::PageError;
use crate::retry::{retry, RetryPolicy};

/// Waits for `element` and clicks it, retrying per `policy`.
///
/// Fails with [`PageError::Interaction`] carrying the error from the final
/// attempt.
pub async fn click_with_retry(
    element: &dyn ElementHandle,
    target: &str,
    wait_timeout: Duration,
    policy: &RetryPolicy,
) -> Result<(), PageError> {
    retry(policy, move || try_click(element, target, wait_timeout, policy))
        .await
        .map_err(|source| PageError::Interaction {
            target: target.to_string(),
            source,
        })
}

async fn try_click(
    element: &dyn ElementHandle,
    target: &str,
    wait_timeout: Duration,
    policy: &RetryPolicy,
) -> Result<(), DriverError> {
    match wait_then_click(element, wait_timeout).await {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!(target_name = target, error = %e, "click failed, retrying wait then click");
            retry(policy, move || element.wait_for_displayed(wait_timeout)).await?;
            element.click().await
        }
    }
}

async fn wait_then_click(element: &dyn ElementHandle, wait_timeout: Duration) -> Result<(), DriverError> {
    element.wait_for_displayed(wait_timeout).await?;
    element.click().await
}
