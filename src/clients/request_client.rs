//! Retrying request client bounded by a wall-clock budget.
//!
//! [`RequestClient`] wraps a [`Transport`] and re-sends the identical request
//! while the transport fails to deliver a response and the retry budget has
//! not elapsed.
//!
//! # Retry Behavior
//!
//! - **Transport failure**: retried after `min(delay, budget - elapsed)` while
//!   `elapsed < budget`; once the budget is spent the last error is returned
//! - **Delivered response**: returned immediately, whatever its status code
//!
//! Elapsed time is measured with [`tokio::time::Instant`], so tests running on
//! a paused runtime exhaust the budget without waiting on the wall clock.

use std::time::Duration;

use tokio::time::Instant;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::{ClientConfiguration, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT};

/// How long and how often a request is retried.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use channelape::clients::RetryPolicy;
///
/// let policy = RetryPolicy::new(Duration::from_secs(3), Duration::from_millis(500));
/// assert_eq!(policy.budget, Duration::from_secs(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum wall-clock time, measured from the first attempt, after which
    /// no new attempt starts.
    pub budget: Duration,
    /// Pause between two attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with an explicit budget and delay.
    #[must_use]
    pub const fn new(budget: Duration, delay: Duration) -> Self {
        Self { budget, delay }
    }

    /// Creates the policy described by a client configuration.
    #[must_use]
    pub const fn from_config(config: &ClientConfiguration) -> Self {
        Self::new(config.timeout(), config.retry_delay())
    }

    fn next_delay(&self, elapsed: Duration) -> Option<Duration> {
        if elapsed >= self.budget {
            return None;
        }
        Some(self.delay.min(self.budget - elapsed))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_RETRY_DELAY)
    }
}

/// Sends requests through a [`Transport`], retrying transport failures.
///
/// The client holds no per-call state, so one instance can serve any number
/// of concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// use channelape::clients::{HttpMethod, HttpRequest, RequestClient, RetryPolicy};
///
/// let client = RequestClient::new(transport, RetryPolicy::default());
/// let request = HttpRequest::builder(HttpMethod::Get, "/v1/channels/abc").build()?;
/// let response = client.execute(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RequestClient<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> RequestClient<T> {
    /// Creates a new request client.
    #[must_use]
    pub const fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Returns the wrapped transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Sends `request`, retrying transport failures until the budget is spent.
    ///
    /// At least one attempt is always made.
    ///
    /// # Errors
    ///
    /// Returns the last [`TransportError`] once the retry budget is exhausted.
    /// Responses with error statuses are returned as `Ok`.
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            tracing::debug!(
                attempt,
                method = %request.http_method,
                uri = %request.path_and_query(),
                "sending request"
            );

            let error = match self.transport.send(request).await {
                Ok(response) => {
                    tracing::debug!(attempt, status = response.code, "received response");
                    return Ok(response);
                }
                Err(error) => error,
            };

            let elapsed = started.elapsed();
            let Some(wait) = self.policy.next_delay(elapsed) else {
                tracing::warn!(
                    "Giving up on {} {} after {} attempts in {}ms: {}",
                    request.http_method,
                    request.path,
                    attempt,
                    elapsed.as_millis(),
                    error
                );
                return Err(error);
            };

            tracing::warn!(
                "Request {} {} failed on attempt {}, retrying in {}ms: {}",
                request.http_method,
                request.path,
                attempt,
                wait.as_millis(),
                error
            );
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_configuration_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.budget, Duration::from_millis(180_000));
        assert_eq!(policy.delay, Duration::from_secs(1));
    }

    #[test]
    fn test_policy_from_config() {
        let config = ClientConfiguration::builder()
            .timeout(Duration::from_millis(2500))
            .retry_delay(Duration::from_millis(100))
            .build();
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.budget, Duration::from_millis(2500));
        assert_eq!(policy.delay, Duration::from_millis(100));
    }

    #[test]
    fn test_next_delay_is_capped_by_remaining_budget() {
        let policy = RetryPolicy::new(Duration::from_millis(3000), Duration::from_millis(1000));
        assert_eq!(
            policy.next_delay(Duration::ZERO),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(
            policy.next_delay(Duration::from_millis(2500)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(policy.next_delay(Duration::from_millis(3000)), None);
        assert_eq!(policy.next_delay(Duration::from_millis(4000)), None);
    }
}
