//! Configuration types for the ChannelApe client.
//!
//! # Overview
//!
//! - [`ClientConfiguration`]: all settings a client needs
//! - [`ClientConfigurationBuilder`]: fluent builder for [`ClientConfiguration`]
//! - [`SessionId`], [`Password`], [`Endpoint`]: validated newtypes
//! - [`Environment`]: which ChannelApe deployment to talk to
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use channelape::{ClientConfiguration, Environment, SessionId};
//!
//! let config = ClientConfiguration::builder()
//!     .session_id(SessionId::new("c478c897-dc1c-4171-a207-9e3af9b23579").unwrap())
//!     .environment(Environment::Staging)
//!     .timeout(Duration::from_millis(2000))
//!     .build();
//!
//! assert!(config.has_session());
//! assert_eq!(config.timeout(), Duration::from_millis(2000));
//! ```

mod environment;
mod newtypes;

pub use environment::{Environment, PRODUCTION_URL, STAGING_URL};
pub use newtypes::{Endpoint, Password, SessionId};

use std::time::Duration;

/// Retry budget used when none (or an invalid one) is configured: 3 minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(180_000);

/// Smallest retry budget accepted by [`ClientConfigurationBuilder::timeout`].
pub const MINIMUM_TIMEOUT: Duration = Duration::from_millis(2000);

/// Default timeout for a single HTTP attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default pause between two attempts of the same request.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Configuration for a [`crate::ChannelApeClient`].
///
/// `ClientConfiguration` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfiguration {
    session_id: Option<SessionId>,
    email: Option<String>,
    password: Option<Password>,
    environment: Environment,
    timeout: Duration,
    request_timeout: Duration,
    retry_delay: Duration,
}

impl ClientConfiguration {
    /// Creates a new builder for constructing a `ClientConfiguration`.
    #[must_use]
    pub fn builder() -> ClientConfigurationBuilder {
        ClientConfigurationBuilder::new()
    }

    /// Returns the session ID, if configured.
    #[must_use]
    pub const fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Returns the account email, if configured.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the account password, if configured.
    #[must_use]
    pub const fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    /// Returns the environment requests are sent to.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Returns the base URL of the configured environment.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.environment.base_url()
    }

    /// Returns the retry budget: how long a single logical request may keep
    /// retrying transport failures.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the timeout applied to each individual HTTP attempt.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the pause between two attempts of the same request.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns `true` if a session ID is configured.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.session_id.is_some()
    }

    /// Returns `true` if both an email and a non-empty password are configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.email.as_deref().is_some_and(|email| !email.is_empty())
            && self.password.as_ref().is_some_and(|p| !p.is_empty())
    }
}

// Verify ClientConfiguration is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfiguration>();
};

/// Builder for [`ClientConfiguration`].
///
/// # Defaults
///
/// - `environment`: [`Environment::Production`]
/// - `timeout`: [`DEFAULT_TIMEOUT`] (also used when the value is below [`MINIMUM_TIMEOUT`])
/// - `request_timeout`: [`DEFAULT_REQUEST_TIMEOUT`]
/// - `retry_delay`: [`DEFAULT_RETRY_DELAY`]
#[derive(Debug, Default)]
pub struct ClientConfigurationBuilder {
    session_id: Option<SessionId>,
    email: Option<String>,
    password: Option<Password>,
    environment: Option<Environment>,
    timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    retry_delay: Option<Duration>,
}

impl ClientConfigurationBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session ID used to authorize requests.
    #[must_use]
    pub fn session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Sets the account email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the account password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Password::new(password));
        self
    }

    /// Sets the environment.
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets a custom endpoint. Well-known URLs map back to their named environment.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.environment = Some(Environment::from(endpoint));
        self
    }

    /// Sets the retry budget.
    ///
    /// Budgets below [`MINIMUM_TIMEOUT`] are replaced by [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout for each individual HTTP attempt.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the pause between two attempts of the same request.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Builds the [`ClientConfiguration`].
    ///
    /// Building never fails: every value was validated when its newtype was
    /// created, and missing values take their defaults. Whether a session is
    /// present is checked by [`crate::ChannelApeClient::new`].
    #[must_use]
    pub fn build(self) -> ClientConfiguration {
        let timeout = match self.timeout {
            Some(timeout) if timeout >= MINIMUM_TIMEOUT => timeout,
            Some(timeout) => {
                tracing::warn!(
                    "Configured timeout of {}ms is below the minimum of {}ms, using default of {}ms",
                    timeout.as_millis(),
                    MINIMUM_TIMEOUT.as_millis(),
                    DEFAULT_TIMEOUT.as_millis()
                );
                DEFAULT_TIMEOUT
            }
            None => DEFAULT_TIMEOUT,
        };

        ClientConfiguration {
            session_id: self.session_id,
            email: self.email,
            password: self.password,
            environment: self.environment.unwrap_or_default(),
            timeout,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_session_uses_production_by_default() {
        let config = ClientConfiguration::builder()
            .session_id(SessionId::new("200204242").unwrap())
            .build();

        assert_eq!(config.session_id().unwrap().as_ref(), "200204242");
        assert!(config.has_session());
        assert_eq!(config.environment(), &Environment::Production);
        assert_eq!(config.endpoint(), PRODUCTION_URL);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_builder_with_credentials_and_endpoint() {
        let config = ClientConfiguration::builder()
            .email("jim")
            .password("jim2")
            .endpoint(Endpoint::new("https://jim-api.channelape.com").unwrap())
            .build();

        assert_eq!(config.email(), Some("jim"));
        assert_eq!(config.password().unwrap().as_ref(), "jim2");
        assert!(config.has_credentials());
        assert_eq!(config.endpoint(), "https://jim-api.channelape.com");
        assert!(!config.has_session());
    }

    #[test]
    fn test_email_alone_is_not_credentials() {
        let config = ClientConfiguration::builder().email("jim").build();

        assert_eq!(config.email(), Some("jim"));
        assert!(!config.has_credentials());
        assert_eq!(config.endpoint(), PRODUCTION_URL);
        assert!(!config.has_session());
    }

    #[test]
    fn test_timeout_defaults_to_three_minutes() {
        let config = ClientConfiguration::builder().build();
        assert_eq!(config.timeout(), Duration::from_millis(180_000));
    }

    #[test]
    fn test_timeout_at_minimum_is_kept() {
        let config = ClientConfiguration::builder()
            .timeout(Duration::from_millis(2000))
            .build();
        assert_eq!(config.timeout(), Duration::from_millis(2000));
    }

    #[test]
    fn test_timeout_below_minimum_falls_back_to_default() {
        let config = ClientConfiguration::builder()
            .timeout(Duration::from_millis(1999))
            .build();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        let config = ClientConfiguration::builder()
            .timeout(Duration::ZERO)
            .build();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_request_timeout_and_retry_delay() {
        let config = ClientConfiguration::builder().build();
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.retry_delay(), DEFAULT_RETRY_DELAY);

        let config = ClientConfiguration::builder()
            .request_timeout(Duration::from_secs(5))
            .retry_delay(Duration::from_millis(50))
            .build();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.retry_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_debug_masks_password() {
        let config = ClientConfiguration::builder()
            .email("jim")
            .password("super-secret")
            .build();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ClientConfiguration"));
        assert!(!debug_str.contains("super-secret"));
    }
}
