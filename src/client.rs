//! The ChannelApe API client.
//!
//! [`ChannelApeClient`] owns the retrying request pipeline and hands out
//! per-resource services that borrow it.

use std::time::Duration;

use crate::clients::{ReqwestTransport, RequestClient, RetryPolicy, Transport};
use crate::config::{ClientConfiguration, SessionId};
use crate::error::ConfigError;
use crate::resources::{ActionsService, ChannelsService, OrdersService, SessionsService};

/// Client for the ChannelApe API.
///
/// Created from a [`ClientConfiguration`] that carries a session ID. Each
/// call to [`orders`](Self::orders), [`channels`](Self::channels),
/// [`actions`](Self::actions) or [`sessions`](Self::sessions) returns a
/// lightweight service bound to this client.
///
/// # Thread Safety
///
/// `ChannelApeClient` is `Send + Sync`. Concurrent calls share the transport
/// and retry policy but no per-call state.
///
/// # Example
///
/// ```rust,ignore
/// use channelape::{ChannelApeClient, ClientConfiguration, SessionId};
///
/// let config = ClientConfiguration::builder()
///     .session_id(SessionId::new("b9a1c5f2-7e3d-4a6b-8c9d-0e1f2a3b4c5d")?)
///     .build();
/// let client = ChannelApeClient::new(config)?;
///
/// let channel = client.channels().get("9c728601-0286-457d-b0d6-ec19292d4485").await?;
/// let session = client.sessions().get().await?;
/// ```
#[derive(Debug)]
pub struct ChannelApeClient<T = ReqwestTransport> {
    config: ClientConfiguration,
    session_id: SessionId,
    request_client: RequestClient<T>,
}

// Verify ChannelApeClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChannelApeClient>();
};

impl ChannelApeClient<ReqwestTransport> {
    /// Creates a client that talks to the configured endpoint over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionIdRequired`] if the configuration has
    /// no session ID, or [`ConfigError::HttpClient`] if the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfiguration) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> ChannelApeClient<T> {
    /// Creates a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionIdRequired`] if the configuration has
    /// no session ID.
    pub fn with_transport(config: ClientConfiguration, transport: T) -> Result<Self, ConfigError> {
        let session_id = config
            .session_id()
            .cloned()
            .ok_or(ConfigError::SessionIdRequired)?;
        let request_client = RequestClient::new(transport, RetryPolicy::from_config(&config));

        tracing::debug!(
            endpoint = %config.endpoint(),
            timeout = ?config.timeout(),
            "Created ChannelApe client"
        );

        Ok(Self {
            config,
            session_id,
            request_client,
        })
    }

    /// Returns the session ID sent with every request.
    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the retry budget.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    /// Returns the underlying retrying request client.
    #[must_use]
    pub const fn request_client(&self) -> &RequestClient<T> {
        &self.request_client
    }

    /// Order operations.
    #[must_use]
    pub const fn orders(&self) -> OrdersService<'_, T> {
        OrdersService::new(&self.request_client)
    }

    /// Channel operations.
    #[must_use]
    pub const fn channels(&self) -> ChannelsService<'_, T> {
        ChannelsService::new(&self.request_client)
    }

    /// Action operations.
    #[must_use]
    pub const fn actions(&self) -> ActionsService<'_, T> {
        ActionsService::new(&self.request_client)
    }

    /// Session operations.
    #[must_use]
    pub const fn sessions(&self) -> SessionsService<'_, T> {
        SessionsService::new(&self.request_client, &self.session_id)
    }
}
