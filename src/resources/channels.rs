//! Channels: a business's connection to one integration.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpMethod, HttpRequest, RequestClient, Transport};
use crate::resources::common::{collection_path, member_path};
use crate::rest::{coerce_dates, fetch_one, ChannelApeError, ExpectedStatus, Normalize, NormalizeError};

const RESOURCE: &str = "channels";

/// Which operations a channel allows and how it maps fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelSettings {
    /// Whether the channel may create records.
    pub allow_create: bool,
    /// Whether the channel may read records.
    pub allow_read: bool,
    /// Whether the channel may update records.
    pub allow_update: bool,
    /// Whether the channel may delete records.
    pub allow_delete: bool,
    /// Whether product variants are ignored.
    pub disable_variants: bool,
    /// Which price is synchronized (e.g., "retail").
    pub price_type: String,
    /// Fields the channel keeps in sync.
    pub update_fields: Vec<String>,
}

/// A ChannelApe channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Channel ID.
    pub id: String,
    /// Owning business.
    pub business_id: String,
    /// The integration this channel connects to.
    pub integration_id: String,
    /// Display name.
    pub name: String,
    /// Whether the channel is active.
    pub enabled: bool,
    /// Channel settings.
    #[serde(default)]
    pub settings: ChannelSettings,
    /// When the channel was created.
    pub created_at: DateTime<Utc>,
    /// When the channel was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Normalize for Channel {
    fn coerce(object: &mut Map<String, Value>) -> Result<(), NormalizeError> {
        coerce_dates(object, &["createdAt", "updatedAt"])
    }
}

/// Body of a channel creation request.
///
/// # Example
///
/// ```rust
/// use channelape::resources::{ChannelSettings, CreateChannelRequest};
///
/// let request = CreateChannelRequest {
///     business_id: "4baafa5b-4fbf-404e-9766-8a02ad45c3a4".to_string(),
///     integration_id: "02df0b31-a071-4791-b9c2-aa01e4fb0ce6".to_string(),
///     name: "Custom Column Export".to_string(),
///     enabled: true,
///     credentials: Default::default(),
///     settings: ChannelSettings::default(),
/// };
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["integrationId"], "02df0b31-a071-4791-b9c2-aa01e4fb0ce6");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    /// Owning business.
    pub business_id: String,
    /// The integration to connect.
    pub integration_id: String,
    /// Display name.
    pub name: String,
    /// Whether the channel starts active.
    pub enabled: bool,
    /// Integration credentials.
    pub credentials: BTreeMap<String, String>,
    /// Channel settings.
    pub settings: ChannelSettings,
}

/// Reads and creates channels.
#[derive(Debug)]
pub struct ChannelsService<'a, T> {
    client: &'a RequestClient<T>,
}

impl<'a, T: Transport> ChannelsService<'a, T> {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: &'a RequestClient<T>) -> Self {
        Self { client }
    }

    /// Fetches one channel (`GET /v1/channels/{id}`, expects 200).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the request fails, the status is not
    /// 200, or the body is not a channel.
    pub async fn get(&self, channel_id: &str) -> Result<Channel, ChannelApeError> {
        let request = HttpRequest {
            http_method: HttpMethod::Get,
            path: member_path(RESOURCE, channel_id),
            query: Vec::new(),
            body: None,
        };
        fetch_one(self.client, &request, ExpectedStatus::Ok).await
    }

    /// Creates a channel (`POST /v1/channels`, expects 201).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the request fails, the status is not
    /// 201, or the body is not a channel.
    pub async fn create(
        &self,
        create_request: &CreateChannelRequest,
    ) -> Result<Channel, ChannelApeError> {
        let path = collection_path(RESOURCE);
        let body = serde_json::to_value(create_request).map_err(|e| {
            ChannelApeError::invalid_request(
                HttpMethod::Post,
                path.clone(),
                format!("Failed to serialize channel: {e}"),
            )
        })?;
        let request = HttpRequest::builder(HttpMethod::Post, path.clone())
            .body(body)
            .build()
            .map_err(|e| ChannelApeError::invalid_request(HttpMethod::Post, path, e.to_string()))?;

        fetch_one(self.client, &request, ExpectedStatus::Created).await
    }
}
