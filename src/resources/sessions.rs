//! Sessions: the identity behind the configured session ID.

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest, RequestClient, Transport};
use crate::config::SessionId;
use crate::resources::common::member_path;
use crate::rest::{fetch_one, ChannelApeError, ExpectedStatus, Normalize};

const RESOURCE: &str = "sessions";

/// A ChannelApe session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The user the session belongs to.
    pub user_id: String,
    /// The session ID.
    pub session_id: String,
}

impl Normalize for Session {}

/// Reads the client's own session.
#[derive(Debug)]
pub struct SessionsService<'a, T> {
    client: &'a RequestClient<T>,
    session_id: &'a SessionId,
}

impl<'a, T: Transport> SessionsService<'a, T> {
    /// Creates a service over `client` for `session_id`.
    #[must_use]
    pub const fn new(client: &'a RequestClient<T>, session_id: &'a SessionId) -> Self {
        Self { client, session_id }
    }

    /// Fetches the configured session (`GET /v1/sessions/{id}`, expects 200).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the request fails, the status is not
    /// 200, or the body is not a session.
    pub async fn get(&self) -> Result<Session, ChannelApeError> {
        let request = HttpRequest {
            http_method: HttpMethod::Get,
            path: member_path(RESOURCE, self.session_id.as_ref()),
            query: Vec::new(),
            body: None,
        };
        fetch_one(self.client, &request, ExpectedStatus::Ok).await
    }
}
