//! Expected-status contract shared by every API operation.
//!
//! Each operation names the single status code it accepts. Any other
//! delivered status is mapped to [`ChannelApeError::HttpStatus`]; a transport
//! failure is mapped to [`ChannelApeError::Transport`].

use serde_json::Value;

use crate::clients::{HttpRequest, HttpResponse, RequestClient, Transport};
use crate::rest::errors::ChannelApeError;
use crate::rest::normalize::Normalize;

/// The status code an operation expects on success.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpectedStatus {
    /// `200 OK`, used by reads.
    Ok,
    /// `201 Created`, used by creates.
    Created,
    /// `202 Accepted`, used by updates.
    Accepted,
}

impl ExpectedStatus {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::Accepted => 202,
        }
    }

    /// Returns `true` if `code` is the expected status.
    #[must_use]
    pub const fn matches(self, code: u16) -> bool {
        self.code() == code
    }
}

/// Sends `request` and checks the delivered status.
///
/// # Errors
///
/// Returns [`ChannelApeError::Transport`] if the retry budget ran out, or
/// [`ChannelApeError::HttpStatus`] if the status is not `expected`.
pub async fn send_expecting<T: Transport>(
    client: &RequestClient<T>,
    request: &HttpRequest,
    expected: ExpectedStatus,
) -> Result<HttpResponse, ChannelApeError> {
    let response = client
        .execute(request)
        .await
        .map_err(|e| ChannelApeError::from_transport_error(request, e))?;

    if !expected.matches(response.code) {
        return Err(ChannelApeError::from_http_response(request, &response));
    }
    Ok(response)
}

/// Parses a delivered response body as JSON.
///
/// # Errors
///
/// Returns [`ChannelApeError::MalformedResponse`] if the body is not JSON.
pub fn response_json(
    request: &HttpRequest,
    response: &HttpResponse,
) -> Result<Value, ChannelApeError> {
    response
        .json()
        .map_err(|e| ChannelApeError::malformed(request, response, format!("invalid JSON: {e}")))
}

/// Sends `request`, checks the status, and normalizes the body into `R`.
///
/// # Errors
///
/// Returns any error of [`send_expecting`], or
/// [`ChannelApeError::MalformedResponse`] if the body cannot be normalized.
pub async fn fetch_one<T: Transport, R: Normalize>(
    client: &RequestClient<T>,
    request: &HttpRequest,
    expected: ExpectedStatus,
) -> Result<R, ChannelApeError> {
    let response = send_expecting(client, request, expected).await?;
    let body = response_json(request, &response)?;
    R::normalize(body).map_err(|e| ChannelApeError::malformed(request, &response, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_status_codes() {
        assert_eq!(ExpectedStatus::Ok.code(), 200);
        assert_eq!(ExpectedStatus::Created.code(), 201);
        assert_eq!(ExpectedStatus::Accepted.code(), 202);
    }

    #[test]
    fn test_expected_status_matches_only_its_code() {
        assert!(ExpectedStatus::Accepted.matches(202));
        assert!(!ExpectedStatus::Accepted.matches(200));
        assert!(!ExpectedStatus::Ok.matches(201));
    }
}
