//! Structured error type for ChannelApe API operations.
//!
//! Every failed operation surfaces a single [`ChannelApeError`], whatever went
//! wrong:
//!
//! - [`ChannelApeError::Transport`]: no HTTP response was ever obtained
//! - [`ChannelApeError::HttpStatus`]: a response arrived with an unexpected status
//! - [`ChannelApeError::MalformedResponse`]: a response arrived but its body
//!   could not be turned into the requested resource
//! - [`ChannelApeError::InvalidRequest`]: the request could not be built, so
//!   nothing was sent
//!
//! All variants expose the same accessors ([`status_code`], [`api_errors`],
//! [`diagnostic_message`]) and render the diagnostic message via `Display`:
//!
//! ```text
//! GET /v1/orders/not-a-real-order-id
//!   Status: 404 Not Found
//!   Response Body:
//!   {"statusCode":404,"errors":[{"code":174,"message":"Order could not be found."}]}
//! Code: 174 Message: Order could not be found.
//! ```
//!
//! [`status_code`]: ChannelApeError::status_code
//! [`api_errors`]: ChannelApeError::api_errors
//! [`diagnostic_message`]: ChannelApeError::diagnostic_message

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::{HttpMethod, HttpRequest, HttpResponse, TransportError};

/// Status code reported for failures where no response was received.
pub const TRANSPORT_STATUS_CODE: i32 = -1;

/// A single error entry reported by the API.
///
/// # Example
///
/// ```rust
/// use channelape::rest::ApiError;
///
/// let error: ApiError = serde_json::from_str(
///     r#"{"code": 174, "message": "Order could not be found."}"#,
/// ).unwrap();
/// assert_eq!(error.code, 174);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// The API-specific error code.
    pub code: i32,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

/// The error envelope returned by the API for failed calls.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

/// Error type for ChannelApe API operations.
///
/// Constructed once per failed call, with every field populated.
#[derive(Debug, Error)]
pub enum ChannelApeError {
    /// No HTTP response was obtained before the retry budget ran out.
    #[error("{diagnostic}")]
    Transport {
        /// The request URI.
        uri: String,
        /// A single synthetic entry with code `-1` carrying the transport message.
        api_errors: Vec<ApiError>,
        /// The formatted diagnostic message.
        diagnostic: String,
        /// The last transport failure.
        #[source]
        source: TransportError,
    },

    /// The server answered with a status other than the one the operation expects.
    #[error("{diagnostic}")]
    HttpStatus {
        /// The request method.
        method: HttpMethod,
        /// The request URI.
        uri: String,
        /// The delivered status code.
        status_code: u16,
        /// The canonical reason phrase of `status_code`.
        status_text: String,
        /// Entries of the body's `errors` array, in order.
        api_errors: Vec<ApiError>,
        /// The formatted diagnostic message.
        diagnostic: String,
    },

    /// The server answered with the expected status but an unusable body.
    #[error("{diagnostic}")]
    MalformedResponse {
        /// The request method.
        method: HttpMethod,
        /// The request URI.
        uri: String,
        /// The delivered status code.
        status_code: u16,
        /// Why the body was rejected.
        reason: String,
        /// The formatted diagnostic message.
        diagnostic: String,
    },

    /// The request could not be built and was never sent.
    #[error("{diagnostic}")]
    InvalidRequest {
        /// The request method.
        method: HttpMethod,
        /// The request path.
        uri: String,
        /// Why the request was rejected.
        reason: String,
        /// The formatted diagnostic message.
        diagnostic: String,
    },
}

impl ChannelApeError {
    /// Creates the error for a request whose retry budget ran out.
    #[must_use]
    pub fn from_transport_error(request: &HttpRequest, source: TransportError) -> Self {
        let uri = request.path_and_query();
        let message = source.to_string();
        let api_errors = vec![ApiError {
            code: TRANSPORT_STATUS_CODE,
            message: message.clone(),
        }];
        let diagnostic = format_diagnostic("", &uri, 0, "", &message, &api_errors);

        Self::Transport {
            uri,
            api_errors,
            diagnostic,
            source,
        }
    }

    /// Maps a response with an unexpected status into a structured error.
    ///
    /// `api_errors` is taken from the body's `errors` array when the body is
    /// a valid error envelope, and is empty otherwise.
    #[must_use]
    pub fn from_http_response(request: &HttpRequest, response: &HttpResponse) -> Self {
        let uri = request.path_and_query();
        let api_errors = response
            .json()
            .ok()
            .and_then(|body| serde_json::from_value::<ErrorEnvelope>(body).ok())
            .unwrap_or_default()
            .errors;
        let diagnostic = format_diagnostic(
            request.http_method.as_str(),
            &uri,
            response.code,
            &response.status_text,
            &response.body,
            &api_errors,
        );

        Self::HttpStatus {
            method: request.http_method,
            uri,
            status_code: response.code,
            status_text: response.status_text.clone(),
            api_errors,
            diagnostic,
        }
    }

    /// Creates the error for a response whose body cannot be used.
    #[must_use]
    pub fn malformed(
        request: &HttpRequest,
        response: &HttpResponse,
        reason: impl Into<String>,
    ) -> Self {
        let uri = request.path_and_query();
        let reason = reason.into();
        let diagnostic = format_diagnostic(
            request.http_method.as_str(),
            &uri,
            response.code,
            &response.status_text,
            &format!("Malformed response: {reason}"),
            &[],
        );

        Self::MalformedResponse {
            method: request.http_method,
            uri,
            status_code: response.code,
            reason,
            diagnostic,
        }
    }

    /// Creates the error for a request that could not be built.
    #[must_use]
    pub fn invalid_request(
        method: HttpMethod,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let uri = path.into();
        let reason = reason.into();
        let diagnostic = format_diagnostic(
            method.as_str(),
            &uri,
            0,
            "",
            &format!("Invalid request: {reason}"),
            &[],
        );

        Self::InvalidRequest {
            method,
            uri,
            reason,
            diagnostic,
        }
    }

    /// Returns the HTTP status code, or `-1` if no response was received.
    #[must_use]
    pub fn status_code(&self) -> i32 {
        match self {
            Self::Transport { .. } | Self::InvalidRequest { .. } => TRANSPORT_STATUS_CODE,
            Self::HttpStatus { status_code, .. } | Self::MalformedResponse { status_code, .. } => {
                i32::from(*status_code)
            }
        }
    }

    /// Returns the API errors reported for this failure, in order.
    #[must_use]
    pub fn api_errors(&self) -> &[ApiError] {
        match self {
            Self::Transport { api_errors, .. } | Self::HttpStatus { api_errors, .. } => api_errors,
            Self::MalformedResponse { .. } | Self::InvalidRequest { .. } => &[],
        }
    }

    /// Returns the formatted diagnostic message.
    #[must_use]
    pub fn diagnostic_message(&self) -> &str {
        match self {
            Self::Transport { diagnostic, .. }
            | Self::HttpStatus { diagnostic, .. }
            | Self::MalformedResponse { diagnostic, .. }
            | Self::InvalidRequest { diagnostic, .. } => diagnostic,
        }
    }

    /// Returns the URI of the failed request.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Transport { uri, .. }
            | Self::HttpStatus { uri, .. }
            | Self::MalformedResponse { uri, .. }
            | Self::InvalidRequest { uri, .. } => uri,
        }
    }

    /// Returns `true` if no HTTP response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

// Verify ChannelApeError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChannelApeError>();
};

fn format_diagnostic(
    method: &str,
    uri: &str,
    status_code: u16,
    status_text: &str,
    body: &str,
    api_errors: &[ApiError],
) -> String {
    let mut message = format!(
        "{method} {uri}\n  Status: {status_code} {status_text}\n  Response Body:\n  {body}"
    );
    for api_error in api_errors {
        message.push_str(&format!(
            "\nCode: {} Message: {}",
            api_error.code, api_error.message
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn get(path: &str) -> HttpRequest {
        HttpRequest::builder(HttpMethod::Get, path).build().unwrap()
    }

    #[test]
    fn test_http_status_error_collects_api_errors() {
        let body = r#"{"statusCode":404,"errors":[{"code":174,"message":"Order could not be found."}]}"#;
        let response = HttpResponse::new(404, HashMap::new(), body);
        let error = ChannelApeError::from_http_response(&get("/v1/orders/nope"), &response);

        assert_eq!(error.status_code(), 404);
        assert_eq!(error.api_errors().len(), 1);
        assert_eq!(error.api_errors()[0].code, 174);
        assert_eq!(error.api_errors()[0].message, "Order could not be found.");
    }

    #[test]
    fn test_diagnostic_message_format() {
        let body = r#"{"errors":[{"code":174,"message":"Order could not be found."},{"code":11,"message":"Other."}]}"#;
        let response = HttpResponse::new(404, HashMap::new(), body);
        let error = ChannelApeError::from_http_response(&get("/v1/orders/nope"), &response);

        let expected = format!(
            "GET /v1/orders/nope\n  Status: 404 Not Found\n  Response Body:\n  {body}\nCode: 174 Message: Order could not be found.\nCode: 11 Message: Other."
        );
        assert_eq!(error.diagnostic_message(), expected);
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_non_envelope_body_has_no_api_errors() {
        let response = HttpResponse::new(502, HashMap::new(), "<html>Bad Gateway</html>");
        let error = ChannelApeError::from_http_response(&get("/v1/channels/c"), &response);

        assert_eq!(error.status_code(), 502);
        assert!(error.api_errors().is_empty());
        assert!(error.diagnostic_message().ends_with("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_transport_error_uses_synthetic_api_error() {
        let source = TransportError::Connection("connect ECONNREFUSED 127.0.0.1:1".to_string());
        let error = ChannelApeError::from_transport_error(&get("/v1/actions/a"), source);

        assert!(error.is_transport());
        assert_eq!(error.status_code(), -1);
        assert_eq!(
            error.api_errors(),
            &[ApiError {
                code: -1,
                message: "connect ECONNREFUSED 127.0.0.1:1".to_string(),
            }]
        );
        assert_eq!(
            error.diagnostic_message(),
            " /v1/actions/a\n  Status: 0 \n  Response Body:\n  connect ECONNREFUSED 127.0.0.1:1\nCode: -1 Message: connect ECONNREFUSED 127.0.0.1:1"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_malformed_error_keeps_delivered_status() {
        let response = HttpResponse::new(200, HashMap::new(), r#"{"orders":[]}"#);
        let error = ChannelApeError::malformed(
            &get("/v1/orders"),
            &response,
            "missing 'pagination' block",
        );

        assert_eq!(error.status_code(), 200);
        assert!(error.api_errors().is_empty());
        assert!(error
            .diagnostic_message()
            .contains("Malformed response: missing 'pagination' block"));
        assert_eq!(error.uri(), "/v1/orders");
    }

    #[test]
    fn test_invalid_request_was_never_sent() {
        let error = ChannelApeError::invalid_request(
            HttpMethod::Put,
            "/v1/orders/abc",
            "Cannot use PUT without specifying data.",
        );

        assert_eq!(error.status_code(), -1);
        assert!(!error.is_transport());
        assert!(error.api_errors().is_empty());
        assert_eq!(
            error.diagnostic_message(),
            "PUT /v1/orders/abc\n  Status: 0 \n  Response Body:\n  Invalid request: Cannot use PUT without specifying data."
        );
    }
}
