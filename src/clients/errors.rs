//! Transport-level error types for the ChannelApe client.
//!
//! This module contains the errors raised when no HTTP response could be
//! obtained at all, and the validation errors raised while building a request.
//!
//! # Error Handling
//!
//! - [`TransportError`]: the request never produced an HTTP response
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//!
//! A delivered response is never a [`TransportError`], whatever its status
//! code. Status interpretation happens in [`crate::rest`].
//!
//! # Example
//!
//! ```rust
//! use channelape::clients::TransportError;
//!
//! let error = TransportError::InvalidUri {
//!     uri: "this-is-not-a-real-base-url/v1/orders".to_string(),
//! };
//! assert_eq!(
//!     error.to_string(),
//!     "Invalid URI \"this-is-not-a-real-base-url/v1/orders\""
//! );
//! ```

use thiserror::Error;

/// Error returned when a request could not be delivered.
///
/// Every variant means the server never answered: the URI could not be
/// parsed, the connection failed, or the attempt timed out. These are the
/// only failures the [`RequestClient`](super::RequestClient) retries.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request URI could not be parsed.
    #[error("Invalid URI \"{uri}\"")]
    InvalidUri {
        /// The URI that was rejected.
        uri: String,
    },

    /// The underlying HTTP stack failed (connection refused, DNS, timeout).
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// A connection failure reported by a non-reqwest transport.
    #[error("{0}")]
    Connection(String),
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use channelape::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "PUT".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use PUT without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}
