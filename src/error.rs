//! Configuration error types for the ChannelApe client.
//!
//! Request-time failures live in [`crate::rest::ChannelApeError`]; this module
//! only covers problems detected while building a client.
//!
//! # Example
//!
//! ```rust
//! use channelape::{ConfigError, SessionId};
//!
//! let result = SessionId::new("");
//! assert!(matches!(result, Err(ConfigError::SessionIdRequired)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a [`crate::ChannelApeClient`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No session ID was supplied, or it was empty.
    #[error("Invalid configuration. sessionId is required.")]
    SessionIdRequired,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.channelape.com').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Environment name is not recognized.
    #[error("Unknown environment '{name}'. Expected 'production', 'staging' or an absolute URL.")]
    UnknownEnvironment {
        /// The unrecognized name.
        name: String,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// Why construction failed.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_required_message() {
        assert_eq!(
            ConfigError::SessionIdRequired.to_string(),
            "Invalid configuration. sessionId is required."
        );
    }

    #[test]
    fn test_invalid_endpoint_message_includes_url() {
        let error = ConfigError::InvalidEndpoint {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_unknown_environment_message() {
        let error = ConfigError::UnknownEnvironment {
            name: "qa".to_string(),
        };
        assert!(error.to_string().contains("'qa'"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::SessionIdRequired;
        let _: &dyn std::error::Error = &error;
    }
}
