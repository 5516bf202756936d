//! ChannelApe API environments.
//!
//! This module provides the [`Environment`] enum for choosing which
//! ChannelApe deployment a client talks to.

use crate::config::Endpoint;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Base URL of the production API.
pub const PRODUCTION_URL: &str = "https://api.channelape.com";

/// Base URL of the staging API.
pub const STAGING_URL: &str = "https://staging-api.channelape.com";

/// A ChannelApe API deployment.
///
/// # Example
///
/// ```rust
/// use channelape::Environment;
///
/// let environment: Environment = "staging".parse().unwrap();
/// assert_eq!(environment, Environment::Staging);
/// assert_eq!(environment.to_string(), "https://staging-api.channelape.com");
///
/// let custom: Environment = "https://jim-api.channelape.com".parse().unwrap();
/// assert_eq!(custom.base_url(), "https://jim-api.channelape.com");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// `https://api.channelape.com`
    #[default]
    Production,
    /// `https://staging-api.channelape.com`
    Staging,
    /// Any other deployment, e.g. a developer sandbox.
    Custom(Endpoint),
}

impl Environment {
    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Staging => STAGING_URL,
            Self::Custom(endpoint) => endpoint.as_ref(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_url())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "production" => return Ok(Self::Production),
            "staging" => return Ok(Self::Staging),
            _ => {}
        }

        if !trimmed.contains("://") {
            return Err(ConfigError::UnknownEnvironment {
                name: trimmed.to_string(),
            });
        }

        let endpoint = Endpoint::new(trimmed)?;
        Ok(match endpoint.as_ref() {
            PRODUCTION_URL => Self::Production,
            STAGING_URL => Self::Staging,
            _ => Self::Custom(endpoint),
        })
    }
}

impl From<Endpoint> for Environment {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint.as_ref() {
            PRODUCTION_URL => Self::Production,
            STAGING_URL => Self::Staging,
            _ => Self::Custom(endpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_production() {
        assert_eq!(Environment::default(), Environment::Production);
        assert_eq!(Environment::default().base_url(), PRODUCTION_URL);
    }

    #[test]
    fn test_parse_names_case_insensitively() {
        assert_eq!(
            "PRODUCTION".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            " Staging ".parse::<Environment>().unwrap(),
            Environment::Staging
        );
    }

    #[test]
    fn test_parse_known_urls_map_to_named_variants() {
        assert_eq!(
            "https://api.channelape.com/".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            STAGING_URL.parse::<Environment>().unwrap(),
            Environment::Staging
        );
    }

    #[test]
    fn test_parse_custom_url() {
        let environment: Environment = "http://localhost:3000".parse().unwrap();
        assert!(matches!(environment, Environment::Custom(_)));
        assert_eq!(environment.to_string(), "http://localhost:3000");
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert!(matches!(
            "qa".parse::<Environment>(),
            Err(ConfigError::UnknownEnvironment { name }) if name == "qa"
        ));
    }

    #[test]
    fn test_from_endpoint() {
        let endpoint = Endpoint::new(STAGING_URL).unwrap();
        assert_eq!(Environment::from(endpoint), Environment::Staging);
    }
}
