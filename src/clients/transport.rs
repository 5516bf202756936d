//! The transport seam between the request pipeline and the network.
//!
//! [`Transport`] performs exactly one HTTP exchange. [`ReqwestTransport`] is
//! the production implementation; tests substitute an in-memory transport to
//! drive the retry loop deterministically.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ClientConfiguration, SessionId};
use crate::error::ConfigError;

/// Client version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the session ID on every request.
pub const AUTHORIZATION_HEADER: &str = "X-Channel-Ape-Authorization-Token";

/// Performs a single HTTP exchange.
///
/// An implementation returns `Ok` for every delivered response, including
/// 4xx and 5xx statuses, and `Err` only when no response was obtained.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use channelape::clients::{HttpRequest, HttpResponse, Transport, TransportError};
///
/// struct AlwaysNotFound;
///
/// impl Transport for AlwaysNotFound {
///     async fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::new(404, HashMap::new(), "{}"))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends `request` once.
    fn send(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest` client using rustls.
///
/// Every request carries the session ID in the
/// `X-Channel-Ape-Authorization-Token` header and asks for JSON.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`; the inner `reqwest::Client` pools
/// connections and is shared by all concurrent calls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport from a client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionIdRequired`] if the configuration has no
    /// session ID, or [`ConfigError::HttpClient`] if the `reqwest` client
    /// cannot be built.
    pub fn new(config: &ClientConfiguration) -> Result<Self, ConfigError> {
        let session_id = config.session_id().ok_or(ConfigError::SessionIdRequired)?;
        Self::with_endpoint(config.endpoint(), session_id, config.request_timeout())
    }

    /// Creates a transport for an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the `reqwest` client cannot be built.
    pub fn with_endpoint(
        base_url: impl Into<String>,
        session_id: &SessionId,
        request_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("ChannelApe Rust Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            session_id.as_ref().to_string(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            default_headers,
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let uri = format!("{}{}", self.base_url, request.path);
        let url = reqwest::Url::parse(&uri).map_err(|_| TransportError::InvalidUri {
            uri: uri.clone(),
        })?;

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }
}
