//! HTTP client types for ChannelApe API communication.
//!
//! This module provides the transport layer: request and response types,
//! the [`Transport`] seam, and the retrying [`RequestClient`].
//!
//! # Overview
//!
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a delivered response, with its raw body
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT)
//! - [`Transport`]: performs one HTTP exchange
//! - [`ReqwestTransport`]: the `reqwest`-backed [`Transport`]
//! - [`RequestClient`]: retries transport failures within a [`RetryPolicy`]
//! - [`TransportError`]: no response was obtained
//!
//! # Example
//!
//! ```rust,ignore
//! use channelape::clients::{
//!     HttpMethod, HttpRequest, ReqwestTransport, RequestClient, RetryPolicy,
//! };
//!
//! let transport = ReqwestTransport::new(&config)?;
//! let client = RequestClient::new(transport, RetryPolicy::from_config(&config));
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/v1/orders/abc").build()?;
//! let response = client.execute(&request).await?;
//! println!("{} {}", response.code, response.body);
//! ```

mod errors;
mod http_request;
mod http_response;
mod request_client;
mod transport;

pub use errors::{InvalidHttpRequestError, TransportError};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use request_client::{RequestClient, RetryPolicy};
pub use transport::{ReqwestTransport, Transport, AUTHORIZATION_HEADER, SDK_VERSION};
