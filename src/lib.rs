//! # ChannelApe Rust Client
//!
//! A Rust client for the ChannelApe commerce-integration API, providing
//! type-safe configuration, a retrying HTTP pipeline, cursor-based pagination
//! and typed order, channel, action and session resources.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfiguration`] and [`ClientConfigurationBuilder`]
//! - Validated newtypes for the session ID, endpoint and password
//! - A [`RequestClient`](clients::RequestClient) that retries transport failures
//!   within a wall-clock budget and never retries a delivered response
//! - A [`Paginator`](rest::Paginator) that walks `lastKey` cursors until the
//!   server reports the last page
//! - Normalization of wire values (string numbers, epoch or ISO dates) into typed resources
//! - A structured [`ChannelApeError`] with status code, API errors and a
//!   diagnostic message
//!
//! ## Quick Start
//!
//! ```rust
//! use channelape::{ChannelApeClient, ClientConfiguration, Environment, SessionId};
//! use std::time::Duration;
//!
//! let config = ClientConfiguration::builder()
//!     .session_id(SessionId::new("b9a1c5f2-7e3d-4a6b-8c9d-0e1f2a3b4c5d").unwrap())
//!     .environment(Environment::Staging)
//!     .timeout(Duration::from_secs(30))
//!     .build();
//!
//! let client = ChannelApeClient::new(config).unwrap();
//! assert_eq!(client.endpoint(), "https://staging-api.channelape.com");
//! ```
//!
//! ## Fetching Orders
//!
//! ```rust,ignore
//! use channelape::resources::{OrdersQuery, OrderStatus};
//!
//! // A single order
//! let order = client.orders().get_by_id("c0f45529-cbed-4e90-9a38-c208d409ef2a").await?;
//!
//! // Every open order of a business, across all pages
//! let query = OrdersQuery::by_business_id("4baafa5b-4fbf-404e-9766-8a02ad45c3a4")
//!     .between("2018-05-01T00:00:00.000Z", "2018-05-02T00:00:00.000Z")
//!     .status(OrderStatus::Open);
//! let orders = client.orders().get_all(&query).await?;
//!
//! // Just the first page, with its pagination block
//! let page = client.orders().get_page(&query).await?;
//! println!("last page: {}", page.is_last_page());
//! ```
//!
//! ## Handling Errors
//!
//! ```rust,ignore
//! use channelape::ChannelApeError;
//!
//! match client.orders().get_by_id("missing").await {
//!     Ok(order) => println!("{}", order.id),
//!     Err(error) => {
//!         eprintln!("status {}", error.status_code());
//!         for api_error in error.api_errors() {
//!             eprintln!("{}: {}", api_error.code, api_error.message);
//!         }
//!         // Full diagnostic: method, URI, status, body and API errors
//!         eprintln!("{error}");
//!     }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction
//! - **Thread-safe**: The client and its errors are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Explicit expectations**: Every operation names the status code it expects

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod rest;

// Re-export public types at crate root for convenience
pub use client::ChannelApeClient;
pub use config::{
    ClientConfiguration, ClientConfigurationBuilder, Endpoint, Environment, Password, SessionId,
};
pub use error::ConfigError;

// Re-export request pipeline types
pub use clients::{
    HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, ReqwestTransport, RequestClient,
    RetryPolicy, Transport, TransportError, AUTHORIZATION_HEADER,
};
pub use rest::{ApiError, ChannelApeError};
