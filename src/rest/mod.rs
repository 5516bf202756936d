//! The resilient request pipeline behind every ChannelApe resource.
//!
//! This module turns raw transport exchanges into typed results:
//!
//! - **[`ExpectedStatus`]** and [`send_expecting`]: per-operation status contract
//! - **[`ChannelApeError`]**: the structured error every operation returns
//! - **[`Normalize`]**: date and numeric coercion from wire JSON into resources
//! - **[`Paginator`]**: cursor walking for list endpoints
//!
//! # Overview
//!
//! Single-entity operations go through [`fetch_one`]: one retried request,
//! a status check, then normalization. List operations go through
//! [`Paginator`], which drives the same steps once per page.
//!
//! ```rust,ignore
//! use channelape::rest::{fetch_one, ExpectedStatus, Paginator};
//!
//! let order: Order = fetch_one(&request_client, &request, ExpectedStatus::Ok).await?;
//!
//! let orders: Vec<Order> = Paginator::new(&request_client, "/v1/orders", "orders")
//!     .fetch_all(&query)
//!     .await?;
//! ```

mod errors;
mod expected;
mod normalize;
mod pagination;

pub use errors::{ApiError, ChannelApeError, TRANSPORT_STATUS_CODE};
pub use expected::{fetch_one, response_json, send_expecting, ExpectedStatus};
pub use normalize::{
    coerce_dates, coerce_each, coerce_integers, coerce_numbers, json_kind, Normalize,
    NormalizeError,
};
pub use pagination::{Page, PageQuery, Pagination, Paginator};
