//! Orders: model types, list queries, and the [`OrdersService`].

mod model;
mod query;
mod service;

pub use model::{
    Customer, Fulfillment, FulfillmentStatus, LineItem, Order, OrderStatus, UnknownOrderStatus,
};
pub use query::{DateParam, OrdersQuery};
pub use service::{OrdersRequest, OrdersResponse, OrdersService};
