//! ChannelApe resources and the services that read and write them.
//!
//! Each service borrows the client's [`RequestClient`](crate::clients::RequestClient)
//! and is obtained from [`ChannelApeClient`](crate::ChannelApeClient):
//!
//! | Service | Operations |
//! |---------|------------|
//! | [`OrdersService`] | get by id, get all / one page by query, update |
//! | [`ChannelsService`] | get, create |
//! | [`ActionsService`] | get |
//! | [`SessionsService`] | get the configured session |

mod actions;
mod channels;
mod common;
mod orders;
mod sessions;

pub use actions::{Action, ActionsService};
pub use channels::{Channel, ChannelSettings, ChannelsService, CreateChannelRequest};
pub use common::{AdditionalField, API_VERSION};
pub use orders::{
    Customer, DateParam, Fulfillment, FulfillmentStatus, LineItem, Order, OrderStatus,
    OrdersQuery, OrdersRequest, OrdersResponse, OrdersService, UnknownOrderStatus,
};
pub use sessions::{Session, SessionsService};
