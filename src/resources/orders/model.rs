//! Order, line item and fulfillment types.
//!
//! Every type here implements [`Normalize`], so money and weight fields are
//! accepted as strings or numbers and timestamps as ISO-8601 strings or epoch
//! milliseconds. Line items are normalized independently wherever they
//! appear: at order level and inside each fulfillment.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resources::common::AdditionalField;
use crate::rest::{
    coerce_dates, coerce_each, coerce_integers, coerce_numbers, Normalize, NormalizeError,
};

/// The lifecycle status of an order.
///
/// # Example
///
/// ```rust
/// use channelape::resources::OrderStatus;
///
/// let status: OrderStatus = "IN_PROGRESS".parse().unwrap();
/// assert_eq!(status, OrderStatus::InProgress);
/// assert_eq!(status.to_string(), "IN_PROGRESS");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The order is open.
    Open,
    /// The order is being processed.
    InProgress,
    /// The order is closed.
    Closed,
    /// The order was canceled.
    Canceled,
}

impl OrderStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status '{0}'")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// The status of a fulfillment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    /// Not yet started.
    Open,
    /// Submitted and awaiting confirmation.
    Pending,
    /// Fulfilled.
    Success,
    /// Canceled.
    Canceled,
    /// Rejected by the fulfillment service.
    Error,
    /// Failed after submission.
    Failure,
}

/// A single product line on an order or fulfillment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Line item ID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Ordered quantity.
    pub quantity: i64,
    /// Unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Weight in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,
    /// Shipping price charged for this line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_price: Option<f64>,
    /// Shipping tax charged for this line.
    #[serde(
        default,
        alias = "shippingtax",
        skip_serializing_if = "Option::is_none"
    )]
    pub shipping_tax: Option<f64>,
    /// Shipping method name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Universal product code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    /// Vendor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Free-form attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_fields: Vec<AdditionalField>,
}

impl Normalize for LineItem {
    fn coerce(object: &mut Map<String, Value>) -> Result<(), NormalizeError> {
        coerce_integers(object, &["quantity"])?;
        coerce_numbers(
            object,
            &[
                "price",
                "grams",
                "shippingPrice",
                "shippingTax",
                "shippingtax",
            ],
        )
    }
}

/// A shipment covering some or all of an order's line items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    /// Fulfillment ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fulfillment status.
    pub status: FulfillmentStatus,
    /// The line items shipped in this fulfillment.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Carrier name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_company: Option<String>,
    /// Carrier tracking number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    /// Carrier tracking URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_urls: Option<Vec<String>>,
    /// Shipping method name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    /// Free-form attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_fields: Vec<AdditionalField>,
}

impl Normalize for Fulfillment {
    fn coerce(object: &mut Map<String, Value>) -> Result<(), NormalizeError> {
        coerce_each(object, "lineItems", LineItem::coerce)
    }
}

/// The customer who placed an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Free-form attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_fields: Vec<AdditionalField>,
}

/// A ChannelApe order.
///
/// # Example
///
/// ```rust
/// use channelape::resources::{Order, OrderStatus};
/// use channelape::rest::Normalize;
/// use serde_json::json;
///
/// let order = Order::normalize(json!({
///     "id": "c0f45529-cbed-4e90-9a38-c208d409ef2a",
///     "businessId": "4baafa5b-4fbf-404e-9766-8a02ad45c3a4",
///     "channelId": "9c728601-0286-457d-b0d6-ec19292d4485",
///     "channelOrderId": "314980073478",
///     "status": "OPEN",
///     "purchasedAt": "2018-05-01T18:07:58.009Z",
///     "createdAt": "2018-05-01T18:07:58.009Z",
///     "updatedAt": "2018-05-01T18:07:58.009Z",
///     "subtotalPrice": "15.99",
///     "totalPrice": "20.99",
///     "totalShippingPrice": "5",
///     "totalTax": "0",
///     "totalGrams": 200,
///     "lineItems": [{"id": "1", "title": "Shirt", "quantity": 1, "price": "15.99"}]
/// })).unwrap();
///
/// assert_eq!(order.status, OrderStatus::Open);
/// assert!((order.total_price - 20.99).abs() < f64::EPSILON);
/// assert!(order.total_shipping_tax.is_none());
/// assert!(order.canceled_at.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order ID.
    pub id: String,
    /// Owning business.
    pub business_id: String,
    /// Channel the order came from.
    pub channel_id: String,
    /// The order's ID on its channel.
    pub channel_order_id: String,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// When the customer placed the order.
    pub purchased_at: DateTime<Utc>,
    /// When the order was canceled, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<DateTime<Utc>>,
    /// When the order was created in ChannelApe.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated in ChannelApe.
    pub updated_at: DateTime<Utc>,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabetic_currency_code: Option<String>,
    /// Sum of line item prices.
    pub subtotal_price: f64,
    /// Order total.
    pub total_price: f64,
    /// Shipping charged.
    pub total_shipping_price: f64,
    /// Tax on shipping, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shipping_tax: Option<f64>,
    /// Total tax.
    pub total_tax: f64,
    /// Total weight in grams.
    pub total_grams: f64,
    /// The customer, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    /// Ordered items.
    pub line_items: Vec<LineItem>,
    /// Shipments, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillments: Option<Vec<Fulfillment>>,
    /// Free-form attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_fields: Vec<AdditionalField>,
}

impl Normalize for Order {
    fn coerce(object: &mut Map<String, Value>) -> Result<(), NormalizeError> {
        coerce_dates(
            object,
            &["purchasedAt", "canceledAt", "createdAt", "updatedAt"],
        )?;
        coerce_numbers(
            object,
            &[
                "subtotalPrice",
                "totalPrice",
                "totalShippingPrice",
                "totalShippingTax",
                "totalTax",
                "totalGrams",
            ],
        )?;
        coerce_each(object, "lineItems", LineItem::coerce)?;
        coerce_each(object, "fulfillments", Fulfillment::coerce)
    }
}
