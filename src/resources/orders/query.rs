//! Order list queries.
//!
//! An [`OrdersQuery`] selects orders by business, by channel, or by the
//! order's ID on its channel. Date-range variants accept their bounds either
//! as [`DateTime<Utc>`] values or as ISO-8601 strings; dates are serialized
//! as `2018-05-01T18:07:58.009Z` on the wire and strings pass through
//! unchanged.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::resources::orders::model::OrderStatus;
use crate::rest::PageQuery;

/// A date bound for an order query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParam {
    /// A timestamp, serialized with millisecond precision.
    Date(DateTime<Utc>),
    /// A pre-formatted ISO-8601 string, sent as-is.
    Iso(String),
}

impl DateParam {
    /// Returns the value sent as a query parameter.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        match self {
            Self::Date(date) => date.to_rfc3339_opts(SecondsFormat::Millis, true),
            Self::Iso(text) => text.clone(),
        }
    }
}

impl From<DateTime<Utc>> for DateParam {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<&str> for DateParam {
    fn from(text: &str) -> Self {
        Self::Iso(text.to_string())
    }
}

impl From<String> for DateParam {
    fn from(text: String) -> Self {
        Self::Iso(text)
    }
}

/// A query for a list of orders.
///
/// # Example
///
/// ```rust
/// use channelape::resources::{OrdersQuery, OrderStatus};
/// use channelape::rest::PageQuery;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2018, 5, 1, 18, 7, 58).unwrap()
///     + chrono::Duration::milliseconds(9);
/// let query = OrdersQuery::by_business_id("4baafa5b-4fbf-404e-9766-8a02ad45c3a4")
///     .between(start, "2018-05-02T00:00:00.000Z")
///     .status(OrderStatus::Open);
///
/// let params = query.to_query_params();
/// assert!(params.contains(&("startDate".to_string(), "2018-05-01T18:07:58.009Z".to_string())));
/// assert!(params.contains(&("endDate".to_string(), "2018-05-02T00:00:00.000Z".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdersQuery {
    /// All orders of a business, optionally within a date range.
    ByBusinessId {
        /// The business ID.
        business_id: String,
        /// Lower date bound.
        start_date: Option<DateParam>,
        /// Upper date bound.
        end_date: Option<DateParam>,
        /// Status filter.
        status: Option<OrderStatus>,
        /// Page cursor.
        last_key: Option<String>,
    },
    /// All orders of a channel, optionally within a date range.
    ByChannel {
        /// The channel ID.
        channel_id: String,
        /// Lower date bound.
        start_date: Option<DateParam>,
        /// Upper date bound.
        end_date: Option<DateParam>,
        /// Status filter.
        status: Option<OrderStatus>,
        /// Page cursor.
        last_key: Option<String>,
    },
    /// Orders of a business matching a channel order ID.
    ByChannelOrderId {
        /// The business ID.
        business_id: String,
        /// The order's ID on its channel.
        channel_order_id: String,
        /// Page cursor.
        last_key: Option<String>,
    },
}

impl OrdersQuery {
    /// Selects all orders of a business.
    #[must_use]
    pub fn by_business_id(business_id: impl Into<String>) -> Self {
        Self::ByBusinessId {
            business_id: business_id.into(),
            start_date: None,
            end_date: None,
            status: None,
            last_key: None,
        }
    }

    /// Selects all orders of a channel.
    #[must_use]
    pub fn by_channel(channel_id: impl Into<String>) -> Self {
        Self::ByChannel {
            channel_id: channel_id.into(),
            start_date: None,
            end_date: None,
            status: None,
            last_key: None,
        }
    }

    /// Selects the orders of a business with the given channel order ID.
    #[must_use]
    pub fn by_channel_order_id(
        business_id: impl Into<String>,
        channel_order_id: impl Into<String>,
    ) -> Self {
        Self::ByChannelOrderId {
            business_id: business_id.into(),
            channel_order_id: channel_order_id.into(),
            last_key: None,
        }
    }

    /// Restricts a business or channel query to a date range.
    ///
    /// Has no effect on [`OrdersQuery::ByChannelOrderId`].
    #[must_use]
    pub fn between(mut self, start: impl Into<DateParam>, end: impl Into<DateParam>) -> Self {
        if let Self::ByBusinessId {
            start_date,
            end_date,
            ..
        }
        | Self::ByChannel {
            start_date,
            end_date,
            ..
        } = &mut self
        {
            *start_date = Some(start.into());
            *end_date = Some(end.into());
        }
        self
    }

    /// Restricts a business or channel query to one status.
    ///
    /// Has no effect on [`OrdersQuery::ByChannelOrderId`].
    #[must_use]
    pub fn status(mut self, order_status: OrderStatus) -> Self {
        if let Self::ByBusinessId { status, .. } | Self::ByChannel { status, .. } = &mut self {
            *status = Some(order_status);
        }
        self
    }

    /// Returns the page cursor, if set.
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        match self {
            Self::ByBusinessId { last_key, .. }
            | Self::ByChannel { last_key, .. }
            | Self::ByChannelOrderId { last_key, .. } => last_key.as_deref(),
        }
    }
}

impl PageQuery for OrdersQuery {
    fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |key: &str, value: String| params.push((key.to_string(), value));

        let (start_date, end_date, status) = match self {
            Self::ByBusinessId {
                business_id,
                start_date,
                end_date,
                status,
                ..
            } => {
                push("businessId", business_id.clone());
                (start_date.as_ref(), end_date.as_ref(), status.as_ref())
            }
            Self::ByChannel {
                channel_id,
                start_date,
                end_date,
                status,
                ..
            } => {
                push("channelId", channel_id.clone());
                (start_date.as_ref(), end_date.as_ref(), status.as_ref())
            }
            Self::ByChannelOrderId {
                business_id,
                channel_order_id,
                ..
            } => {
                push("businessId", business_id.clone());
                push("channelOrderId", channel_order_id.clone());
                (None, None, None)
            }
        };

        if let Some(status) = status {
            push("status", status.to_string());
        }
        if let Some(start_date) = start_date {
            push("startDate", start_date.to_query_value());
        }
        if let Some(end_date) = end_date {
            push("endDate", end_date.to_query_value());
        }
        if let Some(last_key) = self.last_key() {
            push("lastKey", last_key.to_string());
        }
        params
    }

    fn with_last_key(&self, cursor: String) -> Self {
        let mut next = self.clone();
        match &mut next {
            Self::ByBusinessId { last_key, .. }
            | Self::ByChannel { last_key, .. }
            | Self::ByChannelOrderId { last_key, .. } => *last_key = Some(cursor),
        }
        next
    }
}
