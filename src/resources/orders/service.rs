//! Order operations.

use crate::clients::{HttpMethod, HttpRequest, RequestClient, Transport};
use crate::resources::common::{collection_path, member_path};
use crate::resources::orders::model::Order;
use crate::resources::orders::query::OrdersQuery;
use crate::rest::{fetch_one, ChannelApeError, ExpectedStatus, Page, Paginator};

const RESOURCE: &str = "orders";
const ITEMS_FIELD: &str = "orders";

/// What [`OrdersService::get`] should fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdersRequest {
    /// A single order by ID.
    ById(String),
    /// Every order matching a query, across all pages.
    Query(OrdersQuery),
}

impl From<&str> for OrdersRequest {
    fn from(order_id: &str) -> Self {
        Self::ById(order_id.to_string())
    }
}

impl From<String> for OrdersRequest {
    fn from(order_id: String) -> Self {
        Self::ById(order_id)
    }
}

impl From<OrdersQuery> for OrdersRequest {
    fn from(query: OrdersQuery) -> Self {
        Self::Query(query)
    }
}

/// The result of [`OrdersService::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum OrdersResponse {
    /// Answer to [`OrdersRequest::ById`].
    One(Order),
    /// Answer to [`OrdersRequest::Query`].
    Many(Vec<Order>),
}

impl OrdersResponse {
    /// Returns the single order, if this answers a by-id request.
    #[must_use]
    pub fn into_order(self) -> Option<Order> {
        match self {
            Self::One(order) => Some(order),
            Self::Many(_) => None,
        }
    }

    /// Returns the orders, if this answers a query.
    #[must_use]
    pub fn into_orders(self) -> Option<Vec<Order>> {
        match self {
            Self::One(_) => None,
            Self::Many(orders) => Some(orders),
        }
    }
}

/// Reads and updates orders.
///
/// Obtained from [`ChannelApeClient::orders`](crate::ChannelApeClient::orders).
///
/// # Example
///
/// ```rust,ignore
/// use channelape::resources::OrdersQuery;
///
/// let order = client.orders().get_by_id("c0f45529-cbed-4e90-9a38-c208d409ef2a").await?;
///
/// let all = client
///     .orders()
///     .get_all(&OrdersQuery::by_business_id("4baafa5b-4fbf-404e-9766-8a02ad45c3a4"))
///     .await?;
/// ```
#[derive(Debug)]
pub struct OrdersService<'a, T> {
    client: &'a RequestClient<T>,
    max_pages: Option<usize>,
}

impl<'a, T: Transport> OrdersService<'a, T> {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: &'a RequestClient<T>) -> Self {
        Self {
            client,
            max_pages: None,
        }
    }

    /// Caps the number of pages [`get_all`](Self::get_all) may request.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Fetches one order by ID, or every order matching a query.
    ///
    /// # Errors
    ///
    /// See [`get_by_id`](Self::get_by_id) and [`get_all`](Self::get_all).
    pub async fn get(
        &self,
        request: impl Into<OrdersRequest>,
    ) -> Result<OrdersResponse, ChannelApeError> {
        match request.into() {
            OrdersRequest::ById(order_id) => self.get_by_id(&order_id).await.map(OrdersResponse::One),
            OrdersRequest::Query(query) => self.get_all(&query).await.map(OrdersResponse::Many),
        }
    }

    /// Fetches one order (`GET /v1/orders/{id}`, expects 200).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the request fails, the status is not
    /// 200, or the body is not an order.
    pub async fn get_by_id(&self, order_id: &str) -> Result<Order, ChannelApeError> {
        let request = HttpRequest {
            http_method: HttpMethod::Get,
            path: member_path(RESOURCE, order_id),
            query: Vec::new(),
            body: None,
        };
        fetch_one(self.client, &request, ExpectedStatus::Ok).await
    }

    /// Fetches every order matching `query`, following page cursors.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] on the first failing page; orders from
    /// earlier pages are discarded.
    pub async fn get_all(&self, query: &OrdersQuery) -> Result<Vec<Order>, ChannelApeError> {
        self.paginator().fetch_all(query).await
    }

    /// Fetches a single page of orders matching `query`.
    ///
    /// The returned pagination block can be used to request the next page:
    ///
    /// ```rust,ignore
    /// use channelape::rest::PageQuery;
    ///
    /// let page = orders.get_page(&query).await?;
    /// if let Some(last_key) = page.last_key() {
    ///     let next = orders.get_page(&query.with_last_key(last_key.to_string())).await?;
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the request fails, the status is not
    /// 200, or the body is not a page of orders.
    pub async fn get_page(&self, query: &OrdersQuery) -> Result<Page<Order>, ChannelApeError> {
        self.paginator().fetch_single_page(query).await
    }

    /// Updates an order (`PUT /v1/orders/{id}`, expects 202).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the order cannot be serialized, the
    /// request fails, the status is not 202, or the body is not an order.
    pub async fn update(&self, order: &Order) -> Result<Order, ChannelApeError> {
        let path = member_path(RESOURCE, &order.id);
        let body = serde_json::to_value(order).map_err(|e| {
            ChannelApeError::invalid_request(
                HttpMethod::Put,
                path.clone(),
                format!("Failed to serialize order: {e}"),
            )
        })?;
        let request = HttpRequest::builder(HttpMethod::Put, path.clone())
            .body(body)
            .build()
            .map_err(|e| ChannelApeError::invalid_request(HttpMethod::Put, path, e.to_string()))?;

        fetch_one(self.client, &request, ExpectedStatus::Accepted).await
    }

    fn paginator(&self) -> Paginator<'a, T> {
        let paginator = Paginator::new(self.client, collection_path(RESOURCE), ITEMS_FIELD);
        match self.max_pages {
            Some(max_pages) => paginator.max_pages(max_pages),
            None => paginator,
        }
    }
}
