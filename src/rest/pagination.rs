//! Cursor-based pagination over list endpoints.
//!
//! List endpoints answer with a page envelope:
//!
//! ```json
//! {
//!   "orders": [ ... ],
//!   "pagination": { "lastPage": false, "lastKey": "opaque-cursor" }
//! }
//! ```
//!
//! [`Paginator`] walks these pages in two modes:
//!
//! - [`Paginator::fetch_single_page`]: one request, pagination block returned as-is
//! - [`Paginator::fetch_all`]: follows `lastKey` until `lastPage` is `true`
//!
//! Pages are fetched strictly one after another, since each request carries
//! the cursor from the previous response. Items keep the order in which the
//! server sent them. Any failure aborts the walk and discards the pages
//! accumulated so far.
//!
//! # Deref Pattern
//!
//! [`Page<T>`] implements `Deref<Target = [T]>`, so a page can be iterated and
//! indexed directly:
//!
//! ```rust
//! use channelape::rest::{Page, Pagination};
//!
//! let page = Page {
//!     items: vec!["a", "b"],
//!     pagination: Pagination { last_page: true, last_key: None },
//! };
//! assert_eq!(page.len(), 2);
//! assert_eq!(page[0], "a");
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest, HttpResponse, RequestClient, Transport};
use crate::rest::errors::ChannelApeError;
use crate::rest::expected::{response_json, send_expecting, ExpectedStatus};
use crate::rest::normalize::Normalize;

/// The pagination block of a list response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// `true` if no further pages exist.
    pub last_page: bool,
    /// Opaque cursor to send back for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_key: Option<String>,
}

/// A single page of a list response.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// The normalized items, in server order.
    pub items: Vec<T>,
    /// The pagination block, unchanged.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns `true` if the server reported this as the last page.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        self.pagination.last_page
    }

    /// Returns the cursor for the next page, if any.
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        self.pagination.last_key.as_deref()
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// A list query that can be sent as query parameters and advanced by cursor.
pub trait PageQuery: Clone + Send + Sync {
    /// Returns the query parameters for this request, in wire order.
    ///
    /// Includes `lastKey` when a cursor is set.
    fn to_query_params(&self) -> Vec<(String, String)>;

    /// Returns a copy of this query positioned at `last_key`.
    #[must_use]
    fn with_last_key(&self, last_key: String) -> Self;
}

struct FetchedPage<R> {
    page: Page<R>,
    request: HttpRequest,
    response: HttpResponse,
}

/// Walks the pages of one list endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use channelape::rest::Paginator;
///
/// let paginator = Paginator::new(&request_client, "/v1/orders", "orders").max_pages(500);
/// let orders: Vec<Order> = paginator.fetch_all(&query).await?;
/// ```
#[derive(Debug)]
pub struct Paginator<'a, T> {
    client: &'a RequestClient<T>,
    path: String,
    items_field: &'static str,
    max_pages: Option<usize>,
}

impl<'a, T: Transport> Paginator<'a, T> {
    /// Creates a paginator for `path`, reading items from `items_field`.
    #[must_use]
    pub fn new(client: &'a RequestClient<T>, path: impl Into<String>, items_field: &'static str) -> Self {
        Self {
            client,
            path: path.into(),
            items_field,
            max_pages: None,
        }
    }

    /// Caps the number of pages [`fetch_all`](Self::fetch_all) may request.
    ///
    /// Unbounded by default.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Fetches exactly one page and returns it with its pagination block.
    ///
    /// The cursor is never followed, whatever `lastPage` says.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] if the request fails, the status is not
    /// 200, or the body is not a valid page.
    pub async fn fetch_single_page<R, Q>(&self, query: &Q) -> Result<Page<R>, ChannelApeError>
    where
        R: Normalize,
        Q: PageQuery,
    {
        Ok(self.fetch_page(query, 1).await?.page)
    }

    /// Fetches every page, starting from `query`, and concatenates the items.
    ///
    /// A cursor already set on `query` is honored, so a walk can resume from
    /// a page obtained with [`fetch_single_page`](Self::fetch_single_page).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelApeError`] on the first failing page. A page that is
    /// not the last but carries no `lastKey`, or a walk that exceeds
    /// [`max_pages`](Self::max_pages), is a
    /// [`ChannelApeError::MalformedResponse`].
    pub async fn fetch_all<R, Q>(&self, query: &Q) -> Result<Vec<R>, ChannelApeError>
    where
        R: Normalize,
        Q: PageQuery,
    {
        let mut items = Vec::new();
        let mut current = query.clone();
        let mut page_number: usize = 0;

        loop {
            page_number += 1;
            let fetched = self.fetch_page(&current, page_number).await?;
            let FetchedPage {
                page,
                request,
                response,
            } = fetched;

            items.extend(page.items);

            if page.pagination.last_page {
                tracing::debug!(
                    pages = page_number,
                    items = items.len(),
                    path = %self.path,
                    "pagination complete"
                );
                return Ok(items);
            }

            let Some(last_key) = page.pagination.last_key else {
                return Err(ChannelApeError::malformed(
                    &request,
                    &response,
                    "pagination reports more pages but has no 'lastKey'",
                ));
            };

            if self.max_pages.is_some_and(|max| page_number >= max) {
                return Err(ChannelApeError::malformed(
                    &request,
                    &response,
                    format!("pagination did not finish within {page_number} pages"),
                ));
            }

            current = current.with_last_key(last_key);
        }
    }

    async fn fetch_page<R, Q>(
        &self,
        query: &Q,
        page_number: usize,
    ) -> Result<FetchedPage<R>, ChannelApeError>
    where
        R: Normalize,
        Q: PageQuery,
    {
        let request = HttpRequest {
            http_method: HttpMethod::Get,
            path: self.path.clone(),
            query: query.to_query_params(),
            body: None,
        };

        let response = send_expecting(self.client, &request, ExpectedStatus::Ok).await?;
        let body = response_json(&request, &response)?;
        let page = self.parse_page(&request, &response, body)?;

        tracing::debug!(
            page = page_number,
            items = page.items.len(),
            last_page = page.pagination.last_page,
            has_last_key = page.pagination.last_key.is_some(),
            path = %self.path,
            "fetched page"
        );

        Ok(FetchedPage {
            page,
            request,
            response,
        })
    }

    fn parse_page<R: Normalize>(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        body: serde_json::Value,
    ) -> Result<Page<R>, ChannelApeError> {
        let serde_json::Value::Object(mut envelope) = body else {
            return Err(ChannelApeError::malformed(
                request,
                response,
                "page body is not a JSON object",
            ));
        };

        let pagination = envelope
            .remove("pagination")
            .ok_or_else(|| {
                ChannelApeError::malformed(request, response, "missing 'pagination' block")
            })
            .and_then(|value| {
                serde_json::from_value::<Pagination>(value).map_err(|e| {
                    ChannelApeError::malformed(
                        request,
                        response,
                        format!("invalid 'pagination' block: {e}"),
                    )
                })
            })?;

        let Some(serde_json::Value::Array(raw_items)) = envelope.remove(self.items_field) else {
            return Err(ChannelApeError::malformed(
                request,
                response,
                format!("missing '{}' array", self.items_field),
            ));
        };

        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                R::normalize(raw).map_err(|e| {
                    ChannelApeError::malformed(
                        request,
                        response,
                        format!("{}[{index}]: {e}", self.items_field),
                    )
                })
            })
            .collect::<Result<Vec<R>, _>>()?;

        Ok(Page { items, pagination })
    }
}
