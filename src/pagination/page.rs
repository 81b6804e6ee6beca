//! A single page of list results
//!
//! Every list endpoint answers with the same envelope:
//!
//! ```text
//! { "data": [ ... ], "next_cursor": "<opaque>" | null }
//! ```
//!
//! A page keeps the request that produced it so the next page can be fetched
//! by replaying that request with the `cursor` query parameter replaced.

use crate::error::{Error, Result};
use crate::http::{RawResponse, RequestDescriptor, Transport};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Wire shape of a list response
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One page of a list endpoint's results
pub struct Page<T> {
    items: Vec<T>,
    next_cursor: Option<String>,
    status: u16,
    headers: HeaderMap,
    request: RequestDescriptor,
    transport: Arc<dyn Transport>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Execute `request` once and decode the result
    ///
    /// Fails with `Error::Cancelled` if `cancel` fires before the response
    /// arrives; nothing is sent when it has already fired.
    pub async fn fetch(
        transport: Arc<dyn Transport>,
        request: RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            response = transport.execute(&request) => response?,
        };

        let page = Self::from_response(transport, request, response)?;
        debug!(
            path = %page.request.path,
            items = page.items.len(),
            has_next = page.has_next(),
            "Fetched page"
        );
        Ok(page)
    }

    /// Build a page from a raw list response
    pub fn from_response(
        transport: Arc<dyn Transport>,
        request: RequestDescriptor,
        response: RawResponse,
    ) -> Result<Self> {
        let response = response.error_for_status()?;
        let envelope: ListEnvelope<T> = response.decode().map_err(|e| match e {
            Error::Decode { message } => Error::decode(format!(
                "list response from {} does not match {{data, next_cursor}}: {message}",
                request.path
            )),
            other => other,
        })?;

        Ok(Self {
            items: envelope.data,
            next_cursor: envelope.next_cursor,
            status: response.status,
            headers: response.headers,
            request,
            transport,
        })
    }

    /// Fetch the page after this one
    ///
    /// Returns `Ok(None)` when there is no further page. Issues exactly one
    /// request otherwise; errors are passed through untouched.
    pub async fn next_page(&self, cancel: &CancellationToken) -> Result<Option<Self>> {
        match self.next_page_request() {
            Some(request) => Self::fetch(Arc::clone(&self.transport), request, cancel)
                .await
                .map(Some),
            None => Ok(None),
        }
    }
}

impl<T> Page<T> {
    /// Items on this page, in server order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Take ownership of the items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Cursor for the following page, if the server returned one
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// True iff the server returned a non-empty cursor
    pub fn has_next(&self) -> bool {
        self.next_cursor.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// The request that produced this page
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// The request that fetches the next page
    pub fn next_page_request(&self) -> Option<RequestDescriptor> {
        if !self.has_next() {
            return None;
        }
        self.next_cursor
            .as_deref()
            .map(|cursor| self.request.with_cursor(cursor))
    }

    /// HTTP status of the response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Headers of the response
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("items", &self.items)
            .field("next_cursor", &self.next_cursor)
            .field("status", &self.status)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
