//! Flat iteration across pages
//!
//! `AutoPager` pulls items one at a time and fetches the next page only when
//! the current one is used up. There is no prefetch: every fetch happens inside
//! a call to [`AutoPager::next`] and is raced against the pager's
//! cancellation token.

use super::page::Page;
use crate::error::{Error, Result};
use crate::http::{RequestDescriptor, Transport};
use futures::Stream;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

enum State<T> {
    /// First page not requested yet
    Pending(RequestDescriptor),
    /// Serving items from a fetched page
    Ready {
        items: std::vec::IntoIter<T>,
        next: Option<RequestDescriptor>,
    },
    /// Last page drained
    Exhausted,
    /// A fetch failed; the error was already returned
    Errored,
}

/// Lazy iterator over every item of a paginated list
pub struct AutoPager<T> {
    state: State<T>,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
    pages_fetched: usize,
    items_yielded: usize,
}

impl<T: DeserializeOwned> AutoPager<T> {
    /// Create a pager that fetches its first page on the first call to `next`
    pub fn new(
        transport: Arc<dyn Transport>,
        request: RequestDescriptor,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            state: State::Pending(request),
            transport,
            cancel,
            pages_fetched: 0,
            items_yielded: 0,
        }
    }

    /// Create a pager starting from an already fetched page
    pub fn from_page(page: Page<T>, cancel: CancellationToken) -> Self {
        let transport = Arc::clone(page.transport());
        let next = page.next_page_request();
        Self {
            state: State::Ready {
                items: page.into_items().into_iter(),
                next,
            },
            transport,
            cancel,
            pages_fetched: 1,
            items_yielded: 0,
        }
    }

    /// Advance to the next item
    ///
    /// Returns `Ok(None)` once the last page is drained. A failed fetch is
    /// returned once and leaves the pager finished; later calls return
    /// `Ok(None)` without touching the network.
    ///
    /// The pending request stays in place until its fetch resolves, so if this
    /// future is dropped mid-fetch the next call re-issues the same request.
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            let request = match &mut self.state {
                State::Ready { items, next } => {
                    if let Some(item) = items.next() {
                        self.items_yielded += 1;
                        return Ok(Some(item));
                    }
                    match next {
                        Some(request) => request.clone(),
                        None => {
                            self.state = State::Exhausted;
                            debug!(
                                pages = self.pages_fetched,
                                items = self.items_yielded,
                                "Pagination complete"
                            );
                            return Ok(None);
                        }
                    }
                }
                State::Pending(request) => request.clone(),
                State::Exhausted | State::Errored => return Ok(None),
            };

            self.load(request).await?;
        }
    }

    /// Drain every remaining item into a vector
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while let Some(item) = self.next().await? {
            all.push(item);
        }
        Ok(all)
    }

    /// Adapt the pager into a stream that ends after the first error
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        futures::stream::try_unfold(self, |mut pager| async move {
            let item = pager.next().await?;
            Ok::<_, Error>(item.map(|item| (item, pager)))
        })
    }

    async fn load(&mut self, request: RequestDescriptor) -> Result<()> {
        match Page::<T>::fetch(Arc::clone(&self.transport), request, &self.cancel).await {
            Ok(page) => {
                self.pages_fetched += 1;
                let next = page.next_page_request();
                self.state = State::Ready {
                    items: page.into_items().into_iter(),
                    next,
                };
                Ok(())
            }
            Err(e) => {
                debug!(
                    pages = self.pages_fetched,
                    items = self.items_yielded,
                    error = %e,
                    "Pagination stopped"
                );
                self.state = State::Errored;
                Err(e)
            }
        }
    }
}

impl<T> AutoPager<T> {
    /// Number of pages fetched so far (a page handed to `from_page` counts)
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Number of items returned by `next` so far
    pub fn items_yielded(&self) -> usize {
        self.items_yielded
    }

    /// True once the last page has been drained
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// True once a fetch has failed
    pub fn is_errored(&self) -> bool {
        matches!(self.state, State::Errored)
    }

    /// Token governing this pager's network calls
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl<T> std::fmt::Debug for AutoPager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            State::Pending(_) => "pending",
            State::Ready { .. } => "ready",
            State::Exhausted => "exhausted",
            State::Errored => "errored",
        };
        f.debug_struct("AutoPager")
            .field("state", &state)
            .field("pages_fetched", &self.pages_fetched)
            .field("items_yielded", &self.items_yielded)
            .finish_non_exhaustive()
    }
}
