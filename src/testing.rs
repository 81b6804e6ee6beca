//! Test helpers
//!
//! `MockTransport` replays scripted responses in order and records every
//! request it receives, so callers can assert on request counts and on the
//! exact query parameters sent.

use crate::error::{Error, Result};
use crate::http::{RawResponse, RequestDescriptor, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// In-memory transport that answers from a script
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before answering each request
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a 200 response with a JSON body
    pub fn push_json(&self, body: Value) -> &Self {
        self.push_response(RawResponse::json(&body))
    }

    /// Queue a raw response
    pub fn push_response(&self, response: RawResponse) -> &Self {
        lock(&self.responses).push_back(Ok(response));
        self
    }

    /// Queue an error
    pub fn push_error(&self, error: Error) -> &Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Scripted responses not consumed yet
    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        lock(&self.requests).push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = lock(&self.responses).pop_front();
        next.unwrap_or_else(|| {
            Err(Error::Other(format!(
                "no scripted response for {} {}",
                request.method, request.path
            )))
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
