//! Transport abstraction
//!
//! Everything above the HTTP layer talks to a `Transport`. `HttpClient` is the
//! production implementation; tests swap in scripted transports.

use super::request::RequestDescriptor;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Raw HTTP response as handed back by a transport
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Undecoded response body
    pub body: Bytes,
}

impl RawResponse {
    /// Create a response with the given status and body
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Create a 200 response carrying a JSON document
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an `HttpStatus` error
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::http_status(
                self.status,
                String::from_utf8_lossy(&self.body).into_owned(),
            ))
        }
    }

    /// Decode the body as JSON
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::decode(e.to_string()))
    }

    /// Request id assigned by the server, when present
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
    }
}

/// Executes request descriptors against the API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the raw response
    ///
    /// Implementations may retry internally; callers above this layer do not.
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse>;
}

/// Execute a request and decode a JSON body, failing on non-2xx statuses
pub async fn execute_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: &RequestDescriptor,
) -> Result<T> {
    transport.execute(request).await?.error_for_status()?.decode()
}
