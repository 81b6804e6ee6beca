//! HTTP module
//!
//! Request descriptors, the `Transport` seam, and the reqwest-backed client.
//!
//! # Features
//!
//! - **Immutable Requests**: `RequestDescriptor` values that derive follow-ups
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: API key sent as a bearer token

mod client;
mod rate_limit;
mod request;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::{
    encode_query, RequestDescriptor, CURSOR_PARAM, IDEMPOTENCY_KEY_HEADER, LIMIT_PARAM,
};
pub use transport::{execute_json, RawResponse, Transport};
