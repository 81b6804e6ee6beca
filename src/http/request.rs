//! Request descriptors
//!
//! A `RequestDescriptor` is an immutable description of one API call: method,
//! path, ordered query parameters, headers and an optional JSON body. Pages
//! keep the descriptor that produced them and derive the next request from it
//! without touching the original.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, QueryPairs};
use serde::Serialize;
use std::time::Duration;

/// Query parameter carrying the pagination cursor
pub const CURSOR_PARAM: &str = "cursor";

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";

/// Header used to make retried writes safe on the server side
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Description of a single API request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Path relative to the configured base URL (or an absolute URL)
    pub path: String,
    /// Query parameters in the order they were added
    pub query: QueryPairs,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
}

impl RequestDescriptor {
    /// Create a new request descriptor
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PATCH request
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append query parameters serialized from a params struct
    ///
    /// Nested objects flatten to dotted keys (`created_at.after`), arrays repeat
    /// the key, and `null` values are omitted.
    pub fn with_params<P: Serialize + ?Sized>(mut self, params: &P) -> Result<Self> {
        self.query.extend(encode_query(params)?);
        Ok(self)
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set the idempotency key header
    #[must_use]
    pub fn idempotency_key(self, key: impl Into<String>) -> Self {
        self.header(IDEMPOTENCY_KEY_HEADER, key)
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize a params struct as the JSON body
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| Error::encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// First value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value of a header (case-insensitive name match)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Derive a copy with `key` set to `value`
    ///
    /// The first existing entry for `key` keeps its position, any duplicates are
    /// dropped, and every other parameter is carried over untouched.
    #[must_use]
    pub fn with_query_value(&self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        let mut replaced = false;
        next.query.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if replaced {
                return false;
            }
            v.clone_from(&value);
            replaced = true;
            true
        });
        if !replaced {
            next.query.push((key.to_string(), value));
        }
        next
    }

    /// Derive the request for the page that starts at `cursor`
    #[must_use]
    pub fn with_cursor(&self, cursor: &str) -> Self {
        self.with_query_value(CURSOR_PARAM, cursor)
    }
}

/// Serialize a params struct into ordered query pairs
pub fn encode_query<P: Serialize + ?Sized>(params: &P) -> Result<QueryPairs> {
    let value = serde_json::to_value(params).map_err(|e| Error::encode(e.to_string()))?;
    let mut pairs = Vec::new();
    match value {
        JsonValue::Object(map) => {
            for (key, value) in map {
                flatten_into(&mut pairs, key, value)?;
            }
        }
        JsonValue::Null => {}
        other => {
            return Err(Error::encode(format!(
                "query parameters must serialize to an object, got {other}"
            )))
        }
    }
    Ok(pairs)
}

fn flatten_into(pairs: &mut QueryPairs, key: String, value: JsonValue) -> Result<()> {
    match value {
        JsonValue::Null => {}
        JsonValue::String(s) => pairs.push((key, s)),
        JsonValue::Bool(b) => pairs.push((key, b.to_string())),
        JsonValue::Number(n) => pairs.push((key, n.to_string())),
        JsonValue::Array(items) => {
            for item in items {
                if item.is_array() {
                    return Err(Error::encode(format!(
                        "nested arrays are not supported in query parameter '{key}'"
                    )));
                }
                flatten_into(pairs, key.clone(), item)?;
            }
        }
        JsonValue::Object(map) => {
            for (sub, value) in map {
                flatten_into(pairs, format!("{key}.{sub}"), value)?;
            }
        }
    }
    Ok(())
}
