//! Configuration loading
//!
//! Builds an [`HttpClientConfig`] from environment variables:
//!
//! | Variable              | Meaning                          | Default      |
//! |-----------------------|----------------------------------|--------------|
//! | `BAAS_BASE_URL`       | API base URL (required)          |              |
//! | `BAAS_API_KEY`        | API key, sent as a bearer token  | none         |
//! | `BAAS_TIMEOUT_SECS`   | Per-request timeout in seconds   | 30           |
//! | `BAAS_MAX_RETRIES`    | Retries for transient failures   | 3            |
//! | `BAAS_RATE_LIMIT_RPS` | Client-side requests per second, `0` disables | 10 |

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const ENV_BASE_URL: &str = "BAAS_BASE_URL";
pub const ENV_API_KEY: &str = "BAAS_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "BAAS_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "BAAS_MAX_RETRIES";
pub const ENV_RATE_LIMIT_RPS: &str = "BAAS_RATE_LIMIT_RPS";

/// Load client configuration from the process environment
pub fn from_env() -> Result<HttpClientConfig> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Load client configuration through an arbitrary variable lookup
pub fn from_lookup<F>(lookup: F) -> Result<HttpClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let base_url = get(ENV_BASE_URL).ok_or_else(|| Error::missing_field(ENV_BASE_URL))?;
    Url::parse(&base_url).map_err(|e| Error::invalid_value(ENV_BASE_URL, e.to_string()))?;

    let mut builder = HttpClientConfig::builder().base_url(base_url);

    if let Some(key) = get(ENV_API_KEY) {
        builder = builder.api_key(key);
    }
    if let Some(secs) = parse_var::<u64>(ENV_TIMEOUT_SECS, get(ENV_TIMEOUT_SECS))? {
        if secs == 0 {
            return Err(Error::invalid_value(
                ENV_TIMEOUT_SECS,
                "timeout must be at least one second",
            ));
        }
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = parse_var::<u32>(ENV_MAX_RETRIES, get(ENV_MAX_RETRIES))? {
        builder = builder.max_retries(retries);
    }
    match parse_var::<u32>(ENV_RATE_LIMIT_RPS, get(ENV_RATE_LIMIT_RPS))? {
        Some(0) => builder = builder.no_rate_limit(),
        Some(rps) => builder = builder.rate_limit(RateLimiterConfig::per_second(rps)),
        None => {}
    }

    Ok(builder.build())
}

fn parse_var<T>(name: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| Error::invalid_value(name, format!("'{value}': {e}")))
    })
    .transpose()
}
