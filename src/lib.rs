//! # baas-client
//!
//! Async Rust client for a banking-as-a-service REST API.
//!
//! ## Features
//!
//! - **Resource Services**: Accounts, ACH transfers, inbound ACH transfers
//! - **Cursor Pagination**: `Page<T>` for one page, `AutoPager<T>` for all of them
//! - **Partial Updates**: `Field<T>` separates "absent", `null` and "set"
//! - **Resilient Transport**: Retries with backoff, token-bucket rate limiting
//! - **Cancellation**: Every page fetch races a `CancellationToken`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use baas_client::{Client, Result};
//! use baas_client::resources::AccountListParams;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // BAAS_BASE_URL and BAAS_API_KEY
//!     let client = Client::from_env()?;
//!
//!     let mut accounts = client
//!         .accounts()
//!         .list_auto_paging(&AccountListParams::default(), CancellationToken::new())?;
//!     while let Some(account) = accounts.next().await? {
//!         println!("{} {}", account.id, account.name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Client → AccountService / AchTransferService / Inbound...    │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────┬───────────┴──────────┬────────────────────┐
//! │   Pagination     │   RequestDescriptor  │   Transport        │
//! ├──────────────────┼──────────────────────┼────────────────────┤
//! │ Page<T>          │ method, path, query  │ HttpClient         │
//! │ AutoPager<T>     │ headers, body        │ Retry / Backoff    │
//! │ next_cursor      │ with_cursor()        │ Rate Limit         │
//! └──────────────────┴──────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Request descriptors, transport trait and HTTP client
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Three-state optional fields
pub mod field;

/// Environment configuration
pub mod config;

/// Resource services
pub mod resources;

/// Scripted transport for tests
pub mod testing;

mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use error::{Error, Result};
pub use field::Field;
pub use http::{HttpClient, HttpClientConfig, RequestDescriptor, Transport};
pub use pagination::{AutoPager, Page};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
