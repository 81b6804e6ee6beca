//! Pagination module
//!
//! Cursor pagination shared by every list endpoint.
//!
//! # Overview
//!
//! - [`Page`] holds one decoded page and knows how to fetch the next one by
//!   replaying its request with the `cursor` query parameter replaced.
//! - [`AutoPager`] flattens the pages into one lazy sequence of items.
//!
//! ```rust,ignore
//! let mut accounts = client.accounts().list_auto_paging(&params, cancel)?;
//! while let Some(account) = accounts.next().await? {
//!     println!("{}", account.id);
//! }
//! ```

mod auto_pager;
mod page;

pub use auto_pager::AutoPager;
pub use page::{ListEnvelope, Page};

/// Largest page size the API accepts (also its default)
pub const MAX_PAGE_SIZE: u32 = 100;
