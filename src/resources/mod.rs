//! Resource services
//!
//! One service per API resource. Services are cheap handles over the shared
//! transport; obtain them from [`crate::Client`].

mod accounts;
mod ach_transfers;
mod inbound_ach_transfers;

pub use accounts::{
    Account, AccountCreateParams, AccountListParams, AccountService, AccountStatus,
    AccountUpdateParams,
};
pub use ach_transfers::{
    AchTransfer, AchTransferApproval, AchTransferCancellation, AchTransferCreateParams,
    AchTransferListParams, AchTransferService, AchTransferStatus, StandardEntryClassCode,
};
pub use inbound_ach_transfers::{
    DeclineReason, InboundAchTransfer, InboundAchTransferDecline,
    InboundAchTransferDeclineParams, InboundAchTransferDirection, InboundAchTransferListParams,
    InboundAchTransferService, InboundAchTransferStatus,
};

use crate::error::{Error, Result};
use crate::http::{RequestDescriptor, Transport};
use crate::pagination::{AutoPager, Page};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Time-range filter shared by list endpoints (`created_at.after=...`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatedAtFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_or_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_or_before: Option<DateTime<Utc>>,
}

impl CreatedAtFilter {
    pub fn after(at: DateTime<Utc>) -> Self {
        Self {
            after: Some(at),
            ..Default::default()
        }
    }

    pub fn before(at: DateTime<Utc>) -> Self {
        Self {
            before: Some(at),
            ..Default::default()
        }
    }
}

/// `/{collection}/{id}`, rejecting ids that would change the path
pub(crate) fn resource_path(collection: &str, id: &str) -> Result<String> {
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(Error::encode(format!("invalid {collection} id '{id}'")));
    }
    Ok(format!("/{collection}/{id}"))
}

/// `/{collection}/{id}/{action}`
pub(crate) fn action_path(collection: &str, id: &str, action: &str) -> Result<String> {
    Ok(format!("{}/{action}", resource_path(collection, id)?))
}

pub(crate) fn list_request<P: Serialize>(path: &str, params: &P) -> Result<RequestDescriptor> {
    RequestDescriptor::get(path).with_params(params)
}

pub(crate) async fn fetch_page<T, P>(
    transport: &Arc<dyn Transport>,
    path: &str,
    params: &P,
    cancel: &CancellationToken,
) -> Result<Page<T>>
where
    T: DeserializeOwned,
    P: Serialize,
{
    let request = list_request(path, params)?;
    Page::fetch(Arc::clone(transport), request, cancel).await
}

pub(crate) fn auto_pager<T, P>(
    transport: &Arc<dyn Transport>,
    path: &str,
    params: &P,
    cancel: CancellationToken,
) -> Result<AutoPager<T>>
where
    T: DeserializeOwned,
    P: Serialize,
{
    let request = list_request(path, params)?;
    Ok(AutoPager::new(Arc::clone(transport), request, cancel))
}

#[cfg(test)]
mod tests;
