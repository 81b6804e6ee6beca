//! Inbound ACH transfers initiated by other banks

use super::{action_path, auto_pager, fetch_page, resource_path, CreatedAtFilter};
use crate::error::Result;
use crate::http::{execute_json, RequestDescriptor, Transport};
use crate::pagination::{AutoPager, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const COLLECTION: &str = "inbound_ach_transfers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundAchTransferStatus {
    Pending,
    Declined,
    Accepted,
    Returned,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundAchTransferDirection {
    Credit,
    Debit,
    #[serde(other)]
    Unknown,
}

/// Why an inbound transfer was declined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    InsufficientFunds,
    PaymentStopped,
    AchRouteCanceled,
    EntityNotActive,
    CorporateCustomerAdvisedNotAuthorized,
    AuthorizationRevokedByCustomer,
    BeneficiaryOrAccountHolderDeceased,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundAchTransferDecline {
    pub reason: DeclineReason,
    pub declined_at: DateTime<Utc>,
}

/// An ACH transfer received by one of the accounts
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InboundAchTransfer {
    pub id: String,
    pub account_id: String,
    pub amount: i64,
    pub direction: InboundAchTransferDirection,
    pub status: InboundAchTransferStatus,
    #[serde(default)]
    pub originator_company_name: Option<String>,
    #[serde(default)]
    pub originator_company_id: Option<String>,
    #[serde(default)]
    pub decline: Option<InboundAchTransferDecline>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /inbound_ach_transfers/{id}/decline`
#[derive(Debug, Clone, Default, Serialize)]
pub struct InboundAchTransferDeclineParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DeclineReason>,
}

/// Query of `GET /inbound_ach_transfers`
#[derive(Debug, Clone, Default, Serialize)]
pub struct InboundAchTransferListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(rename = "status.in", skip_serializing_if = "Vec::is_empty")]
    pub status_in: Vec<InboundAchTransferStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtFilter>,
}

/// Inbound ACH transfer endpoints
#[derive(Clone)]
pub struct InboundAchTransferService {
    transport: Arc<dyn Transport>,
}

impl InboundAchTransferService {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Retrieve an inbound transfer by id
    pub async fn get(&self, transfer_id: &str) -> Result<InboundAchTransfer> {
        let request = RequestDescriptor::get(resource_path(COLLECTION, transfer_id)?);
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Fetch one page of inbound transfers
    pub async fn list(
        &self,
        params: &InboundAchTransferListParams,
        cancel: &CancellationToken,
    ) -> Result<Page<InboundAchTransfer>> {
        fetch_page(&self.transport, &format!("/{COLLECTION}"), params, cancel).await
    }

    /// Iterate over every inbound transfer matching `params`
    pub fn list_auto_paging(
        &self,
        params: &InboundAchTransferListParams,
        cancel: CancellationToken,
    ) -> Result<AutoPager<InboundAchTransfer>> {
        auto_pager(&self.transport, &format!("/{COLLECTION}"), params, cancel)
    }

    /// Decline a pending inbound transfer
    pub async fn decline(
        &self,
        transfer_id: &str,
        params: &InboundAchTransferDeclineParams,
    ) -> Result<InboundAchTransfer> {
        let request = RequestDescriptor::post(action_path(COLLECTION, transfer_id, "decline")?)
            .with_body(params)?;
        execute_json(self.transport.as_ref(), &request).await
    }
}

impl std::fmt::Debug for InboundAchTransferService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InboundAchTransferService")
            .finish_non_exhaustive()
    }
}
