//! Outbound ACH transfers
//!
//! Transfers created with `require_approval` sit in `pending_approval` until
//! they are approved or cancelled through the action endpoints.

use super::{action_path, auto_pager, fetch_page, resource_path, CreatedAtFilter};
use crate::error::Result;
use crate::http::{execute_json, RequestDescriptor, Transport};
use crate::pagination::{AutoPager, Page};
use crate::types::Currency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const COLLECTION: &str = "ach_transfers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchTransferStatus {
    PendingApproval,
    PendingTransferSessionConfirmation,
    Canceled,
    PendingSubmission,
    PendingReviewing,
    RequiresAttention,
    Rejected,
    Submitted,
    Returned,
    #[serde(other)]
    Unknown,
}

impl AchTransferStatus {
    /// Statuses from which the transfer can no longer move
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Canceled | Self::Rejected | Self::Returned | Self::Submitted
        )
    }
}

/// NACHA Standard Entry Class code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardEntryClassCode {
    CorporateCreditOrDebit,
    CorporateTradeExchange,
    PrearrangedPaymentsAndDeposit,
    InternetInitiated,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AchTransferApproval {
    pub approved_at: DateTime<Utc>,
    #[serde(default)]
    pub approved_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AchTransferCancellation {
    pub canceled_at: DateTime<Utc>,
    #[serde(default)]
    pub canceled_by: Option<String>,
}

/// An outbound ACH transfer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AchTransfer {
    pub id: String,
    pub account_id: String,
    /// Amount in the minor unit of `currency`; negative for debits
    pub amount: i64,
    #[serde(default)]
    pub currency: Currency,
    pub status: AchTransferStatus,
    pub statement_descriptor: String,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub routing_number: Option<String>,
    #[serde(default)]
    pub external_account_id: Option<String>,
    #[serde(default)]
    pub individual_name: Option<String>,
    #[serde(default)]
    pub standard_entry_class_code: Option<StandardEntryClassCode>,
    #[serde(default)]
    pub approval: Option<AchTransferApproval>,
    #[serde(default)]
    pub cancellation: Option<AchTransferCancellation>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Body of `POST /ach_transfers`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AchTransferCreateParams {
    pub account_id: String,
    pub amount: i64,
    pub statement_descriptor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_entry_class_code: Option<StandardEntryClassCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_approval: Option<bool>,
}

/// Query of `GET /ach_transfers`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AchTransferListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_account_id: Option<String>,
    #[serde(rename = "status.in", skip_serializing_if = "Vec::is_empty")]
    pub status_in: Vec<AchTransferStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// ACH transfer endpoints
#[derive(Clone)]
pub struct AchTransferService {
    transport: Arc<dyn Transport>,
}

impl AchTransferService {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a transfer
    pub async fn create(&self, params: &AchTransferCreateParams) -> Result<AchTransfer> {
        let request = RequestDescriptor::post(format!("/{COLLECTION}")).with_body(params)?;
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Create a transfer under an idempotency key; transient failures are retried
    pub async fn create_idempotent(
        &self,
        params: &AchTransferCreateParams,
        idempotency_key: &str,
    ) -> Result<AchTransfer> {
        let request = RequestDescriptor::post(format!("/{COLLECTION}"))
            .idempotency_key(idempotency_key)
            .with_body(params)?;
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Retrieve an ACH transfer by id
    pub async fn get(&self, transfer_id: &str) -> Result<AchTransfer> {
        let request = RequestDescriptor::get(resource_path(COLLECTION, transfer_id)?);
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Fetch one page of ACH transfers
    pub async fn list(
        &self,
        params: &AchTransferListParams,
        cancel: &CancellationToken,
    ) -> Result<Page<AchTransfer>> {
        fetch_page(&self.transport, &format!("/{COLLECTION}"), params, cancel).await
    }

    /// Iterate over every ACH transfer matching `params`
    pub fn list_auto_paging(
        &self,
        params: &AchTransferListParams,
        cancel: CancellationToken,
    ) -> Result<AutoPager<AchTransfer>> {
        auto_pager(&self.transport, &format!("/{COLLECTION}"), params, cancel)
    }

    /// Approve a transfer in `pending_approval`
    pub async fn approve(&self, transfer_id: &str) -> Result<AchTransfer> {
        let request = RequestDescriptor::post(action_path(COLLECTION, transfer_id, "approve")?);
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Cancel a transfer in `pending_approval`
    pub async fn cancel(&self, transfer_id: &str) -> Result<AchTransfer> {
        let request = RequestDescriptor::post(action_path(COLLECTION, transfer_id, "cancel")?);
        execute_json(self.transport.as_ref(), &request).await
    }
}

impl std::fmt::Debug for AchTransferService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchTransferService").finish_non_exhaustive()
    }
}
