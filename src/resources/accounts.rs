//! Accounts
//!
//! `POST /accounts`, `GET /accounts/{id}`, `PATCH /accounts/{id}`,
//! `GET /accounts`, `POST /accounts/{id}/close`.

use super::{action_path, auto_pager, fetch_page, resource_path, CreatedAtFilter};
use crate::error::Result;
use crate::field::Field;
use crate::http::{execute_json, RequestDescriptor, Transport};
use crate::pagination::{AutoPager, Page};
use crate::types::Currency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const COLLECTION: &str = "accounts";

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Open,
    Closed,
    #[serde(other)]
    Unknown,
}

/// A bank account
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub status: AccountStatus,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Secondary entity for informational purposes; cleared with an explicit `null` update
    #[serde(default)]
    pub informational_entity_id: Option<String>,
    #[serde(default)]
    pub program_id: Option<String>,
    /// Annual interest rate as a decimal string (e.g. `"0.0125"`)
    #[serde(default)]
    pub interest_rate: Option<String>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Body of `POST /accounts`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountCreateParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informational_entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
}

impl AccountCreateParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `PATCH /accounts/{id}`; only present fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdateParams {
    #[serde(skip_serializing_if = "Field::is_missing")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_missing")]
    pub informational_entity_id: Field<String>,
}

/// Query of `GET /accounts`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(rename = "status.in", skip_serializing_if = "Vec::is_empty")]
    pub status_in: Vec<AccountStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Account endpoints
#[derive(Clone)]
pub struct AccountService {
    transport: Arc<dyn Transport>,
}

impl AccountService {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Open an account
    pub async fn create(&self, params: &AccountCreateParams) -> Result<Account> {
        let request = RequestDescriptor::post(format!("/{COLLECTION}")).with_body(params)?;
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Retrieve an account
    pub async fn get(&self, account_id: &str) -> Result<Account> {
        let request = RequestDescriptor::get(resource_path(COLLECTION, account_id)?);
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Update an account
    pub async fn update(&self, account_id: &str, params: &AccountUpdateParams) -> Result<Account> {
        let request =
            RequestDescriptor::patch(resource_path(COLLECTION, account_id)?).with_body(params)?;
        execute_json(self.transport.as_ref(), &request).await
    }

    /// Fetch one page of accounts
    pub async fn list(
        &self,
        params: &AccountListParams,
        cancel: &CancellationToken,
    ) -> Result<Page<Account>> {
        fetch_page(&self.transport, &format!("/{COLLECTION}"), params, cancel).await
    }

    /// Iterate over every account matching `params`
    pub fn list_auto_paging(
        &self,
        params: &AccountListParams,
        cancel: CancellationToken,
    ) -> Result<AutoPager<Account>> {
        auto_pager(&self.transport, &format!("/{COLLECTION}"), params, cancel)
    }

    /// Close an account
    pub async fn close(&self, account_id: &str) -> Result<Account> {
        let request = RequestDescriptor::post(action_path(COLLECTION, account_id, "close")?);
        execute_json(self.transport.as_ref(), &request).await
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}
