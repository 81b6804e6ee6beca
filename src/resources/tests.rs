//! Tests for resource services

use super::*;
use crate::field::Field;
use crate::http::{RawResponse, IDEMPOTENCY_KEY_HEADER};
use crate::testing::MockTransport;
use crate::types::{Currency, Method};
use chrono::TimeZone;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn account_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Operating",
        "status": "open",
        "currency": "USD",
        "entity_id": "entity_1",
        "informational_entity_id": null,
        "program_id": "program_1",
        "interest_rate": "0.0125",
        "closed_at": null,
        "created_at": "2024-03-01T12:00:00Z",
        "idempotency_key": null,
        "type": "account"
    })
}

fn ach_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "account_id": "account_1",
        "amount": 1500,
        "currency": "USD",
        "status": status,
        "statement_descriptor": "payroll",
        "account_number": "987654321",
        "routing_number": "101050001",
        "standard_entry_class_code": "corporate_credit_or_debit",
        "approval": null,
        "cancellation": null,
        "created_at": "2024-03-01T12:00:00Z"
    })
}

fn setup() -> (Arc<MockTransport>, Arc<dyn Transport>) {
    let mock = Arc::new(MockTransport::new());
    let transport: Arc<dyn Transport> = mock.clone();
    (mock, transport)
}

// ============================================================================
// Path Helpers
// ============================================================================

#[test]
fn test_resource_paths() {
    assert_eq!(resource_path("accounts", "acct_1").unwrap(), "/accounts/acct_1");
    assert_eq!(
        action_path("ach_transfers", "ach_1", "approve").unwrap(),
        "/ach_transfers/ach_1/approve"
    );
    assert!(resource_path("accounts", "").is_err());
    assert!(resource_path("accounts", "../admin").is_err());
    assert!(resource_path("accounts", "a?b=c").is_err());
}

#[test]
fn test_list_request_flattens_filters() {
    let params = AchTransferListParams {
        limit: Some(10),
        account_id: Some("account_1".to_string()),
        status_in: vec![
            AchTransferStatus::PendingApproval,
            AchTransferStatus::Submitted,
        ],
        created_at: Some(CreatedAtFilter::after(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )),
        ..Default::default()
    };

    let request = list_request("/ach_transfers", &params).unwrap();
    let mut query = request.query.clone();
    query.sort();

    assert_eq!(request.method, Method::GET);
    assert_eq!(
        query,
        vec![
            ("account_id".to_string(), "account_1".to_string()),
            (
                "created_at.after".to_string(),
                "2024-01-01T00:00:00Z".to_string()
            ),
            ("limit".to_string(), "10".to_string()),
            ("status.in".to_string(), "pending_approval".to_string()),
            ("status.in".to_string(), "submitted".to_string()),
        ]
    );
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_account_create() {
    let (mock, transport) = setup();
    mock.push_json(account_json("account_1"));

    let service = AccountService::new(transport);
    let mut params = AccountCreateParams::new("Operating");
    params.entity_id = Some("entity_1".to_string());
    let account = service.create(&params).await.unwrap();

    assert_eq!(account.id, "account_1");
    assert_eq!(account.status, AccountStatus::Open);
    assert_eq!(account.currency, Currency::USD);
    assert_eq!(account.interest_rate.as_deref(), Some("0.0125"));

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/accounts");
    assert_eq!(
        requests[0].body,
        Some(json!({"name": "Operating", "entity_id": "entity_1"}))
    );
}

#[tokio::test]
async fn test_account_update_sends_only_present_fields() {
    let (mock, transport) = setup();
    mock.push_json(account_json("account_1"));

    let service = AccountService::new(transport);
    let params = AccountUpdateParams {
        name: Field::Missing,
        informational_entity_id: Field::Null,
    };
    service.update("account_1", &params).await.unwrap();

    let request = &mock.requests()[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, "/accounts/account_1");
    assert_eq!(request.body, Some(json!({"informational_entity_id": null})));
}

#[tokio::test]
async fn test_account_get_and_close() {
    let (mock, transport) = setup();
    mock.push_json(account_json("account_1"));
    let mut closed = account_json("account_1");
    closed["status"] = json!("closed");
    closed["closed_at"] = json!("2024-06-01T00:00:00Z");
    mock.push_json(closed);

    let service = AccountService::new(transport);
    let account = service.get("account_1").await.unwrap();
    assert_eq!(account.status, AccountStatus::Open);

    let account = service.close("account_1").await.unwrap();
    assert_eq!(account.status, AccountStatus::Closed);
    assert!(account.closed_at.is_some());

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].path, "/accounts/account_1/close");
}

#[tokio::test]
async fn test_account_get_not_found() {
    let (mock, transport) = setup();
    mock.push_response(RawResponse::new(404, r#"{"type": "object_not_found_error"}"#));

    let err = AccountService::new(transport)
        .get("account_missing")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_account_unknown_status_is_tolerated() {
    let (mock, transport) = setup();
    let mut body = account_json("account_1");
    body["status"] = json!("frozen");
    mock.push_json(body);

    let account = AccountService::new(transport).get("account_1").await.unwrap();
    assert_eq!(account.status, AccountStatus::Unknown);
}

#[tokio::test]
async fn test_account_list_page() {
    let (mock, transport) = setup();
    mock.push_json(json!({
        "data": [account_json("account_1"), account_json("account_2")],
        "next_cursor": "cur_2"
    }));

    let params = AccountListParams {
        limit: Some(2),
        status_in: vec![AccountStatus::Open],
        ..Default::default()
    };
    let page = AccountService::new(transport)
        .list(&params, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.next_cursor(), Some("cur_2"));
    assert_eq!(
        page.next_page_request().unwrap().query_value("cursor"),
        Some("cur_2")
    );
    assert_eq!(mock.requests()[0].query_value("status.in"), Some("open"));
}

#[tokio::test]
async fn test_account_list_honours_cancellation() {
    let (mock, transport) = setup();
    mock.push_json(json!({"data": [account_json("account_1")], "next_cursor": null}));

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = AccountService::new(transport)
        .list(&AccountListParams::default(), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(mock.request_count(), 0);
    assert_eq!(mock.remaining(), 1);
}

#[tokio::test]
async fn test_account_list_auto_paging() {
    let (mock, transport) = setup();
    mock.push_json(json!({
        "data": [account_json("account_1"), account_json("account_2")],
        "next_cursor": "cur_2"
    }));
    mock.push_json(json!({
        "data": [account_json("account_3")],
        "next_cursor": null
    }));

    let params = AccountListParams {
        entity_id: Some("entity_1".to_string()),
        ..Default::default()
    };
    let accounts = AccountService::new(transport)
        .list_auto_paging(&params, CancellationToken::new())
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    let ids: Vec<_> = accounts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["account_1", "account_2", "account_3"]);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].query_value("entity_id"), Some("entity_1"));
    assert_eq!(requests[1].query_value("cursor"), Some("cur_2"));
}

// ============================================================================
// ACH Transfers
// ============================================================================

#[tokio::test]
async fn test_ach_transfer_create_idempotent() {
    let (mock, transport) = setup();
    mock.push_json(ach_json("ach_1", "pending_approval"));

    let params = AchTransferCreateParams {
        account_id: "account_1".to_string(),
        amount: 1500,
        statement_descriptor: "payroll".to_string(),
        account_number: Some("987654321".to_string()),
        routing_number: Some("101050001".to_string()),
        require_approval: Some(true),
        ..Default::default()
    };
    let transfer = AchTransferService::new(transport)
        .create_idempotent(&params, "payroll-2024-03")
        .await
        .unwrap();

    assert_eq!(transfer.status, AchTransferStatus::PendingApproval);
    assert!(!transfer.status.is_final());
    assert_eq!(
        transfer.standard_entry_class_code,
        Some(StandardEntryClassCode::CorporateCreditOrDebit)
    );

    let request = &mock.requests()[0];
    assert_eq!(
        request.header_value(IDEMPOTENCY_KEY_HEADER),
        Some("payroll-2024-03")
    );
    assert_eq!(request.body.as_ref().unwrap()["require_approval"], json!(true));
    assert!(request.body.as_ref().unwrap().get("external_account_id").is_none());
}

#[tokio::test]
async fn test_ach_transfer_approve_and_cancel() {
    let (mock, transport) = setup();
    let mut approved = ach_json("ach_1", "pending_submission");
    approved["approval"] = json!({"approved_at": "2024-03-01T13:00:00Z", "approved_by": "user_1"});
    mock.push_json(approved);
    let mut canceled = ach_json("ach_2", "canceled");
    canceled["cancellation"] = json!({"canceled_at": "2024-03-01T13:05:00Z", "canceled_by": null});
    mock.push_json(canceled);

    let service = AchTransferService::new(transport);
    let transfer = service.approve("ach_1").await.unwrap();
    assert_eq!(
        transfer.approval.unwrap().approved_by.as_deref(),
        Some("user_1")
    );

    let transfer = service.cancel("ach_2").await.unwrap();
    assert_eq!(transfer.status, AchTransferStatus::Canceled);
    assert!(transfer.status.is_final());
    assert!(transfer.cancellation.unwrap().canceled_by.is_none());

    let paths: Vec<_> = mock.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec!["/ach_transfers/ach_1/approve", "/ach_transfers/ach_2/cancel"]
    );
}

#[tokio::test]
async fn test_ach_transfer_list_auto_paging_decode_error() {
    let (mock, transport) = setup();
    mock.push_json(json!({
        "data": [ach_json("ach_1", "submitted")],
        "next_cursor": "cur_2"
    }));
    mock.push_json(json!({"data": [{"id": "ach_2"}], "next_cursor": null}));

    let mut pager = AchTransferService::new(transport)
        .list_auto_paging(&AchTransferListParams::default(), CancellationToken::new())
        .unwrap();

    assert_eq!(pager.next().await.unwrap().unwrap().id, "ach_1");
    assert!(pager.next().await.unwrap_err().is_decode());
}

// ============================================================================
// Inbound ACH Transfers
// ============================================================================

#[tokio::test]
async fn test_inbound_ach_transfer_decline() {
    let (mock, transport) = setup();
    mock.push_json(json!({
        "id": "inbound_ach_1",
        "account_id": "account_1",
        "amount": -2500,
        "direction": "debit",
        "status": "declined",
        "originator_company_name": "GYM CO",
        "decline": {"reason": "payment_stopped", "declined_at": "2024-03-02T09:00:00Z"},
        "created_at": "2024-03-02T08:00:00Z"
    }));

    let params = InboundAchTransferDeclineParams {
        reason: Some(DeclineReason::PaymentStopped),
    };
    let transfer = InboundAchTransferService::new(transport)
        .decline("inbound_ach_1", &params)
        .await
        .unwrap();

    assert_eq!(transfer.status, InboundAchTransferStatus::Declined);
    assert_eq!(transfer.direction, InboundAchTransferDirection::Debit);
    assert_eq!(transfer.decline.unwrap().reason, DeclineReason::PaymentStopped);

    let request = &mock.requests()[0];
    assert_eq!(request.path, "/inbound_ach_transfers/inbound_ach_1/decline");
    assert_eq!(request.body, Some(json!({"reason": "payment_stopped"})));
}

#[tokio::test]
async fn test_inbound_ach_transfer_list_empty() {
    let (mock, transport) = setup();
    mock.push_json(json!({"data": [], "next_cursor": null}));

    let params = InboundAchTransferListParams {
        account_id: Some("account_1".to_string()),
        status_in: vec![InboundAchTransferStatus::Pending],
        ..Default::default()
    };
    let items = InboundAchTransferService::new(transport)
        .list_auto_paging(&params, CancellationToken::new())
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert!(items.is_empty());
    assert_eq!(mock.request_count(), 1);
}
