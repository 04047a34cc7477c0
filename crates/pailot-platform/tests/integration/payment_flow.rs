//! Integration Tests: Payment Flow
//!
//! Tests the payment lifecycle, SDK first and backend second:
//! - create / submit / complete / cancel
//! - backend pass-throughs
//! - sharing

use super::fakes::*;
use pailot_platform::{PaymentData, PaymentStatus, PlatformError, PlatformSession, ShareContent};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Test: amounts are stringified and the payment is recorded on the backend
#[tokio::test]
async fn test_create_payment_records_backend() {
    let sdk = FakeSdk::new();
    let backend = FakeBackend::new();
    let session = PlatformSession::new(Some(sdk.clone()), backend.clone());

    let data = PaymentData::new(3.5, "Delivery Payment - A to B", json!({ "type": "delivery" }));
    let payment = session.create_payment(&data).await.unwrap();

    assert_eq!(payment.identifier, "pay-1");
    assert_eq!(sdk.calls(), vec!["create:3.5"]);
    assert_eq!(
        backend.requests(),
        vec![(
            "/api/payments/create".to_string(),
            json!({
                "paymentId": "pay-1",
                "amount": "3.5",
                "memo": "Delivery Payment - A to B",
                "metadata": { "type": "delivery" }
            })
        )]
    );
}

/// Test: submit, complete and cancel mirror the txid to the backend
#[tokio::test]
async fn test_payment_lifecycle() {
    let sdk = FakeSdk::new();
    let backend = FakeBackend::new();
    let session = PlatformSession::new(Some(sdk.clone()), backend.clone());

    let approved = session.submit_payment("pay-1").await.unwrap();
    assert_eq!(approved.status, PaymentStatus::Approved);

    let completed = session.complete_payment("pay-1").await.unwrap();
    assert_eq!(completed.status, PaymentStatus::Completed);

    session.cancel_payment("pay-2").await.unwrap();

    assert_eq!(
        backend.requests(),
        vec![
            (
                "/api/payments/approve".to_string(),
                json!({ "paymentId": "pay-1", "txid": "tx-pay-1" })
            ),
            (
                "/api/payments/complete".to_string(),
                json!({ "paymentId": "pay-1", "txid": "tx-pay-1" })
            ),
            (
                "/api/payments/cancel".to_string(),
                json!({ "paymentId": "pay-2" })
            ),
        ]
    );
}

/// Test: payment operations need the wallet SDK
#[tokio::test]
async fn test_payments_without_sdk() {
    let backend = FakeBackend::new();
    let session = PlatformSession::new(None, backend.clone());

    let data = PaymentData::new(1, "memo", json!({}));
    assert!(matches!(
        session.create_payment(&data).await,
        Err(PlatformError::SdkUnavailable)
    ));
    assert!(matches!(
        session.complete_payment("pay-1").await,
        Err(PlatformError::SdkUnavailable)
    ));
    assert!(backend.requests().is_empty());
}

/// Test: order, profile and history calls go straight to the backend
#[tokio::test]
async fn test_backend_pass_throughs() {
    let backend = FakeBackend::new();
    let session = PlatformSession::new(None, backend.clone());

    session
        .create_order(&json!({ "pickup": "Makati", "dropoff": "Pasig" }))
        .await
        .unwrap();
    session.order_status("o-7").await.unwrap();
    session.user_profile().await.unwrap();
    session
        .update_user_profile(&json!({ "phone": "0917" }))
        .await
        .unwrap();
    session.transaction_history().await.unwrap();

    assert_eq!(
        backend.paths(),
        vec![
            "/api/orders/create",
            "/api/orders/status/o-7",
            "/api/user/profile",
            "PUT /api/user/profile",
            "/api/transactions/history",
        ]
    );
}

/// Test: payment status is read from the backend; failures come back unchanged
#[tokio::test]
async fn test_payment_status() {
    let session = PlatformSession::new(None, FakeBackend::with_payment_status("pending"));
    let status = session.payment_status("pay-3").await.unwrap();
    assert!(status.is_pending());

    let backend = FakeBackend::failing_status_lookup();
    let session = PlatformSession::new(None, backend.clone());
    assert!(matches!(
        session.payment_status("pay-4").await,
        Err(PlatformError::Backend { status: 500, .. })
    ));
    assert_eq!(backend.paths(), vec!["/api/payments/status/pay-4"]);
}

/// Test: share passes the content through to the SDK
#[tokio::test]
async fn test_share_content() {
    let sdk = FakeSdk::new();
    let session = PlatformSession::new(Some(sdk.clone()), FakeBackend::new());

    session
        .share_content(&ShareContent {
            title: "PailotPH Delivery".to_string(),
            text: "Check out my delivery from A to B!".to_string(),
            url: "https://pailot.ph/delivery/d-1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(sdk.calls(), vec!["share:https://pailot.ph/delivery/d-1"]);
}
