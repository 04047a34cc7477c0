//! Integration Tests: Driver Delivery Flow
//!
//! Tests the driver service over fake adapters:
//! - History split into pending and past
//! - Accepting a delivery
//! - Completing a delivery: payment, backend, reward mint, share
//! - Sign-in requirements and wallet fallback

use super::doubles::*;
use pailot::driver::SHARE_TITLE;
use pailot::DriverError;
use pailot_payments::Operation;
use pailot_platform::{DeliveryStatus, PaymentStatus};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Test: history splits into pending and everything else
#[tokio::test]
async fn test_history_split() {
    let harness = Harness::new(vec![
        delivery("d-1", DeliveryStatus::Pending),
        delivery("d-2", DeliveryStatus::Completed),
        delivery("d-3", DeliveryStatus::Cancelled),
        delivery("d-4", DeliveryStatus::Pending),
    ]);
    let mut driver = harness.driver();

    assert_eq!(driver.load_history().await.unwrap().len(), 4);

    let pending: Vec<&str> = driver.pending().iter().map(|d| d.id.as_str()).collect();
    let past: Vec<&str> = driver.past().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(pending, vec!["d-1", "d-4"]);
    assert_eq!(past, vec!["d-2", "d-3"]);
}

/// Test: accepting sends the signed-in driver's id
#[tokio::test]
async fn test_accept_delivery() {
    let harness = Harness::new(vec![delivery("d-1", DeliveryStatus::Pending)]);
    let mut driver = harness.driver();
    driver.sign_in().await.unwrap();

    let accepted = driver
        .accept_delivery(&delivery("d-1", DeliveryStatus::Pending))
        .await
        .unwrap();

    assert_eq!(accepted.status, DeliveryStatus::Accepted);
    assert_eq!(driver.active_delivery().map(|d| d.id.as_str()), Some("d-1"));
    assert_eq!(
        harness.backend.body("/api/deliveries/d-1/accept"),
        Some(json!({ "driverId": "driver-1" }))
    );
}

/// Test: delivery actions need a signed-in driver
#[tokio::test]
async fn test_actions_require_sign_in() {
    let harness = Harness::new(vec![delivery("d-1", DeliveryStatus::Pending)]);
    let mut driver = harness.driver();
    let pending = delivery("d-1", DeliveryStatus::Pending);

    assert!(matches!(
        driver.accept_delivery(&pending).await,
        Err(DriverError::NotSignedIn)
    ));
    assert!(matches!(
        driver.complete_delivery(&pending).await,
        Err(DriverError::NotSignedIn)
    ));
    assert!(harness.calls().is_empty());
}

/// Test: completing runs payment, backend completion, reward and share in order
#[tokio::test]
async fn test_complete_delivery() {
    let harness = Harness::new(vec![delivery("d-1", DeliveryStatus::Accepted)]);
    let mut driver = harness.driver();
    driver.sign_in().await.unwrap();

    let result = driver
        .complete_delivery(&delivery("d-1", DeliveryStatus::Accepted))
        .await
        .unwrap();

    assert_eq!(
        harness.calls(),
        vec![
            "sdk authenticate",
            "backend /api/auth/signin",
            "sdk create 3.5",
            "backend /api/payments/create",
            "sdk submit pay-1",
            "backend /api/payments/approve",
            "backend /api/deliveries/d-1/complete",
            "sdk share https://pailot.ph/delivery/d-1 | Check out my delivery from Makati to BGC!",
        ]
    );

    // Completed on time, rated 4.8, 12.5 km
    assert_eq!(result.reward, 12);
    assert_eq!(result.payment.status, PaymentStatus::Approved);
    assert_eq!(result.delivery.status, DeliveryStatus::Completed);
    assert!(result.shared);

    assert_eq!(result.reward_transaction.source, issuer());
    assert_eq!(
        result.reward_transaction.operation,
        Operation::Payment {
            destination: driver_wallet(),
            amount: "12".to_string(),
        }
    );

    assert_eq!(
        harness.backend.body("/api/deliveries/d-1/complete"),
        Some(json!({ "driverId": "driver-1", "paymentId": "pay-1" }))
    );
}

/// Test: the payment carries the route in its memo and metadata
#[tokio::test]
async fn test_delivery_payment_metadata() {
    let harness = Harness::new(vec![delivery("d-7", DeliveryStatus::Accepted)]);
    let mut driver = harness.driver();
    driver.sign_in().await.unwrap();

    driver
        .complete_delivery(&delivery("d-7", DeliveryStatus::Accepted))
        .await
        .unwrap();

    let data = harness.sdk.last_payment().unwrap();
    assert_eq!(data.amount, "3.5");
    assert_eq!(data.memo, "Delivery Payment - Makati to BGC");
    assert_eq!(
        data.metadata,
        json!({
            "type": "delivery",
            "details": { "id": "d-7", "from": "Makati", "to": "BGC" }
        })
    );
}

/// Test: a wallet without a share sheet still completes the delivery
#[tokio::test]
async fn test_complete_without_share() {
    let calls = Calls::default();
    let harness = Harness::with_sdk(
        FakeSdk::new(calls.clone()).without_share(),
        calls,
        vec![delivery("d-1", DeliveryStatus::Accepted)],
    );
    let mut driver = harness.driver();
    driver.sign_in().await.unwrap();
    driver.load_history().await.unwrap();

    let result = driver
        .complete_delivery(&delivery("d-1", DeliveryStatus::Accepted))
        .await
        .unwrap();

    assert!(!result.shared);
    assert_eq!(result.reward, 12);
    assert!(driver.pending().is_empty());
    assert_eq!(driver.past()[0].status, DeliveryStatus::Completed);
}

/// Test: a failed backend completion stops before the reward
#[tokio::test]
async fn test_backend_failure_stops_flow() {
    let harness = Harness::new(Vec::new());
    let mut driver = harness.driver();
    driver.sign_in().await.unwrap();

    let result = driver
        .complete_delivery(&delivery("missing", DeliveryStatus::Accepted))
        .await;

    assert!(matches!(result, Err(DriverError::Platform(_))));
    assert!(!harness.calls().iter().any(|c| c.starts_with("sdk share")));
}

/// Test: the configured wallet address stands in when sign-in has none
#[tokio::test]
async fn test_wallet_address_fallback() {
    let calls = Calls::default();
    let harness = Harness::with_sdk(
        FakeSdk::new(calls.clone()).without_wallet_address(),
        calls,
        vec![delivery("d-1", DeliveryStatus::Accepted)],
    );

    let mut driver = harness.driver();
    driver.sign_in().await.unwrap();
    assert!(matches!(
        driver
            .complete_delivery(&delivery("d-1", DeliveryStatus::Accepted))
            .await,
        Err(DriverError::Ledger(_))
    ));

    let mut driver = harness.driver().with_wallet_address(Some(driver_wallet()));
    driver.sign_in().await.unwrap();
    let result = driver
        .complete_delivery(&delivery("d-1", DeliveryStatus::Accepted))
        .await
        .unwrap();
    assert_eq!(
        result.reward_transaction.operation,
        Operation::Payment {
            destination: driver_wallet(),
            amount: "12".to_string(),
        }
    );
}

/// Test: without a token client, history works and completion stops before paying
#[tokio::test]
async fn test_driver_without_tokens() {
    let harness = Harness::new(vec![
        delivery("d-1", DeliveryStatus::Pending),
        delivery("d-2", DeliveryStatus::Accepted),
    ]);
    let mut driver = harness.driver_without_tokens();

    driver.load_history().await.unwrap();
    assert_eq!(driver.pending().len(), 1);

    driver.sign_in().await.unwrap();
    assert!(driver.wallet().is_none());
    driver
        .accept_delivery(&delivery("d-1", DeliveryStatus::Pending))
        .await
        .unwrap();

    assert!(matches!(
        driver
            .complete_delivery(&delivery("d-2", DeliveryStatus::Accepted))
            .await,
        Err(DriverError::RewardsUnavailable)
    ));
    assert!(!harness.calls().iter().any(|c| c.starts_with("sdk create")));
}

/// Test: sharing a delivery links to its page
#[tokio::test]
async fn test_share_delivery() {
    let harness = Harness::new(Vec::new());
    let driver = harness.driver();

    driver
        .share_delivery(&delivery("d-9", DeliveryStatus::Completed))
        .await
        .unwrap();

    assert_eq!(SHARE_TITLE, "PailotPH Delivery");
    assert_eq!(
        harness.calls(),
        vec!["sdk share https://pailot.ph/delivery/d-9 | Check out my delivery from Makati to BGC!"]
    );
}
