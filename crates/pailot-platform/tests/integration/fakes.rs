//! Recording doubles of the wallet SDK and the backend.

use async_trait::async_trait;
use pailot_platform::backend::{CancelPaymentRequest, PaymentTxRequest};
use pailot_platform::{
    AcceptDeliveryRequest, AuthResult, BackendApi, CompleteDeliveryRequest, Delivery,
    LedgerTransaction, Payment, PaymentData, PaymentRecordRequest, PaymentStatus,
    PaymentStatusResponse, PlatformError, Result, Scope, ShareContent, SignInRequest, User,
    WalletSdk,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub fn payment(id: &str, status: PaymentStatus) -> Payment {
    Payment {
        identifier: id.to_string(),
        amount: "3.5".to_string(),
        memo: "Delivery Payment - A to B".to_string(),
        metadata: json!({ "type": "delivery" }),
        status,
        transaction: Some(LedgerTransaction {
            txid: format!("tx-{}", id),
            verified: true,
            link: format!("https://api.testnet.minepi.com/transactions/tx-{}", id),
        }),
    }
}

// ==================== WALLET SDK ====================

#[derive(Default)]
pub struct FakeSdk {
    pub calls: Mutex<Vec<String>>,
    pub requested_scopes: Mutex<Vec<Scope>>,
    pub incomplete_payment: Mutex<Option<Payment>>,
    pub fail_authentication: bool,
}

impl FakeSdk {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_incomplete_payment(payment: Payment) -> Arc<Self> {
        let sdk = Self::default();
        *sdk.incomplete_payment.lock().unwrap() = Some(payment);
        Arc::new(sdk)
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_authentication: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl WalletSdk for FakeSdk {
    async fn authenticate(&self, scopes: &[Scope]) -> Result<AuthResult> {
        self.record("authenticate".to_string());
        if self.fail_authentication {
            return Err(PlatformError::Sdk("user rejected".to_string()));
        }
        *self.requested_scopes.lock().unwrap() = scopes.to_vec();

        Ok(AuthResult {
            access_token: "access-token".to_string(),
            user: User {
                uid: "uid-1".to_string(),
                username: Some("juan".to_string()),
                wallet_address: Some("GWALLET".to_string()),
            },
            scopes: scopes.to_vec(),
            incomplete_payment: self.incomplete_payment.lock().unwrap().clone(),
        })
    }

    async fn create_payment(&self, data: &PaymentData) -> Result<Payment> {
        self.record(format!("create:{}", data.amount));
        Ok(Payment {
            identifier: "pay-1".to_string(),
            amount: data.amount.clone(),
            memo: data.memo.clone(),
            metadata: data.metadata.clone(),
            status: PaymentStatus::Created,
            transaction: None,
        })
    }

    async fn submit_payment(&self, payment_id: &str) -> Result<Payment> {
        self.record(format!("submit:{}", payment_id));
        Ok(payment(payment_id, PaymentStatus::Approved))
    }

    async fn complete_payment(&self, payment_id: &str) -> Result<Payment> {
        self.record(format!("complete:{}", payment_id));
        Ok(payment(payment_id, PaymentStatus::Completed))
    }

    async fn cancel_payment(&self, payment_id: &str) -> Result<Payment> {
        self.record(format!("cancel:{}", payment_id));
        let mut cancelled = payment(payment_id, PaymentStatus::Cancelled);
        cancelled.transaction = None;
        Ok(cancelled)
    }

    async fn share(&self, content: &ShareContent) -> Result<()> {
        self.record(format!("share:{}", content.url));
        Ok(())
    }
}

// ==================== BACKEND ====================

pub struct FakeBackend {
    pub requests: Mutex<Vec<(String, Value)>>,
    pub payment_status: String,
    pub fail_status_lookup: bool,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Self::with_payment_status("completed")
    }

    pub fn with_payment_status(status: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            payment_status: status.to_string(),
            fail_status_lookup: false,
        })
    }

    pub fn failing_status_lookup() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            payment_status: "pending".to_string(),
            fail_status_lookup: true,
        })
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|(path, _)| path).collect()
    }

    fn record(&self, path: &str, body: Value) -> Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), body));
        Ok(json!({ "success": true }))
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn sign_in(&self, request: &SignInRequest) -> Result<Value> {
        self.record("/api/auth/signin", serde_json::to_value(request)?)
    }

    async fn record_payment(&self, request: &PaymentRecordRequest) -> Result<Value> {
        self.record("/api/payments/create", serde_json::to_value(request)?)
    }

    async fn approve_payment(&self, request: &PaymentTxRequest) -> Result<Value> {
        self.record("/api/payments/approve", serde_json::to_value(request)?)
    }

    async fn complete_payment(&self, request: &PaymentTxRequest) -> Result<Value> {
        self.record("/api/payments/complete", serde_json::to_value(request)?)
    }

    async fn cancel_payment(&self, request: &CancelPaymentRequest) -> Result<Value> {
        self.record("/api/payments/cancel", serde_json::to_value(request)?)
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatusResponse> {
        self.record(&format!("/api/payments/status/{}", payment_id), Value::Null)?;
        if self.fail_status_lookup {
            return Err(PlatformError::Backend {
                status: 500,
                body: "status lookup failed".to_string(),
            });
        }
        Ok(serde_json::from_value(json!({ "status": self.payment_status }))?)
    }

    async fn create_order(&self, order: &Value) -> Result<Value> {
        self.record("/api/orders/create", order.clone())
    }

    async fn order_status(&self, order_id: &str) -> Result<Value> {
        self.record(&format!("/api/orders/status/{}", order_id), Value::Null)
    }

    async fn user_profile(&self) -> Result<Value> {
        self.record("/api/user/profile", Value::Null)
    }

    async fn update_user_profile(&self, profile: &Value) -> Result<Value> {
        self.record("PUT /api/user/profile", profile.clone())
    }

    async fn transaction_history(&self) -> Result<Value> {
        self.record("/api/transactions/history", Value::Null)
    }

    async fn delivery_history(&self) -> Result<Vec<Delivery>> {
        self.record("/api/deliveries/history", Value::Null)?;
        Ok(Vec::new())
    }

    async fn accept_delivery(
        &self,
        delivery_id: &str,
        request: &AcceptDeliveryRequest,
    ) -> Result<Delivery> {
        self.record(
            &format!("/api/deliveries/{}/accept", delivery_id),
            serde_json::to_value(request)?,
        )?;
        Err(PlatformError::Backend {
            status: 404,
            body: "no such delivery".to_string(),
        })
    }

    async fn complete_delivery(
        &self,
        delivery_id: &str,
        request: &CompleteDeliveryRequest,
    ) -> Result<Delivery> {
        self.record(
            &format!("/api/deliveries/{}/complete", delivery_id),
            serde_json::to_value(request)?,
        )?;
        Err(PlatformError::Backend {
            status: 404,
            body: "no such delivery".to_string(),
        })
    }
}
