//! Platform session
//!
//! Owns the signed-in session and routes every wallet action through the
//! SDK first, then mirrors the result to the backend. Failures are logged
//! and returned unchanged; nothing is retried and nothing is rolled back.

use crate::backend::{BackendApi, CancelPaymentRequest, PaymentTxRequest};
use crate::error::PlatformError;
use crate::models::{
    AuthResult, Payment, PaymentData, PaymentRecordRequest, PaymentStatusResponse, Scope,
    Session, ShareContent, SignInRequest,
};
use crate::sdk::WalletSdk;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Log a failed platform operation and hand the error back unchanged
fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("{} error: {}", operation, e);
    }
    result
}

pub struct PlatformSession {
    sdk: Option<Arc<dyn WalletSdk>>,
    backend: Arc<dyn BackendApi>,
    session: Option<Session>,
}

impl PlatformSession {
    /// `sdk` is `None` when no wallet is available in this environment
    pub fn new(sdk: Option<Arc<dyn WalletSdk>>, backend: Arc<dyn BackendApi>) -> Self {
        Self {
            sdk,
            backend,
            session: None,
        }
    }

    fn sdk(&self) -> Result<&Arc<dyn WalletSdk>> {
        self.sdk.as_ref().ok_or(PlatformError::SdkUnavailable)
    }

    pub fn backend(&self) -> &Arc<dyn BackendApi> {
        &self.backend
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    // ==================== Authentication ====================

    /// Authenticate with the wallet and register the user with the backend
    pub async fn sign_in(&mut self) -> Result<AuthResult> {
        let result = async {
            let sdk = self.sdk()?.clone();
            let auth = sdk.authenticate(&Scope::SIGN_IN).await?;
            self.backend.sign_in(&SignInRequest::from(&auth)).await?;
            Ok::<_, PlatformError>(auth)
        }
        .await;
        let auth = logged("Pi Authentication", result)?;

        self.session = Some(Session::from_auth(&auth));
        info!("Signed in as {}", auth.user.uid);

        if let Some(payment) = &auth.incomplete_payment {
            if let Err(e) = self.on_incomplete_payment(payment).await {
                warn!(
                    "Incomplete payment {} not reconciled: {}",
                    payment.identifier, e
                );
            }
        }

        Ok(auth)
    }

    /// Drop the in-memory session
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Signed out {}", session.user.uid);
        }
    }

    // ==================== Payment Flow ====================

    pub async fn create_payment(&self, data: &PaymentData) -> Result<Payment> {
        let result = async {
            let payment = self.sdk()?.create_payment(data).await?;

            self.backend
                .record_payment(&PaymentRecordRequest {
                    payment_id: payment.identifier.clone(),
                    amount: data.amount.clone(),
                    memo: data.memo.clone(),
                    metadata: data.metadata.clone(),
                })
                .await?;

            Ok::<_, PlatformError>(payment)
        }
        .await;
        logged("Payment creation", result)
    }

    pub async fn submit_payment(&self, payment_id: &str) -> Result<Payment> {
        let result = async {
            let payment = self.sdk()?.submit_payment(payment_id).await?;

            self.backend
                .approve_payment(&PaymentTxRequest {
                    payment_id: payment_id.to_string(),
                    txid: payment.txid().map(str::to_string),
                })
                .await?;

            Ok::<_, PlatformError>(payment)
        }
        .await;
        logged("Payment submission", result)
    }

    pub async fn complete_payment(&self, payment_id: &str) -> Result<Payment> {
        let result = async {
            let payment = self.sdk()?.complete_payment(payment_id).await?;

            self.backend
                .complete_payment(&PaymentTxRequest {
                    payment_id: payment_id.to_string(),
                    txid: payment.txid().map(str::to_string),
                })
                .await?;

            Ok::<_, PlatformError>(payment)
        }
        .await;
        logged("Payment completion", result)
    }

    pub async fn cancel_payment(&self, payment_id: &str) -> Result<Payment> {
        let result = async {
            let payment = self.sdk()?.cancel_payment(payment_id).await?;

            self.backend
                .cancel_payment(&CancelPaymentRequest {
                    payment_id: payment_id.to_string(),
                })
                .await?;

            Ok::<_, PlatformError>(payment)
        }
        .await;
        logged("Payment cancellation", result)
    }

    /// Complete a payment left unfinished, if the backend still has it pending
    pub async fn on_incomplete_payment(&self, payment: &Payment) -> Result<Option<Payment>> {
        let result = async {
            let status = self.backend.payment_status(&payment.identifier).await?;

            if status.is_pending() {
                info!("Completing pending payment {}", payment.identifier);
                self.complete_payment(&payment.identifier).await.map(Some)
            } else {
                Ok(None)
            }
        }
        .await;
        logged("Incomplete payment handling", result)
    }

    // ==================== Backend Pass-throughs ====================

    pub async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatusResponse> {
        logged(
            "Payment status fetch",
            self.backend.payment_status(payment_id).await,
        )
    }

    pub async fn create_order(&self, order: &Value) -> Result<Value> {
        logged("Order creation", self.backend.create_order(order).await)
    }

    pub async fn order_status(&self, order_id: &str) -> Result<Value> {
        logged("Order status fetch", self.backend.order_status(order_id).await)
    }

    pub async fn user_profile(&self) -> Result<Value> {
        logged("Profile fetch", self.backend.user_profile().await)
    }

    pub async fn update_user_profile(&self, profile: &Value) -> Result<Value> {
        logged("Profile update", self.backend.update_user_profile(profile).await)
    }

    pub async fn transaction_history(&self) -> Result<Value> {
        logged(
            "Transaction history fetch",
            self.backend.transaction_history().await,
        )
    }

    // ==================== Platform Utilities ====================

    pub async fn share_content(&self, content: &ShareContent) -> Result<()> {
        let result = async { self.sdk()?.share(content).await }.await;
        logged("Content sharing", result)
    }
}
