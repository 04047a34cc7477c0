//! Wallet SDK seam
//!
//! The wallet SDK authenticates the user, drives payments through their
//! lifecycle and opens the native share sheet. The session only talks to it
//! through this trait, so production clients and test doubles plug in alike.

use crate::models::{AuthResult, Payment, PaymentData, Scope, ShareContent};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait WalletSdk: Send + Sync {
    /// Authenticate the user, requesting `scopes`
    async fn authenticate(&self, scopes: &[Scope]) -> Result<AuthResult>;

    async fn create_payment(&self, data: &PaymentData) -> Result<Payment>;

    /// Approve a created payment for submission to the ledger
    async fn submit_payment(&self, payment_id: &str) -> Result<Payment>;

    async fn complete_payment(&self, payment_id: &str) -> Result<Payment>;

    async fn cancel_payment(&self, payment_id: &str) -> Result<Payment>;

    async fn share(&self, content: &ShareContent) -> Result<()>;
}
