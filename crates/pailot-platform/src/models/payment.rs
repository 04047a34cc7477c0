//! Payment Models
//!
//! User-to-app Pi payments and the content shared through the wallet.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Input for a new payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    /// Amount in Pi, always a string on the wire
    pub amount: String,
    pub memo: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl PaymentData {
    pub fn new(amount: impl Display, memo: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            amount: amount.to_string(),
            memo: memo.into(),
            metadata,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Created,
    Approved,
    Completed,
    Cancelled,
}

/// Ledger transaction backing a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub txid: String,

    #[serde(default)]
    pub verified: bool,

    #[serde(default, rename = "_link", alias = "link")]
    pub link: String,
}

/// A payment as reported by the wallet SDK
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub identifier: String,
    pub amount: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction: Option<LedgerTransaction>,
}

impl Payment {
    pub fn txid(&self) -> Option<&str> {
        self.transaction.as_ref().map(|t| t.txid.as_str())
    }
}

/// Body of `POST /api/payments/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordRequest {
    pub payment_id: String,
    pub amount: String,
    pub memo: String,
    pub metadata: serde_json::Value,
}

/// Backend view of a payment (`GET /api/payments/status/:id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub status: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PaymentStatusResponse {
    /// Only a backend status of exactly "pending" needs completing
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

/// Content for the wallet's native share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareContent {
    pub title: String,
    pub text: String,
    pub url: String,
}
