//! Pi Platform API client
//!
//! A [`WalletSdk`] over the Pi Platform server REST API. The user's access
//! token (obtained by the Pi Browser) identifies the user; the app's server
//! API key authorises payment calls.
//!
//! The native share sheet only exists inside the Pi Browser, so `share`
//! reports [`PlatformError::Unsupported`].

use crate::error::PlatformError;
use crate::models::{
    AuthResult, LedgerTransaction, Payment, PaymentData, PaymentStatus, Scope, ShareContent, User,
};
use crate::sdk::WalletSdk;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Production Pi Platform API
pub const DEFAULT_PLATFORM_URL: &str = "https://api.minepi.com";

// ==================== WIRE TYPES ====================

#[derive(Debug, Deserialize)]
struct MeResponse {
    uid: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    credentials: Option<Credentials>,
}

#[derive(Debug, Deserialize)]
struct Credentials {
    #[serde(default)]
    scopes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PiPaymentStatus {
    #[serde(default)]
    developer_approved: bool,
    #[serde(default)]
    transaction_verified: bool,
    #[serde(default)]
    developer_completed: bool,
    #[serde(default)]
    cancelled: bool,
    #[serde(default)]
    user_cancelled: bool,
}

#[derive(Debug, Deserialize)]
struct PiPayment {
    identifier: String,
    amount: serde_json::Number,
    #[serde(default)]
    memo: String,
    #[serde(default)]
    metadata: serde_json::Value,
    #[serde(default)]
    status: PiPaymentStatus,
    #[serde(default)]
    transaction: Option<LedgerTransaction>,
}

impl From<PiPayment> for Payment {
    fn from(p: PiPayment) -> Self {
        let status = if p.status.cancelled || p.status.user_cancelled {
            PaymentStatus::Cancelled
        } else if p.status.developer_completed {
            PaymentStatus::Completed
        } else if p.status.developer_approved {
            PaymentStatus::Approved
        } else {
            PaymentStatus::Created
        };

        let transaction = p.transaction.map(|mut tx| {
            tx.verified = tx.verified || p.status.transaction_verified;
            tx
        });

        Payment {
            identifier: p.identifier,
            amount: p.amount.to_string(),
            memo: p.memo,
            metadata: p.metadata,
            status,
            transaction,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreatePaymentBody<'a> {
    payment: CreatePaymentFields<'a>,
}

#[derive(Debug, Serialize)]
struct CreatePaymentFields<'a> {
    amount: f64,
    memo: &'a str,
    metadata: &'a serde_json::Value,
    uid: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletePaymentBody<'a> {
    txid: &'a str,
}

#[derive(Debug, Deserialize)]
struct IncompletePayments {
    #[serde(default)]
    incomplete_server_payments: Vec<PiPayment>,
}

fn parse_scope(scope: &str) -> Option<Scope> {
    match scope {
        "payments" => Some(Scope::Payments),
        "username" => Some(Scope::Username),
        "wallet_address" => Some(Scope::WalletAddress),
        _ => None,
    }
}

// ==================== CLIENT ====================

pub struct PiPlatformClient {
    http: Client,
    base_url: String,
    access_token: String,
    api_key: Option<String>,
    wallet_address: Option<String>,
    uid: OnceLock<String>,
}

impl PiPlatformClient {
    /// Create a client for the user identified by `access_token`
    pub fn new(base_url: Option<&str>, access_token: &str) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(PlatformError::Config("Pi access token is empty".to_string()));
        }

        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            http,
            base_url: base_url
                .unwrap_or(DEFAULT_PLATFORM_URL)
                .trim_end_matches('/')
                .to_string(),
            access_token: access_token.to_string(),
            api_key: None,
            wallet_address: None,
            uid: OnceLock::new(),
        })
    }

    /// Server API key, required for payment calls
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Wallet address to report for the user; `/v2/me` does not return it
    pub fn with_wallet_address(mut self, address: Option<String>) -> Self {
        self.wallet_address = address;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn server_auth(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            PlatformError::Config("Pi server API key not configured".to_string())
        })?;
        Ok(request.header("Authorization", format!("Key {}", key)))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::Sdk(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        Ok(response.json().await?)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PiPayment> {
        let url = self.url(&format!("/v2/payments/{}", payment_id));
        let request = self.server_auth(self.http.get(url))?;
        self.send(request).await
    }

    async fn payment_action(&self, payment_id: &str, action: &str) -> Result<Payment> {
        debug!("Pi payment {}: {}", payment_id, action);
        let url = self.url(&format!("/v2/payments/{}/{}", payment_id, action));
        let request = self.server_auth(self.http.post(url))?;
        let payment: PiPayment = self.send(request).await?;
        Ok(payment.into())
    }

    /// The first unfinished server payment, if any
    async fn incomplete_payment(&self) -> Result<Option<Payment>> {
        if self.api_key.is_none() {
            return Ok(None);
        }

        let request = self.server_auth(
            self.http
                .get(self.url("/v2/payments/incomplete_server_payments")),
        )?;
        let incomplete: IncompletePayments = self.send(request).await?;
        Ok(incomplete
            .incomplete_server_payments
            .into_iter()
            .next()
            .map(Payment::from))
    }
}

#[async_trait]
impl WalletSdk for PiPlatformClient {
    async fn authenticate(&self, scopes: &[Scope]) -> Result<AuthResult> {
        let request = self
            .http
            .get(self.url("/v2/me"))
            .bearer_auth(&self.access_token);
        let me: MeResponse = self.send(request).await?;

        let granted: Vec<Scope> = match &me.credentials {
            Some(credentials) => credentials
                .scopes
                .iter()
                .filter_map(|s| parse_scope(s))
                .collect(),
            None => scopes.to_vec(),
        };

        let _ = self.uid.set(me.uid.clone());
        info!("Pi user authenticated: {}", me.uid);

        let wallet_address = if granted.contains(&Scope::WalletAddress) {
            self.wallet_address.clone()
        } else {
            None
        };

        let incomplete_payment = match self.incomplete_payment().await {
            Ok(payment) => payment,
            Err(e) => {
                warn!("Incomplete payment lookup failed: {}", e);
                None
            }
        };

        Ok(AuthResult {
            access_token: self.access_token.clone(),
            user: User {
                uid: me.uid,
                username: me.username,
                wallet_address,
            },
            scopes: granted,
            incomplete_payment,
        })
    }

    async fn create_payment(&self, data: &PaymentData) -> Result<Payment> {
        let uid = self.uid.get().ok_or(PlatformError::NotSignedIn)?;
        let amount: f64 = data.amount.parse().map_err(|_| {
            PlatformError::Sdk(format!("invalid payment amount: {:?}", data.amount))
        })?;

        let body = CreatePaymentBody {
            payment: CreatePaymentFields {
                amount,
                memo: &data.memo,
                metadata: &data.metadata,
                uid,
            },
        };

        let request = self.server_auth(self.http.post(self.url("/v2/payments")).json(&body))?;
        let payment: PiPayment = self.send(request).await?;
        Ok(payment.into())
    }

    async fn submit_payment(&self, payment_id: &str) -> Result<Payment> {
        self.payment_action(payment_id, "approve").await
    }

    async fn complete_payment(&self, payment_id: &str) -> Result<Payment> {
        let payment = self.get_payment(payment_id).await?;
        let txid = payment
            .transaction
            .as_ref()
            .map(|tx| tx.txid.clone())
            .ok_or_else(|| {
                PlatformError::Sdk(format!(
                    "payment {} has no ledger transaction to complete",
                    payment_id
                ))
            })?;

        let url = self.url(&format!("/v2/payments/{}/complete", payment_id));
        let body = CompletePaymentBody { txid: &txid };
        let request = self.server_auth(self.http.post(url).json(&body))?;
        let completed: PiPayment = self.send(request).await?;
        Ok(completed.into())
    }

    async fn cancel_payment(&self, payment_id: &str) -> Result<Payment> {
        self.payment_action(payment_id, "cancel").await
    }

    async fn share(&self, _content: &ShareContent) -> Result<()> {
        Err(PlatformError::Unsupported(
            "native share is only available inside the Pi Browser".to_string(),
        ))
    }
}
