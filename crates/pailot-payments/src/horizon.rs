// ============================================================================
// PAILOT-PAYMENTS - Horizon API Client
// ============================================================================
// HTTP client for the Pi network's Horizon-compatible API.
// Handles account queries, fee stats, payment history and submission.
// ============================================================================

use crate::config::LedgerConfig;
use crate::error::PaymentError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Page size used for payment history queries
pub const HISTORY_PAGE_LIMIT: u32 = 50;

// ============================================================================
// DATA TYPES
// ============================================================================

/// Account balance information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    /// Asset type: "native" for Pi, "credit_alphanum4" or "credit_alphanum12" for tokens
    pub asset_type: String,

    /// Asset code (empty for native Pi)
    #[serde(default)]
    pub asset_code: String,

    /// Asset issuer (empty for native Pi)
    #[serde(default)]
    pub asset_issuer: String,

    /// Balance amount as decimal string
    pub balance: String,

    /// Trustline limit (for non-native assets)
    #[serde(default)]
    pub limit: Option<String>,
}

impl Balance {
    pub fn is_native(&self) -> bool {
        self.asset_type == "native"
    }

    /// Exact code and issuer match
    pub fn matches_asset(&self, code: &str, issuer: &str) -> bool {
        self.asset_code == code && self.asset_issuer == issuer
    }
}

/// Ledger account information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Account public key (G... address)
    pub id: String,

    /// Current sequence number
    pub sequence: String,

    /// Account balances
    #[serde(default)]
    pub balances: Vec<Balance>,

    #[serde(default)]
    pub subentry_count: u32,
}

impl AccountInfo {
    /// Balance string for a specific asset, if the account trusts it
    pub fn asset_balance(&self, code: &str, issuer: &str) -> Option<String> {
        self.balances
            .iter()
            .find(|b| b.matches_asset(code, issuer))
            .map(|b| b.balance.clone())
    }

    /// Check if account has trustline for asset
    pub fn has_trustline(&self, code: &str, issuer: &str) -> bool {
        self.balances.iter().any(|b| b.matches_asset(code, issuer))
    }

    /// Parsed sequence number
    pub fn sequence_number(&self) -> Result<i64> {
        self.sequence.parse().map_err(|_| {
            PaymentError::HorizonError(format!(
                "invalid sequence number for {}: {:?}",
                self.id, self.sequence
            ))
        })
    }
}

/// Transaction joined onto a payment record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinedTransaction {
    #[serde(default)]
    pub hash: String,

    #[serde(default)]
    pub memo: Option<String>,

    #[serde(default)]
    pub memo_type: Option<String>,

    #[serde(default)]
    pub successful: bool,

    #[serde(default)]
    pub created_at: String,
}

/// Payment-type operation record for an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,

    /// Operation type ("payment", "create_account", ...)
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub transaction_hash: String,

    #[serde(default)]
    pub asset_type: Option<String>,

    #[serde(default)]
    pub asset_code: Option<String>,

    #[serde(default)]
    pub asset_issuer: Option<String>,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub amount: Option<String>,

    /// Present when the query joins transactions
    #[serde(default)]
    pub transaction: Option<JoinedTransaction>,
}

impl PaymentRecord {
    /// Exact code and issuer match
    pub fn is_asset(&self, code: &str, issuer: &str) -> bool {
        self.asset_code.as_deref() == Some(code) && self.asset_issuer.as_deref() == Some(issuer)
    }
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(rename = "_embedded")]
    embedded: Embedded<T>,
}

#[derive(Debug, Deserialize)]
struct Embedded<T> {
    records: Vec<T>,
}

/// Transaction submission result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub hash: String,

    #[serde(default)]
    pub ledger: u64,

    #[serde(default)]
    pub envelope_xdr: String,

    #[serde(default)]
    pub result_xdr: String,

    #[serde(default)]
    pub fee_charged: Option<String>,

    #[serde(default = "default_true")]
    pub successful: bool,
}

fn default_true() -> bool {
    true
}

/// Horizon error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonErrorResponse {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub title: Option<String>,
    pub status: Option<u16>,
    pub detail: Option<String>,
    pub extras: Option<HorizonErrorExtras>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonErrorExtras {
    pub envelope_xdr: Option<String>,
    pub result_codes: Option<ResultCodes>,
    pub result_xdr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultCodes {
    pub transaction: Option<String>,
    pub operations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStats {
    #[serde(default)]
    pub last_ledger: String,
    pub last_ledger_base_fee: String,
}

impl FeeStats {
    pub fn base_fee(&self) -> Result<u32> {
        self.last_ledger_base_fee.parse().map_err(|_| {
            PaymentError::HorizonError(format!(
                "invalid base fee: {:?}",
                self.last_ledger_base_fee
            ))
        })
    }
}

// ============================================================================
// LEDGER SERVER TRAIT
// ============================================================================

/// The network operations the token client needs from a ledger server
#[async_trait]
pub trait LedgerServer: Send + Sync {
    /// Load an account; `AccountNotFound` when it does not exist
    async fn load_account(&self, address: &str) -> Result<AccountInfo>;

    /// Current network base fee in stroops
    async fn fetch_base_fee(&self) -> Result<u32>;

    /// Payment-type operations for an account, with their transactions joined
    async fn payments_for_account(&self, address: &str) -> Result<Vec<PaymentRecord>>;

    /// Submit a signed, base64 encoded transaction envelope
    async fn submit_transaction(&self, envelope_xdr: &str) -> Result<TransactionResponse>;
}

/// Map a non-success HTTP status to a payment error
pub fn error_for_status(status: u16, body: &str, address: Option<&str>) -> PaymentError {
    match status {
        404 => PaymentError::AccountNotFound(address.unwrap_or("unknown").to_string()),
        429 => PaymentError::RateLimited,
        504 => PaymentError::TransactionTimeout,
        400 => {
            let reason = serde_json::from_str::<HorizonErrorResponse>(body)
                .ok()
                .map(|error| {
                    let detail = error.detail.clone().unwrap_or_default();
                    error
                        .extras
                        .and_then(|e| e.result_codes)
                        .map(|rc| format!("tx: {:?}, ops: {:?}", rc.transaction, rc.operations))
                        .unwrap_or(detail)
                })
                .unwrap_or_else(|| body.to_string());
            PaymentError::TransactionRejected { reason }
        }
        status => PaymentError::HorizonError(format!("HTTP {}: {}", status, body)),
    }
}

// ============================================================================
// HORIZON CLIENT
// ============================================================================

/// Client for the Horizon API
pub struct HorizonClient {
    horizon_url: String,
    http: Client,
}

impl HorizonClient {
    /// Create new Horizon client for a ledger configuration
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            horizon_url: config.horizon_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn horizon_url(&self) -> &str {
        &self.horizon_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        address: Option<&str>,
    ) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();

        if status == 200 {
            Ok(response.json().await?)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error_for_status(status, &error_text, address))
        }
    }
}

#[async_trait]
impl LedgerServer for HorizonClient {
    async fn load_account(&self, address: &str) -> Result<AccountInfo> {
        let url = format!("{}/accounts/{}", self.horizon_url, address);

        debug!("Loading account: {}", address);

        self.get_json(&url, Some(address)).await
    }

    async fn fetch_base_fee(&self) -> Result<u32> {
        let url = format!("{}/fee_stats", self.horizon_url);
        let stats: FeeStats = self.get_json(&url, None).await?;
        stats.base_fee()
    }

    async fn payments_for_account(&self, address: &str) -> Result<Vec<PaymentRecord>> {
        let url = format!(
            "{}/accounts/{}/payments?join=transactions&order=desc&limit={}",
            self.horizon_url, address, HISTORY_PAGE_LIMIT
        );

        debug!("Fetching payments for: {}", address);

        let page: Page<PaymentRecord> = self.get_json(&url, Some(address)).await?;
        Ok(page.embedded.records)
    }

    async fn submit_transaction(&self, envelope_xdr: &str) -> Result<TransactionResponse> {
        let url = format!("{}/transactions", self.horizon_url);

        debug!("Submitting transaction...");

        let response = self
            .http
            .post(&url)
            .form(&[("tx", envelope_xdr)])
            .send()
            .await?;

        let status = response.status().as_u16();
        if status == 200 {
            let tx_response: TransactionResponse = response.json().await?;
            debug!("Transaction successful: {}", tx_response.hash);
            return Ok(tx_response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let error = error_for_status(status, &error_text, None);
        if let PaymentError::TransactionRejected { reason } = &error {
            warn!("Transaction rejected: {}", reason);
        }
        Err(error)
    }
}
