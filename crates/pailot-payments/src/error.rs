// ============================================================================
// PAILOT-PAYMENTS - Error Types
// ============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    // ==================== Key Errors ====================
    #[error("Invalid account id: {0}")]
    InvalidAccountId(String),

    #[error("User public key not provided")]
    MissingPublicKey,

    // ==================== Account Errors ====================
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // ==================== Transaction Errors ====================
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Transaction rejected: {reason}")]
    TransactionRejected { reason: String },

    #[error("Transaction timeout")]
    TransactionTimeout,

    #[error("XDR error: {0}")]
    Xdr(String),

    // ==================== Network Errors ====================
    #[error("Horizon API error: {0}")]
    HorizonError(String),

    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    // ==================== Asset Errors ====================
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    // ==================== Configuration Errors ====================
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ==================== Internal Errors ====================
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PaymentError {
    /// Whether the ledger reported that the account does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, PaymentError::AccountNotFound(_))
    }
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::SerializationError(err.to_string())
    }
}

impl From<stellar_xdr::curr::Error> for PaymentError {
    fn from(err: stellar_xdr::curr::Error) -> Self {
        PaymentError::Xdr(err.to_string())
    }
}

impl From<base64::DecodeError> for PaymentError {
    fn from(err: base64::DecodeError) -> Self {
        PaymentError::Xdr(format!("invalid base64: {}", err))
    }
}
