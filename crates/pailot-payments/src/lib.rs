// ============================================================================
// PAILOT-PAYMENTS - Token Ledger Integration
// ============================================================================
// PAILOT reward token on the Pi (Stellar-protocol) ledger.
//
// Key insight: the ledger has no mint or burn primitive. A fixed issuer
// account is the origin of record: mint = payment from the issuer,
// burn = payment back to it.
//
// Features:
// - Build unsigned trustline / mint / transfer / burn transactions (XDR)
// - Query token balances and payment history
// - Submit transactions signed in the user's wallet
// - Per-user wallet state
//
// This crate never holds signing keys.
// ============================================================================

pub mod amount;
pub mod config;
pub mod error;
pub mod horizon;
pub mod strkey;
pub mod token_client;
pub mod transaction;
pub mod wallet;

pub use config::{LedgerConfig, Network, DEFAULT_TOKEN_CODE};
pub use error::PaymentError;
pub use horizon::{
    AccountInfo, Balance, HorizonClient, JoinedTransaction, LedgerServer, PaymentRecord,
    TransactionResponse,
};
pub use strkey::{decode_account_id, encode_account_id, is_valid_account_id};
pub use token_client::TokenClient;
pub use transaction::{
    decode_envelope, inspect_envelope, EnvelopeSummary, Operation, OperationSummary,
    TransactionBuilder, UnsignedTransaction,
};
pub use wallet::{TokenWallet, WalletSetup};

/// Re-export for convenience
pub type Result<T> = std::result::Result<T, PaymentError>;
