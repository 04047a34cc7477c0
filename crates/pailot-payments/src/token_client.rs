// ============================================================================
// PAILOT-PAYMENTS - Token Client
// ============================================================================
// High-level client for PAILOT token operations.
// This is the API the application and the per-user wallet use.
//
// Features:
// - Trustline setup for new token holders
// - Mint (issuer -> user), transfer (user -> user), burn (user -> issuer)
// - Balance and history queries
// - Submission of transactions signed in the user's wallet
// ============================================================================

use crate::config::LedgerConfig;
use crate::error::PaymentError;
use crate::horizon::{LedgerServer, PaymentRecord, TransactionResponse};
use crate::transaction::{decode_envelope, TransactionBuilder, UnsignedTransaction};
use crate::Result;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Log a failed ledger operation and hand the error back unchanged
fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("Error {}: {}", operation, e);
    }
    result
}

// ============================================================================
// TOKEN CLIENT
// ============================================================================

/// Ledger client bound to one token (code + issuer)
#[derive(Clone)]
pub struct TokenClient {
    config: LedgerConfig,
    server: Arc<dyn LedgerServer>,
}

impl TokenClient {
    /// Create a client; rejects an invalid token configuration
    pub fn new(config: LedgerConfig, server: Arc<dyn LedgerServer>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, server })
    }

    /// Get configuration
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn issuer(&self) -> &str {
        &self.config.token_issuer
    }

    /// Network base fee, or the configured one when the network has none
    async fn base_fee(&self) -> u32 {
        match self.server.fetch_base_fee().await {
            Ok(fee) => fee,
            Err(e) => {
                warn!(
                    "Base fee unavailable ({}), using {} stroops",
                    e, self.config.base_fee
                );
                self.config.base_fee
            }
        }
    }

    async fn build_payment(
        &self,
        source: &str,
        destination: &str,
        amount: &str,
    ) -> Result<UnsignedTransaction> {
        let account = self.server.load_account(source).await?;
        let fee = self.base_fee().await;

        TransactionBuilder::new(&self.config, &account)?
            .fee(fee)
            .timeout(self.config.tx_timeout_secs)
            .payment(destination, amount)
            .build()
    }

    // ==================== Account Setup ====================

    /// Build the trustline transaction a user signs to hold the token
    pub async fn initialize_token_account(&self, user: &str) -> Result<UnsignedTransaction> {
        let result = async {
            let account = self.server.load_account(user).await?;
            let fee = self.base_fee().await;

            TransactionBuilder::new(&self.config, &account)?
                .fee(fee)
                .timeout(self.config.tx_timeout_secs)
                .change_trust(&self.config.trust_limit)
                .build()
        }
        .await;

        if let Ok(tx) = &result {
            debug!("Trustline transaction built for {}: {}", user, tx.hash);
        }
        logged("initializing token account", result)
    }

    /// Whether `public_key` exists and trusts the token
    pub async fn is_account_setup(&self, public_key: &str) -> Result<bool> {
        let result = match self.server.load_account(public_key).await {
            Ok(account) => Ok(account.has_trustline(&self.config.token_code, self.issuer())),
            Err(PaymentError::AccountNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        };
        logged("checking account setup", result)
    }

    // ==================== Token Movements ====================

    /// Payment from the issuer to `destination`
    pub async fn mint_tokens(
        &self,
        destination: &str,
        amount: impl Display,
    ) -> Result<UnsignedTransaction> {
        let amount = amount.to_string();
        let result = self.build_payment(self.issuer(), destination, &amount).await;

        if result.is_ok() {
            info!("Mint built: {} {} -> {}", amount, self.config.token_code, destination);
        }
        logged("minting tokens", result)
    }

    /// Payment from `sender` to `recipient`
    pub async fn transfer_tokens(
        &self,
        sender: &str,
        recipient: &str,
        amount: impl Display,
    ) -> Result<UnsignedTransaction> {
        let amount = amount.to_string();
        let result = self.build_payment(sender, recipient, &amount).await;

        if result.is_ok() {
            info!(
                "Transfer built: {} {} {} -> {}",
                amount, self.config.token_code, sender, recipient
            );
        }
        logged("transferring tokens", result)
    }

    /// Payment from `holder` back to the issuer
    pub async fn burn_tokens(
        &self,
        holder: &str,
        amount: impl Display,
    ) -> Result<UnsignedTransaction> {
        let amount = amount.to_string();
        let result = self.build_payment(holder, self.issuer(), &amount).await;

        if result.is_ok() {
            info!("Burn built: {} {} from {}", amount, self.config.token_code, holder);
        }
        logged("burning tokens", result)
    }

    // ==================== Queries ====================

    /// Token balance of `public_key`, "0" without a trustline
    pub async fn get_token_balance(&self, public_key: &str) -> Result<String> {
        let result = self.server.load_account(public_key).await.map(|account| {
            account
                .asset_balance(&self.config.token_code, self.issuer())
                .unwrap_or_else(|| "0".to_string())
        });
        logged("getting token balance", result)
    }

    /// Token payments involving `public_key`, newest first
    pub async fn get_token_history(&self, public_key: &str) -> Result<Vec<PaymentRecord>> {
        let result = self
            .server
            .payments_for_account(public_key)
            .await
            .map(|records| {
                records
                    .into_iter()
                    .filter(|r| r.is_asset(&self.config.token_code, self.issuer()))
                    .collect()
            });
        logged("getting token history", result)
    }

    // ==================== Submission ====================

    /// Submit a wallet-signed envelope
    pub async fn submit_transaction(&self, signed_xdr: &str) -> Result<TransactionResponse> {
        let result = async {
            decode_envelope(signed_xdr)?;
            self.server.submit_transaction(signed_xdr.trim()).await
        }
        .await;

        if let Ok(response) = &result {
            info!(
                "Transaction submitted: {} ({})",
                response.hash,
                self.config.explorer_tx_url(&response.hash)
            );
        }
        logged("submitting transaction", result)
    }
}
