// ============================================================================
// PAILOT-PAYMENTS - Token Wallet
// ============================================================================
// Per-user token state: the signed-in user's public key, the last known
// balance and the token history. Owned by the caller and mutated through
// `&mut self`, one wallet per signed-in user.
// ============================================================================

use crate::error::PaymentError;
use crate::horizon::{PaymentRecord, TransactionResponse};
use crate::token_client::TokenClient;
use crate::transaction::UnsignedTransaction;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// Outcome of opening a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WalletSetup {
    /// The account does not trust the token yet; sign and submit this first
    NeedsTrustline { transaction: UnsignedTransaction },

    /// Balance and history are loaded
    Ready,
}

pub struct TokenWallet {
    client: TokenClient,
    public_key: Option<String>,
    balance: String,
    history: Vec<PaymentRecord>,
}

impl TokenWallet {
    pub fn new(client: TokenClient, public_key: Option<String>) -> Self {
        Self {
            client,
            public_key: public_key.filter(|pk| !pk.trim().is_empty()),
            balance: "0".to_string(),
            history: Vec::new(),
        }
    }

    fn public_key(&self) -> Result<String> {
        self.public_key.clone().ok_or(PaymentError::MissingPublicKey)
    }

    pub fn client(&self) -> &TokenClient {
        &self.client
    }

    /// Last fetched balance
    pub fn balance(&self) -> &str {
        &self.balance
    }

    /// Last fetched token history
    pub fn history(&self) -> &[PaymentRecord] {
        &self.history
    }

    /// Check setup, then either hand back the trustline transaction or load state
    pub async fn open(&mut self) -> Result<WalletSetup> {
        let public_key = self.public_key()?;

        if !self.client.is_account_setup(&public_key).await? {
            let transaction = self.client.initialize_token_account(&public_key).await?;
            return Ok(WalletSetup::NeedsTrustline { transaction });
        }

        let (balance, history) = tokio::try_join!(
            self.client.get_token_balance(&public_key),
            self.client.get_token_history(&public_key),
        )?;

        debug!("Wallet opened for {}: {} tokens", public_key, balance);
        self.balance = balance;
        self.history = history;
        Ok(WalletSetup::Ready)
    }

    pub async fn refresh_balance(&mut self) -> Result<&str> {
        let public_key = self.public_key()?;
        self.balance = self.client.get_token_balance(&public_key).await?;
        Ok(&self.balance)
    }

    pub async fn refresh_history(&mut self) -> Result<&[PaymentRecord]> {
        let public_key = self.public_key()?;
        self.history = self.client.get_token_history(&public_key).await?;
        Ok(&self.history)
    }

    /// Mint `amount` to this wallet's user
    pub async fn mint_reward(&mut self, amount: impl Display) -> Result<UnsignedTransaction> {
        let public_key = self.public_key()?;
        let tx = self.client.mint_tokens(&public_key, amount).await?;
        self.refresh_balance().await?;
        Ok(tx)
    }

    /// Transfer `amount` from this wallet's user to `recipient`
    pub async fn transfer(
        &mut self,
        recipient: &str,
        amount: impl Display,
    ) -> Result<UnsignedTransaction> {
        let public_key = self.public_key()?;
        let tx = self
            .client
            .transfer_tokens(&public_key, recipient, amount)
            .await?;
        self.refresh_balance().await?;
        Ok(tx)
    }

    /// Return `amount` from this wallet's user to the issuer
    pub async fn burn(&mut self, amount: impl Display) -> Result<UnsignedTransaction> {
        let public_key = self.public_key()?;
        let tx = self.client.burn_tokens(&public_key, amount).await?;
        self.refresh_balance().await?;
        Ok(tx)
    }

    /// Submit a signed envelope, then reload balance and history
    pub async fn submit_signed(&mut self, signed_xdr: &str) -> Result<TransactionResponse> {
        let public_key = self.public_key()?;
        let response = self.client.submit_transaction(signed_xdr).await?;

        let (balance, history) = tokio::try_join!(
            self.client.get_token_balance(&public_key),
            self.client.get_token_history(&public_key),
        )?;
        self.balance = balance;
        self.history = history;

        Ok(response)
    }
}
