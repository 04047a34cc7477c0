// ============================================================================
// PAILOT-PAYMENTS - Configuration
// ============================================================================
// Network and asset configuration for the Pi mainnet and testnet ledgers.

use crate::error::PaymentError;
use crate::strkey::is_valid_account_id;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Default reward token code
pub const DEFAULT_TOKEN_CODE: &str = "PAILOT";

/// Trustline limit requested when a user opts in to the token
pub const DEFAULT_TRUST_LIMIT: &str = "1000000";

/// Client-side validity window of every built transaction
pub const DEFAULT_TX_TIMEOUT_SECS: u64 = 30;

/// Network selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Default for Network {
    fn default() -> Self {
        #[cfg(feature = "mainnet")]
        return Network::Mainnet;

        #[cfg(all(feature = "testnet", not(feature = "mainnet")))]
        return Network::Testnet;

        #[cfg(not(any(feature = "mainnet", feature = "testnet")))]
        return Network::Testnet;
    }
}

/// Ledger configuration for the PAILOT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Network (mainnet or testnet)
    pub network: Network,

    /// Horizon-style API URL
    pub horizon_url: String,

    /// Network passphrase scoping signatures
    pub network_passphrase: String,

    /// Token asset code
    pub token_code: String,

    /// Token issuer (G... address), the custodial account of record
    pub token_issuer: String,

    /// Fallback base fee in stroops when the network does not report one
    pub base_fee: u32,

    /// Trustline limit for new token accounts
    pub trust_limit: String,

    /// Transaction validity window in seconds
    pub tx_timeout_secs: u64,
}

impl LedgerConfig {
    /// Pi mainnet configuration
    pub fn mainnet(token_issuer: &str) -> Self {
        Self {
            network: Network::Mainnet,
            horizon_url: "https://api.mainnet.minepi.com".to_string(),
            network_passphrase: "Pi Network".to_string(),
            token_code: DEFAULT_TOKEN_CODE.to_string(),
            token_issuer: token_issuer.to_string(),
            base_fee: 100_000,
            trust_limit: DEFAULT_TRUST_LIMIT.to_string(),
            tx_timeout_secs: DEFAULT_TX_TIMEOUT_SECS,
        }
    }

    /// Pi testnet configuration
    pub fn testnet(token_issuer: &str) -> Self {
        Self {
            network: Network::Testnet,
            horizon_url: "https://api.testnet.minepi.com".to_string(),
            network_passphrase: "Pi Testnet".to_string(),
            token_code: DEFAULT_TOKEN_CODE.to_string(),
            token_issuer: token_issuer.to_string(),
            base_fee: 100_000,
            trust_limit: DEFAULT_TRUST_LIMIT.to_string(),
            tx_timeout_secs: DEFAULT_TX_TIMEOUT_SECS,
        }
    }

    /// Configuration for a network with the default settings
    pub fn for_network(network: Network, token_issuer: &str) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(token_issuer),
            Network::Testnet => Self::testnet(token_issuer),
        }
    }

    /// Override the token code
    pub fn with_token_code(mut self, code: &str) -> Self {
        self.token_code = code.to_string();
        self
    }

    /// Override the Horizon URL
    pub fn with_horizon_url(mut self, url: &str) -> Self {
        self.horizon_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Check if this is mainnet
    pub fn is_mainnet(&self) -> bool {
        self.network == Network::Mainnet
    }

    /// Reject configurations that cannot describe a token
    pub fn validate(&self) -> Result<()> {
        let code = &self.token_code;
        if code.is_empty() || code.len() > 12 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PaymentError::InvalidAsset(format!(
                "asset code must be 1-12 alphanumeric characters, got {:?}",
                code
            )));
        }

        if !is_valid_account_id(&self.token_issuer) {
            return Err(PaymentError::ConfigError(format!(
                "token issuer is not a valid account id: {:?}",
                self.token_issuer
            )));
        }

        if self.horizon_url.is_empty() {
            return Err(PaymentError::ConfigError("horizon URL is empty".to_string()));
        }

        Ok(())
    }

    /// Explorer URL for a transaction
    pub fn explorer_tx_url(&self, hash: &str) -> String {
        format!("{}/transactions/{}", self.horizon_url, hash)
    }
}
