//! Driver delivery flow
//!
//! Accepting and completing deliveries for a signed-in driver. Completing a
//! delivery runs payment, backend completion, reward minting and sharing in
//! order. Each step awaits the previous one; a failure stops the flow and
//! earlier steps stay as they are.

use crate::reward::calculate_reward;
use pailot_payments::{PaymentError, TokenClient, TokenWallet, UnsignedTransaction};
use pailot_platform::{
    AcceptDeliveryRequest, AuthResult, CompleteDeliveryRequest, Delivery, Payment, PaymentData,
    PlatformError, PlatformSession, ShareContent,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

pub const SHARE_TITLE: &str = "PailotPH Delivery";

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Driver is not signed in")]
    NotSignedIn,

    #[error("PAILOT_TOKEN_ISSUER is not set; rewards cannot be minted")]
    RewardsUnavailable,

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Ledger(#[from] PaymentError),
}

pub type Result<T> = std::result::Result<T, DriverError>;

/// Route of a delivery, as carried in payment metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub id: String,
    pub from: String,
    pub to: String,
}

impl From<&Delivery> for DeliveryDetails {
    fn from(delivery: &Delivery) -> Self {
        Self {
            id: delivery.id.clone(),
            from: delivery.pickup.clone(),
            to: delivery.dropoff.clone(),
        }
    }
}

/// Everything produced by completing a delivery
#[derive(Debug, Clone, Serialize)]
pub struct CompletedDelivery {
    pub delivery: Delivery,
    pub payment: Payment,
    pub reward: u32,

    /// Unsigned mint of the reward; the issuer signs and submits it
    pub reward_transaction: UnsignedTransaction,

    /// False when the wallet has no share sheet
    pub shared: bool,
}

pub struct DriverService {
    platform: PlatformSession,
    tokens: Option<TokenClient>,
    wallet: Option<TokenWallet>,
    fallback_wallet_address: Option<String>,
    app_url: String,
    deliveries: Vec<Delivery>,
    active: Option<Delivery>,
}

impl DriverService {
    /// `tokens` is `None` without a configured issuer; only completion needs it
    pub fn new(platform: PlatformSession, tokens: Option<TokenClient>, app_url: &str) -> Self {
        Self {
            platform,
            tokens,
            wallet: None,
            fallback_wallet_address: None,
            app_url: app_url.trim_end_matches('/').to_string(),
            deliveries: Vec::new(),
            active: None,
        }
    }

    /// Wallet address to use when sign-in does not report one
    pub fn with_wallet_address(mut self, address: Option<String>) -> Self {
        self.fallback_wallet_address = address;
        self
    }

    pub fn platform(&self) -> &PlatformSession {
        &self.platform
    }

    pub fn wallet(&self) -> Option<&TokenWallet> {
        self.wallet.as_ref()
    }

    pub fn active_delivery(&self) -> Option<&Delivery> {
        self.active.as_ref()
    }

    /// Sign in and open the driver's token wallet
    pub async fn sign_in(&mut self) -> Result<AuthResult> {
        let auth = self.platform.sign_in().await?;

        let public_key = auth
            .user
            .wallet_address
            .clone()
            .or_else(|| self.fallback_wallet_address.clone());
        self.wallet = self
            .tokens
            .clone()
            .map(|tokens| TokenWallet::new(tokens, public_key));

        Ok(auth)
    }

    fn driver_id(&self) -> Result<String> {
        self.platform
            .current_session()
            .map(|s| s.user.uid.clone())
            .ok_or(DriverError::NotSignedIn)
    }

    fn wallet_mut(&mut self) -> Result<&mut TokenWallet> {
        self.wallet.as_mut().ok_or(DriverError::RewardsUnavailable)
    }

    // ==================== Delivery History ====================

    pub async fn load_history(&mut self) -> Result<&[Delivery]> {
        match self.platform.backend().delivery_history().await {
            Ok(deliveries) => {
                self.deliveries = deliveries;
                Ok(&self.deliveries)
            }
            Err(e) => {
                error!("Error loading delivery history: {}", e);
                Err(e.into())
            }
        }
    }

    /// Deliveries waiting for a driver
    pub fn pending(&self) -> Vec<&Delivery> {
        self.deliveries.iter().filter(|d| d.is_pending()).collect()
    }

    /// Every delivery that is no longer pending
    pub fn past(&self) -> Vec<&Delivery> {
        self.deliveries.iter().filter(|d| !d.is_pending()).collect()
    }

    // ==================== Delivery Actions ====================

    pub async fn accept_delivery(&mut self, delivery: &Delivery) -> Result<Delivery> {
        let driver_id = self.driver_id()?;

        let accepted = self
            .platform
            .backend()
            .accept_delivery(&delivery.id, &AcceptDeliveryRequest { driver_id })
            .await
            .map_err(|e| {
                error!("Error accepting delivery {}: {}", delivery.id, e);
                e
            })?;

        info!("Delivery {} accepted", accepted.id);
        self.active = Some(accepted.clone());
        Ok(accepted)
    }

    /// Create the driver's payment for a delivery and submit it
    pub async fn create_delivery_payment(
        &self,
        amount: f64,
        details: &DeliveryDetails,
    ) -> Result<Payment> {
        let data = PaymentData::new(
            amount,
            format!("Delivery Payment - {} to {}", details.from, details.to),
            json!({ "type": "delivery", "details": details }),
        );

        let payment = self.platform.create_payment(&data).await?;
        Ok(self.platform.submit_payment(&payment.identifier).await?)
    }

    pub async fn share_delivery(&self, delivery: &Delivery) -> Result<()> {
        let content = ShareContent {
            title: SHARE_TITLE.to_string(),
            text: format!(
                "Check out my delivery from {} to {}!",
                delivery.pickup, delivery.dropoff
            ),
            url: format!("{}/delivery/{}", self.app_url, delivery.id),
        };
        Ok(self.platform.share_content(&content).await?)
    }

    /// Pay, complete on the backend, mint the reward and share
    pub async fn complete_delivery(&mut self, delivery: &Delivery) -> Result<CompletedDelivery> {
        let driver_id = self.driver_id()?;
        let token_code = match &self.tokens {
            Some(tokens) => tokens.config().token_code.clone(),
            None => return Err(DriverError::RewardsUnavailable),
        };

        let payment = self
            .create_delivery_payment(delivery.amount, &DeliveryDetails::from(delivery))
            .await?;

        let completed = self
            .platform
            .backend()
            .complete_delivery(
                &delivery.id,
                &CompleteDeliveryRequest {
                    driver_id,
                    payment_id: payment.identifier.clone(),
                },
            )
            .await
            .map_err(|e| {
                error!("Error completing delivery {}: {}", delivery.id, e);
                e
            })?;

        let reward = calculate_reward(&completed);
        let reward_transaction = self.wallet_mut()?.mint_reward(reward).await?;

        let shared = match self.share_delivery(&completed).await {
            Ok(()) => true,
            Err(DriverError::Platform(PlatformError::Unsupported(reason))) => {
                info!("Delivery {} not shared: {}", completed.id, reason);
                false
            }
            Err(e) => return Err(e),
        };

        info!(
            "Delivery {} completed, earned {} {}",
            completed.id, reward, token_code
        );

        if self.active.as_ref().map(|a| a.id.as_str()) == Some(completed.id.as_str()) {
            self.active = None;
        }
        self.deliveries.retain(|d| d.id != completed.id);
        self.deliveries.insert(0, completed.clone());

        Ok(CompletedDelivery {
            delivery: completed,
            payment,
            reward,
            reward_transaction,
            shared,
        })
    }
}
