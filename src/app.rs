//! Composition root
//!
//! Builds the platform session and the token client from configuration.
//! Nothing here is global: the entry point owns the [`App`] and hands it to
//! the command it runs.

use crate::config::{AppConfig, ConfigError};
use crate::driver::DriverService;
use anyhow::{Context, Result};
use pailot_payments::{HorizonClient, TokenClient};
use pailot_platform::{BackendApi, HttpBackend, PiPlatformClient, PlatformSession, WalletSdk};
use std::sync::Arc;
use tracing::{debug, info};

pub struct App {
    pub config: AppConfig,
    pub platform: PlatformSession,
    tokens: Option<TokenClient>,
}

impl App {
    /// Assemble from already-built adapters
    pub fn new(config: AppConfig, platform: PlatformSession, tokens: Option<TokenClient>) -> Self {
        Self {
            config,
            platform,
            tokens,
        }
    }

    /// Assemble the production adapters described by `config`
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let backend: Arc<dyn BackendApi> = Arc::new(
            HttpBackend::new(Some(&config.backend_url))
                .context("creating backend client")?
                .with_access_token(config.pi_access_token.clone()),
        );

        let sdk: Option<Arc<dyn WalletSdk>> = match &config.pi_access_token {
            Some(token) => {
                let client = PiPlatformClient::new(Some(&config.platform_url), token)
                    .context("creating Pi Platform client")?
                    .with_api_key(config.pi_api_key.clone())
                    .with_wallet_address(config.wallet_address.clone());
                let sdk: Arc<dyn WalletSdk> = Arc::new(client);
                Some(sdk)
            }
            None => {
                debug!("No Pi access token configured; wallet SDK unavailable");
                None
            }
        };

        let tokens = match config.ledger_config() {
            Ok(ledger) => {
                let horizon = HorizonClient::new(&ledger).context("creating Horizon client")?;
                info!(
                    "Ledger: {} ({}) token {}",
                    ledger.horizon_url, ledger.network_passphrase, ledger.token_code
                );
                Some(TokenClient::new(ledger, Arc::new(horizon))?)
            }
            Err(ConfigError::Missing(name)) => {
                debug!("{} not set; token commands disabled", name);
                None
            }
            Err(e) => return Err(e).context("invalid ledger configuration"),
        };

        Ok(Self::new(config, PlatformSession::new(sdk, backend), tokens))
    }

    /// Token client; only available with a configured issuer
    pub fn tokens(&self) -> Result<&TokenClient> {
        self.tokens
            .as_ref()
            .context("PAILOT_TOKEN_ISSUER is not set; token operations are unavailable")
    }

    /// Driver flow over this app's adapters
    pub fn into_driver(self) -> DriverService {
        DriverService::new(self.platform, self.tokens, &self.config.app_url)
            .with_wallet_address(self.config.wallet_address)
    }
}
