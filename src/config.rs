//! Application configuration
//!
//! Loaded once at start-up from the environment. Secrets (the Pi server
//! API key and the user's access token) fall back to the OS keychain when
//! they are not set in the environment.

use pailot_payments::{LedgerConfig, Network, DEFAULT_TOKEN_CODE};
use pailot_platform::{DEFAULT_BACKEND_URL, DEFAULT_PLATFORM_URL};
use thiserror::Error;
use tracing::debug;

/// Keychain service holding PailotPH secrets
pub const KEYCHAIN_SERVICE: &str = "ph.pailot";

pub const DEFAULT_APP_URL: &str = "https://pailot.ph";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error(transparent)]
    Ledger(#[from] pailot_payments::PaymentError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,

    /// Public origin used in share links
    pub app_url: String,

    /// Sandbox mode selects the Pi testnet
    pub sandbox: bool,

    pub token_code: String,
    pub token_issuer: Option<String>,
    pub horizon_url: Option<String>,

    /// Carried for map-rendering clients; unused by the CLI itself
    pub map_api_key: Option<String>,

    pub platform_url: String,
    pub pi_api_key: Option<String>,
    pub pi_access_token: Option<String>,

    /// Wallet address to use when the platform does not report one
    pub wallet_address: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

/// Read a secret from the OS keychain
fn keychain_secret(account: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, account).ok()?;
    match entry.get_password() {
        Ok(secret) => Some(secret),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            debug!("Keychain lookup for {} failed: {}", account, e);
            None
        }
    }
}

impl AppConfig {
    /// Load from process environment, falling back to the keychain for secrets
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(|name| std::env::var(name).ok(), keychain_secret)
    }

    /// Load from arbitrary variable and secret sources
    pub fn from_sources(
        lookup_var: impl Fn(&str) -> Option<String>,
        lookup_secret: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str| non_empty(lookup_var(name));
        let secret_or_var =
            |name: &str, account: &str| var(name).or_else(|| non_empty(lookup_secret(account)));

        let sandbox = match var("PAILOT_SANDBOX") {
            Some(value) => parse_bool("PAILOT_SANDBOX", &value)?,
            None => true,
        };

        Ok(Self {
            backend_url: var("PAILOT_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            app_url: var("PAILOT_APP_URL")
                .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            sandbox,
            token_code: var("PAILOT_TOKEN_CODE").unwrap_or_else(|| DEFAULT_TOKEN_CODE.to_string()),
            token_issuer: var("PAILOT_TOKEN_ISSUER"),
            horizon_url: var("PAILOT_HORIZON_URL"),
            map_api_key: var("PAILOT_MAP_API_KEY"),
            platform_url: var("PI_PLATFORM_URL").unwrap_or_else(|| DEFAULT_PLATFORM_URL.to_string()),
            pi_api_key: secret_or_var("PI_API_KEY", "pi_api_key"),
            pi_access_token: secret_or_var("PI_ACCESS_TOKEN", "pi_access_token"),
            wallet_address: var("PAILOT_WALLET_ADDRESS"),
        })
    }

    pub fn network(&self) -> Network {
        if self.sandbox {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    /// Ledger configuration for the reward token; needs the issuer
    pub fn ledger_config(&self) -> Result<LedgerConfig, ConfigError> {
        let issuer = self
            .token_issuer
            .as_deref()
            .ok_or(ConfigError::Missing("PAILOT_TOKEN_ISSUER"))?;

        let mut config =
            LedgerConfig::for_network(self.network(), issuer).with_token_code(&self.token_code);
        if let Some(url) = &self.horizon_url {
            config = config.with_horizon_url(url);
        }

        config.validate()?;
        Ok(config)
    }
}
