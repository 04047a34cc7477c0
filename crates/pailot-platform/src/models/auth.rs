//! Authentication Models
//!
//! Sign-in scopes, the authenticated user and the in-memory session.

use super::payment::Payment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission requested from the wallet during authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Payments,
    Username,
    WalletAddress,
}

impl Scope {
    /// Scopes requested on every sign-in
    pub const SIGN_IN: [Scope; 3] = [Scope::Payments, Scope::Username, Scope::WalletAddress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Payments => "payments",
            Scope::Username => "username",
            Scope::WalletAddress => "wallet_address",
        }
    }
}

/// Authenticated Pi user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,

    #[serde(default)]
    pub username: Option<String>,

    /// Ledger account of the user's wallet (G... address), when granted
    #[serde(default, alias = "wallet_address")]
    pub wallet_address: Option<String>,
}

/// Result of a wallet authentication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub access_token: String,

    pub user: User,

    #[serde(default)]
    pub scopes: Vec<Scope>,

    /// A payment the wallet found unfinished during authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomplete_payment: Option<Payment>,
}

/// Signed-in session, held in memory only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: User,
    pub scopes: Vec<Scope>,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn from_auth(auth: &AuthResult) -> Self {
        Self {
            access_token: auth.access_token.clone(),
            user: auth.user.clone(),
            scopes: auth.scopes.clone(),
            signed_in_at: Utc::now(),
        }
    }

    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }
}

/// Body of `POST /api/auth/signin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub access_token: String,
    pub uid: String,
    pub username: Option<String>,
}

impl From<&AuthResult> for SignInRequest {
    fn from(auth: &AuthResult) -> Self {
        Self {
            access_token: auth.access_token.clone(),
            uid: auth.user.uid.clone(),
            username: auth.user.username.clone(),
        }
    }
}
